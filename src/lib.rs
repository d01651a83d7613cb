//! # ConnectX Agents
//!
//! Move selection for Connect-X, the generalised Connect Four played on an
//! arbitrary grid with an arbitrary win length. Two search engines share one
//! board model: a fixed-depth minimax over hand-written heuristics and a
//! time-bounded Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`game`] — Grid, marks, window scanning, terminal detection, observations
//! - [`ai`] — Agent trait, heuristics, minimax, MCTS, random baseline
//! - [`arena`] — Head-to-head games and match statistics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
