//! Head-to-head play between agents.

mod match_play;
mod metrics;

pub use match_play::{play_game, play_match, GameRecord};
pub use metrics::{GameResult, MatchStats, Side};
