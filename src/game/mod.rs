//! Core Connect-X game logic: grid, marks, window scanning, the observation
//! interface, and a game state machine with immutable transitions.

mod board;
mod observation;
mod player;
mod state;
pub mod window;

pub use board::{Cell, Grid};
pub use observation::{ActRequest, GameConfig, Observation};
pub use player::Mark;
pub use state::{GameOutcome, GameState};
pub use window::{count_windows, good_spots, is_terminal, winner, windows, Direction, Window};
