use super::window::winner;
use super::{GameConfig, Grid, Mark, Observation};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Mark),
    Draw,
}

/// A game in progress, used for match play between agents.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    grid: Grid,
    inarow: usize,
    current_player: Mark,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state
    pub fn initial(config: &GameConfig) -> Self {
        GameState {
            grid: config.empty_grid(),
            inarow: config.inarow,
            current_player: Mark::One, // Player 1 starts
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Get reference to grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.grid.legal_columns()
    }

    /// What the player to move sees.
    pub fn observation(&self) -> Observation {
        Observation::new(&self.grid, self.current_player)
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let grid = self.grid.drop_piece(column, self.current_player)?;

        let outcome = if let Some(mark) = winner(&grid, self.inarow) {
            Some(GameOutcome::Winner(mark))
        } else if grid.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        Ok(GameState {
            grid,
            inarow: self.inarow,
            current_player: self.current_player.other(),
            outcome,
        })
    }
}
