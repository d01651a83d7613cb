use rand::rngs::StdRng;
use tracing::debug;

use crate::error::{AgentError, MoveError};
use crate::game::{is_terminal, GameConfig, Grid, Mark, Observation};

use super::agent::{make_rng, Agent};
use super::heuristic::{Heuristic, HeuristicKind};
use super::selector::select_best;

/// Minimax search parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Plies searched, counting the agent's own candidate move.
    pub depth: usize,
    pub heuristic: HeuristicKind,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig {
            depth: 3,
            heuristic: HeuristicKind::OpenLine,
        }
    }
}

/// Fixed-depth minimax value of `grid`.
///
/// Leaves and terminal positions are always scored from the root agent's
/// `mark`, whichever side is to move there.
pub fn minimax(
    grid: &Grid,
    depth: usize,
    maximizing: bool,
    mark: Mark,
    config: &GameConfig,
    heuristic: &dyn Heuristic,
) -> Result<f64, MoveError> {
    if depth == 0 || is_terminal(grid, config.inarow) {
        return Ok(heuristic.score(grid, mark, config));
    }

    let mover = if maximizing { mark } else { mark.other() };
    let mut value = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for col in grid.legal_columns() {
        let child = grid.drop_piece(col, mover)?;
        let score = minimax(&child, depth - 1, !maximizing, mark, config, heuristic)?;
        value = if maximizing {
            value.max(score)
        } else {
            value.min(score)
        };
    }

    Ok(value)
}

/// Value of playing `col`: the agent moves, then the opponent replies
/// adversarially for the remaining `depth - 1` plies.
pub fn score_move(
    grid: &Grid,
    col: usize,
    mark: Mark,
    depth: usize,
    config: &GameConfig,
    heuristic: &dyn Heuristic,
) -> Result<f64, MoveError> {
    let next = grid.drop_piece(col, mark)?;
    minimax(&next, depth.saturating_sub(1), false, mark, config, heuristic)
}

/// Minimax agent without pruning, breaking ties at random.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    rng: StdRng,
}

impl MinimaxAgent {
    pub fn new(config: MinimaxConfig, seed: Option<u64>) -> Self {
        MinimaxAgent {
            depth: config.depth,
            heuristic: config.heuristic.build(),
            rng: make_rng(seed),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>, seed: Option<u64>) -> Self {
        MinimaxAgent {
            depth,
            heuristic,
            rng: make_rng(seed),
        }
    }

    /// Score of every legal column, in column order.
    pub fn score_columns(
        &self,
        grid: &Grid,
        mark: Mark,
        config: &GameConfig,
    ) -> Result<Vec<(usize, f64)>, AgentError> {
        let legal = grid.legal_columns();
        if legal.is_empty() {
            return Err(AgentError::NoLegalMoves);
        }

        legal
            .into_iter()
            .map(|col| {
                let heuristic = self.heuristic.as_ref();
                let score = score_move(grid, col, mark, self.depth, config, heuristic)?;
                Ok((col, score))
            })
            .collect()
    }
}

impl Agent for MinimaxAgent {
    fn select_action(
        &mut self,
        observation: &Observation,
        config: &GameConfig,
    ) -> Result<usize, AgentError> {
        let grid = observation.grid(config)?;
        let mark = observation.mark()?;

        let scored = self.score_columns(&grid, mark, config)?;
        debug!(depth = self.depth, ?scored, "minimax column scores");

        select_best(&scored, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
