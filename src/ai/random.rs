use rand::rngs::StdRng;

use crate::error::AgentError;
use crate::game::{GameConfig, Observation};

use super::agent::{make_rng, Agent};
use super::selector::select_random;

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        RandomAgent {
            rng: make_rng(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(
        &mut self,
        observation: &Observation,
        config: &GameConfig,
    ) -> Result<usize, AgentError> {
        let grid = observation.grid(config)?;
        select_random(&grid.legal_columns(), &mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
