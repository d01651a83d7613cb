use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::error::AgentError;
use crate::game::{GameConfig, Observation};

use super::mcts::MctsAgent;
use super::minimax::MinimaxAgent;
use super::random::RandomAgent;

/// Universal interface for all move-selection engines.
pub trait Agent {
    /// Choose a column for the player described by `observation`.
    ///
    /// The returned column is always legal (its top cell is empty).
    fn select_action(
        &mut self,
        observation: &Observation,
        config: &GameConfig,
    ) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Available engines, selectable from the command line and configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    Minimax,
    Mcts,
    Random,
}

/// Construct a boxed agent from the application configuration.
pub fn build_agent(kind: EngineKind, config: &AppConfig) -> Box<dyn Agent> {
    match kind {
        EngineKind::Minimax => Box::new(MinimaxAgent::new(config.minimax.clone(), config.seed)),
        EngineKind::Mcts => Box::new(MctsAgent::new(config.mcts.clone(), config.seed)),
        EngineKind::Random => Box::new(RandomAgent::with_seed(config.seed)),
    }
}

/// Seeded RNG when a seed is given, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
