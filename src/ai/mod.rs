mod agent;
pub mod heuristic;
pub mod mcts;
pub mod minimax;
mod random;
mod selector;

pub use agent::{build_agent, make_rng, Agent, EngineKind};
pub use heuristic::{Heuristic, HeuristicKind, OpenLineHeuristic, WindowCountHeuristic};
pub use mcts::{MctsAgent, MctsConfig, MctsTree, SearchBudget};
pub use minimax::{MinimaxAgent, MinimaxConfig};
pub use random::RandomAgent;
pub use selector::{select_best, select_random};
