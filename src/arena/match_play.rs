use tracing::{debug, info};

use crate::ai::Agent;
use crate::error::AgentError;
use crate::game::{GameConfig, GameOutcome, GameState, Mark};

use super::metrics::{GameResult, MatchStats, Side};

/// Columns played in order and how the game ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub moves: Vec<usize>,
    pub outcome: GameOutcome,
}

/// Play one game. `first` moves as player 1.
///
/// An agent answering with a column that is not legal ends the game with
/// [`AgentError::IllegalAction`].
pub fn play_game(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    config: &GameConfig,
) -> Result<GameRecord, AgentError> {
    let mut state = GameState::initial(config);
    let mut moves = Vec::new();

    let outcome = loop {
        if let Some(outcome) = state.outcome() {
            break outcome;
        }

        let player = state.current_player();
        let agent: &mut dyn Agent = match player {
            Mark::One => &mut *first,
            Mark::Two => &mut *second,
        };
        let action = agent.select_action(&state.observation(), config)?;

        let legal = state.legal_actions();
        if !legal.contains(&action) {
            return Err(AgentError::IllegalAction { action, legal });
        }
        debug!(agent = agent.name(), player = player.name(), action, "move");

        state = state.apply_move(action)?;
        moves.push(action);
    };

    Ok(GameRecord { moves, outcome })
}

/// Play `games` games between `a` and `b`, alternating who moves first.
/// Agent `a` opens the first game.
pub fn play_match(
    a: &mut dyn Agent,
    b: &mut dyn Agent,
    games: usize,
    config: &GameConfig,
) -> Result<MatchStats, AgentError> {
    let mut stats = MatchStats::new();

    for game_idx in 0..games {
        let a_first = game_idx % 2 == 0;
        let record = if a_first {
            play_game(a, b, config)?
        } else {
            play_game(b, a, config)?
        };

        let winner = match record.outcome {
            GameOutcome::Winner(mark) => {
                let first_won = mark == Mark::One;
                Some(if first_won == a_first { Side::A } else { Side::B })
            }
            GameOutcome::Draw => None,
        };
        info!(
            game = game_idx + 1,
            a_first,
            ?winner,
            moves = record.moves.len(),
            "game finished"
        );

        stats.record(GameResult {
            winner,
            game_length: record.moves.len(),
        });
    }

    info!(a = a.name(), b = b.name(), %stats, "match finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MinimaxAgent, MinimaxConfig, RandomAgent};
    use crate::game::Observation;

    /// Always answers with the same column.
    struct FixedAgent(usize);

    impl Agent for FixedAgent {
        fn select_action(&mut self, _: &Observation, _: &GameConfig) -> Result<usize, AgentError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    #[test]
    fn test_play_game_terminates() {
        let config = GameConfig::default();
        let mut a = RandomAgent::with_seed(Some(1));
        let mut b = RandomAgent::with_seed(Some(2));
        let record = play_game(&mut a, &mut b, &config).unwrap();
        assert!(!record.moves.is_empty());
        assert!(record.moves.len() <= 42);
    }

    #[test]
    fn test_vertical_race_is_won_by_first_player() {
        let config = GameConfig::default();
        let mut first = FixedAgent(0);
        let mut second = FixedAgent(1);
        let record = play_game(&mut first, &mut second, &config).unwrap();
        assert_eq!(record.moves, vec![0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(record.outcome, GameOutcome::Winner(Mark::One));
    }

    #[test]
    fn test_illegal_action_is_reported() {
        let config = GameConfig::default();
        let mut first = FixedAgent(2);
        let mut second = FixedAgent(2);
        // Column 2 fills after six moves without a winner.
        let err = play_game(&mut first, &mut second, &config).unwrap_err();
        assert_eq!(
            err,
            AgentError::IllegalAction {
                action: 2,
                legal: vec![0, 1, 3, 4, 5, 6],
            }
        );
    }

    #[test]
    fn test_out_of_range_action_is_reported() {
        let config = GameConfig::default();
        let mut first = FixedAgent(9);
        let mut second = FixedAgent(0);
        assert!(matches!(
            play_game(&mut first, &mut second, &config),
            Err(AgentError::IllegalAction { action: 9, .. })
        ));
    }

    #[test]
    fn test_small_board_draw() {
        let config = GameConfig {
            rows: 2,
            columns: 2,
            inarow: 3,
            timeout: 1.0,
        };
        let mut a = RandomAgent::with_seed(Some(3));
        let mut b = RandomAgent::with_seed(Some(4));
        let record = play_game(&mut a, &mut b, &config).unwrap();
        assert_eq!(record.outcome, GameOutcome::Draw);
        assert_eq!(record.moves.len(), 4);
    }

    #[test]
    fn test_match_stats_add_up() {
        let config = GameConfig::default();
        let mut a = RandomAgent::with_seed(Some(5));
        let mut b = RandomAgent::with_seed(Some(6));
        let stats = play_match(&mut a, &mut b, 10, &config).unwrap();
        assert_eq!(stats.games(), 10);
        assert_eq!(stats.a_wins + stats.b_wins + stats.draws, 10);
        assert!(stats.average_game_length() >= 7.0);
    }

    #[test]
    fn test_seats_alternate() {
        let config = GameConfig::default();
        let mut a = FixedAgent(0);
        let mut b = FixedAgent(1);
        let stats = play_match(&mut a, &mut b, 4, &config).unwrap();
        // The opener wins the vertical race: A opens games 1 and 3.
        assert_eq!(stats.a_wins, 2);
        assert_eq!(stats.b_wins, 2);
    }

    #[test]
    fn test_minimax_beats_random_mostly() {
        let config = GameConfig::default();
        let mut minimax = MinimaxAgent::new(
            MinimaxConfig {
                depth: 2,
                ..MinimaxConfig::default()
            },
            Some(7),
        );
        let mut random = RandomAgent::with_seed(Some(8));
        let stats = play_match(&mut minimax, &mut random, 6, &config).unwrap();
        assert!(stats.a_wins >= 4, "minimax only won {} of 6", stats.a_wins);
    }
}
