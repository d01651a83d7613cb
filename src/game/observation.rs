use super::board::{Cell, Grid};
use super::player::Mark;
use crate::error::AgentError;

/// Board dimensions, win length and per-move time budget.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub inarow: usize,
    /// Seconds available for one move.
    pub timeout: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 6,
            columns: 7,
            inarow: 4,
            timeout: 2.0,
        }
    }
}

impl GameConfig {
    pub fn empty_grid(&self) -> Grid {
        Grid::new(self.rows, self.columns)
    }
}

/// What an agent sees on its turn: the flat row-major board and its own mark.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    pub board: Vec<u8>,
    pub mark: u8,
}

impl Observation {
    pub fn new(grid: &Grid, mark: Mark) -> Self {
        Observation {
            board: grid.cells().iter().map(|c| c.value()).collect(),
            mark: mark.value(),
        }
    }

    /// The deciding player's mark.
    pub fn mark(&self) -> Result<Mark, AgentError> {
        Mark::from_value(self.mark).ok_or_else(|| {
            AgentError::InvalidObservation(format!("mark must be 1 or 2, got {}", self.mark))
        })
    }

    /// Rebuild the grid described by this observation.
    pub fn grid(&self, config: &GameConfig) -> Result<Grid, AgentError> {
        let expected = config.rows.checked_mul(config.columns).ok_or_else(|| {
            AgentError::InvalidObservation(format!(
                "board size {}x{} is too large",
                config.rows, config.columns
            ))
        })?;
        if self.board.len() != expected {
            return Err(AgentError::InvalidObservation(format!(
                "board has {} cells, expected {} ({}x{})",
                self.board.len(),
                expected,
                config.rows,
                config.columns
            )));
        }

        let cells = self
            .board
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                Cell::from_value(v).ok_or_else(|| {
                    AgentError::InvalidObservation(format!("cell {i} has invalid value {v}"))
                })
            })
            .collect::<Result<Vec<Cell>, AgentError>>()?;

        Grid::from_cells(config.rows, config.columns, cells).ok_or_else(|| {
            AgentError::InvalidObservation("board does not match configuration".into())
        })
    }
}

/// A single move request: the observation plus, optionally, the game it
/// belongs to. Unknown harness fields are ignored.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActRequest {
    pub observation: Observation,
    #[serde(default)]
    pub configuration: Option<GameConfig>,
}

impl ActRequest {
    /// The request's own configuration, or `fallback` when it carries none.
    pub fn game_config(&self, fallback: &GameConfig) -> GameConfig {
        self.configuration.clone().unwrap_or_else(|| fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_roundtrip_through_grid() {
        let config = GameConfig::default();
        let grid = config
            .empty_grid()
            .drop_piece(3, Mark::One)
            .unwrap()
            .drop_piece(3, Mark::Two)
            .unwrap();
        let obs = Observation::new(&grid, Mark::One);

        assert_eq!(obs.board.len(), 42);
        assert_eq!(obs.board[5 * 7 + 3], 1);
        assert_eq!(obs.board[4 * 7 + 3], 2);
        assert_eq!(obs.grid(&config).unwrap(), grid);
        assert_eq!(obs.mark().unwrap(), Mark::One);
    }

    #[test]
    fn test_wrong_board_length_is_rejected() {
        let obs = Observation {
            board: vec![0; 41],
            mark: 1,
        };
        assert!(matches!(
            obs.grid(&GameConfig::default()),
            Err(AgentError::InvalidObservation(_))
        ));
    }

    #[test]
    fn test_invalid_cell_value_is_rejected() {
        let mut board = vec![0; 42];
        board[10] = 7;
        let obs = Observation { board, mark: 1 };
        assert!(obs.grid(&GameConfig::default()).is_err());
    }

    #[test]
    fn test_oversized_configuration_is_rejected() {
        let obs = Observation {
            board: vec![0; 42],
            mark: 1,
        };
        let config = GameConfig {
            rows: usize::MAX,
            columns: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            obs.grid(&config),
            Err(AgentError::InvalidObservation(_))
        ));
    }

    #[test]
    fn test_invalid_mark_is_rejected() {
        let obs = Observation {
            board: vec![0; 42],
            mark: 0,
        };
        assert!(obs.mark().is_err());
    }

    #[test]
    fn test_deserialize_harness_json() {
        let json = r#"{"board": [0, 0, 0, 0, 1, 2], "mark": 2}"#;
        let obs: Observation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.mark, 2);

        let config: GameConfig =
            serde_json::from_str(r#"{"rows": 2, "columns": 3, "inarow": 2}"#).unwrap();
        assert!((config.timeout - 2.0).abs() < 1e-9);
        let grid = obs.grid(&config).unwrap();
        assert_eq!(grid.get(1, 1), Cell::One);
        assert_eq!(grid.get(1, 2), Cell::Two);
    }

    #[test]
    fn test_act_request_with_configuration() {
        let json = r#"{
            "observation": {"board": [0, 0, 0, 0, 0, 0, 0, 0, 1], "mark": 2, "step": 1},
            "configuration": {
                "rows": 3, "columns": 3, "inarow": 3, "timeout": 1.5, "episodeSteps": 1000
            }
        }"#;
        let request: ActRequest = serde_json::from_str(json).unwrap();
        let config = request.game_config(&GameConfig::default());
        assert_eq!(config.rows, 3);
        assert!((config.timeout - 1.5).abs() < 1e-9);
        assert_eq!(request.observation.grid(&config).unwrap().get(2, 2), Cell::One);
    }

    #[test]
    fn test_act_request_falls_back_to_given_configuration() {
        let json = r#"{"observation": {"board": [0, 0, 0, 0], "mark": 1}}"#;
        let request: ActRequest = serde_json::from_str(json).unwrap();
        assert!(request.configuration.is_none());

        let fallback = GameConfig {
            rows: 2,
            columns: 2,
            inarow: 2,
            timeout: 1.0,
        };
        assert_eq!(request.game_config(&fallback), fallback);
    }
}
