use std::path::Path;

use tracing::warn;

use crate::ai::{MctsConfig, MinimaxConfig};
use crate::error::ConfigError;
use crate::game::GameConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for every engine's RNG. OS entropy when absent.
    pub seed: Option<u64>,
    pub game: GameConfig,
    pub minimax: MinimaxConfig,
    pub mcts: MctsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_game(&self.game)?;

        if self.minimax.depth == 0 {
            return Err(ConfigError::Validation(
                "minimax.depth must be >= 1".into(),
            ));
        }

        if !self.mcts.exploration.is_finite() || self.mcts.exploration < 0.0 {
            return Err(ConfigError::Validation(
                "mcts.exploration must be finite and >= 0".into(),
            ));
        }
        if !self.mcts.time_margin.is_finite() || self.mcts.time_margin < 0.0 {
            return Err(ConfigError::Validation(
                "mcts.time_margin must be finite and >= 0".into(),
            ));
        }
        if self.mcts.iterations == Some(0) {
            return Err(ConfigError::Validation(
                "mcts.iterations must be >= 1 when set".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
    }
}

/// Validate board dimensions and the move timeout. Also applied to the
/// configuration carried by `act` requests.
pub fn validate_game(game: &GameConfig) -> Result<(), ConfigError> {
    if game.rows == 0 || game.columns == 0 {
        return Err(ConfigError::Validation(
            "game.rows and game.columns must be > 0".into(),
        ));
    }
    if game.inarow == 0 {
        return Err(ConfigError::Validation("game.inarow must be > 0".into()));
    }
    if !game.timeout.is_finite() || game.timeout < 0.0 {
        return Err(ConfigError::Validation(
            "game.timeout must be finite and >= 0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::HeuristicKind;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.seed, None);
        assert_eq!(config.game.inarow, 4);
        assert_eq!(config.minimax.depth, 3);
        assert_eq!(config.mcts.rollout_cap, 3);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[minimax]
heuristic = "window-count"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.minimax.heuristic, HeuristicKind::WindowCount);
        // Other fields should be defaults
        assert_eq!(config.minimax.depth, 3);
        assert_eq!(config.game.columns, 7);
        assert!((config.mcts.time_margin - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.game.rows, default.game.rows);
        assert_eq!(config.mcts.iterations, default.mcts.iterations);
    }

    #[test]
    fn test_unknown_heuristic_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[minimax]\nheuristic = \"greedy\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.minimax.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_inarow() {
        let mut config = AppConfig::default();
        config.game.inarow = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_board() {
        let mut config = AppConfig::default();
        config.game.columns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_timeout() {
        let mut config = AppConfig::default();
        config.game.timeout = -1.0;
        assert!(config.validate().is_err());
        config.game.timeout = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_exploration() {
        let mut config = AppConfig::default();
        config.mcts.exploration = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_iterations() {
        let mut config = AppConfig::default();
        config.mcts.iterations = Some(0);
        assert!(config.validate().is_err());
        config.mcts.iterations = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inarow_larger_than_board_is_allowed() {
        let mut config = AppConfig::default();
        config.game.inarow = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.minimax.depth, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connectx.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
seed = 7

[game]
rows = 5
columns = 5
inarow = 3

[mcts]
iterations = 250
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.game.rows, 5);
        assert_eq!(config.game.inarow, 3);
        assert_eq!(config.mcts.iterations, Some(250));
        // Others are defaults
        assert!((config.game.timeout - 2.0).abs() < 1e-9);
        assert_eq!(config.minimax.heuristic, HeuristicKind::OpenLine);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[minimax]\ndepth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[game\nrows = 6\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().unwrap();
        assert_eq!(config.game.columns, 7);
        assert_eq!(config.minimax.heuristic, HeuristicKind::OpenLine);
    }
}
