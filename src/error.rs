use std::path::PathBuf;

/// Errors raised when a piece cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (board has {columns} columns)")]
    InvalidColumn { column: usize, columns: usize },

    #[error("game is already over")]
    GameOver,
}

/// Errors that can occur while an agent chooses a move.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    #[error("agent selected illegal action {action} (legal: {legal:?})")]
    IllegalAction { action: usize, legal: Vec<usize> },

    #[error("move error: {0}")]
    Move(#[from] MoveError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
