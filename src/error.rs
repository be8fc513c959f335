use std::path::PathBuf;

/// Illegal operations on a [`Board`](crate::game::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell out of range: row={row} col={col}")]
    OutOfRange { row: usize, col: usize },

    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("invalid player id {0} (expected 1 or 2)")]
    InvalidPlayerId(u8),

    #[error("invalid unmove: col={col}")]
    InvalidUnmove { col: usize },
}

/// Raised through the arbiter once a search has been told to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search cancelled: time is up")]
pub struct Cancelled;

/// Ways a single move computation can end early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error("board error during search: {0}")]
    Board(#[from] BoardError),

    #[error("no legal move: the board is full")]
    BoardFull,
}

/// Errors that can occur when resolving an agent by name.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown agent '{name}' (known: {known:?})")]
    UnknownAgent { name: String, known: Vec<String> },
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

/// Errors that abort a whole match rather than a single game.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("move rejected: {0}")]
    Move(#[from] crate::game::MoveError),
}
