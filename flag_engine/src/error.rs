use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Malformed agent moves are never errors: they resolve to a blocked turn.
#[derive(Debug, Error)]
pub enum Error {
    #[error("map is missing the `{0}` header")]
    MissingHeader(&'static str),

    #[error("map has no cells")]
    EmptyMap,

    #[error("invalid map character {0:?}")]
    InvalidCharacter(char),

    #[error("invalid symmetry {0:?}, expected one of V, H or C")]
    InvalidSymmetry(String),

    #[error("map row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("map declares {expected} rows but has {found}")]
    RowCount { found: usize, expected: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("expected {expected} controllers, got {found}")]
    ControllerCount { found: usize, expected: usize },

    #[error("both agents are named {0:?}")]
    DuplicateName(String),

    #[error("game is finished")]
    GameFinished,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}
