use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepzError {
    /// Precondition failure: the operation requires a logged-in user.
    #[error("No active session")]
    NoActiveSession,

    /// An add would violate per-collection id uniqueness.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// An imported snapshot failed validation. The store and session are
    /// untouched when this is returned.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session error: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, RepzError>;
