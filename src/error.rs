//! Error types shared across the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A difficulty string outside {easy, medium, hard}. Raised at parse
    /// boundaries (database rows, JSON import, user input); past those
    /// boundaries the closed `Difficulty` enum makes invalid values
    /// unrepresentable.
    #[error("invalid difficulty '{0}': expected 'easy', 'medium' or 'hard'")]
    InvalidDifficulty(String),

    /// A stored record that violates the data model, e.g. a negative
    /// review count or an out-of-range timestamp. Rejected at the storage
    /// boundary so the scheduler can assume well-formed input.
    #[error("malformed record '{id}': {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
