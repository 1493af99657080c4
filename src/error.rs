//! Error types for the flashcard core

use thiserror::Error;

/// Result type for flashcard operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Quality grade outside the SuperMemo range 0-5
    #[error("Invalid grade: {0} (expected 0-5)")]
    InvalidGrade(u8),

    /// No flashcard with the given id
    #[error("Flashcard not found: {0}")]
    NotFound(i64),

    /// Repository I/O failure (wraps rusqlite::Error)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    /// Record whose scheduling state breaks the SM-2 invariants
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: i64, reason: String },

    /// Stored or supplied date that is neither RFC 3339 nor YYYY-MM-DD
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
