//! Error types for the journal pipeline.

use std::path::PathBuf;

/// Failures of the external reflection service.
///
/// Kept separate from [`JournalError`] so callers can tell a reflection
/// outage apart from a storage or config failure and still use the
/// classification they already have.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// Provider needs a credential that is not set.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// Connection refused, timeout, DNS, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Output did not contain a usable reflection payload.
    #[error("unparseable reflection: {0}")]
    Malformed(String),

    /// Every provider in the chain failed.
    #[error("all reflection providers failed: {0}")]
    Exhausted(String),
}

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Entry text was blank.
    #[error("entry text is required")]
    EmptyEntry,

    /// Configuration file could not be parsed or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Config file could not be read.
    #[error("cannot read {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// SQLite failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Store mutex poisoned.
    #[error("store lock poisoned: {0}")]
    Lock(String),

    /// Reflection payload (de)serialization failed.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Reflection generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Blocking store task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, JournalError>;
