//! Crate-wide error type

use std::io;
use thiserror::Error;

/// Everything that can go wrong around the engine.
///
/// Scoring itself is infallible; errors come from lookups by name,
/// catalog loading and the storage / reply collaborators.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A dimension key outside the fixed six-dimension catalog.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A pattern label that no detector rule produces.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// A protocol catalog that could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A phrase generator failed to produce a reply.
    #[error("provider {provider} failed: {message}")]
    Provider { provider: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
