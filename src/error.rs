//! Error types for the Coffer compound container tooling.

use thiserror::Error;

/// Container store errors
///
/// One variant per failure class in the store contract. The first
/// occurrence of any of these aborts the current operation; nothing is
/// retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open {name}: {reason}")]
    Open { name: String, reason: String },

    #[error("failed to enumerate children of {name}: {reason}")]
    Enumeration { name: String, reason: String },

    #[error("failed to write {name}: {reason}")]
    Write { name: String, reason: String },

    #[error("expected child {0:?} was not found")]
    NotFound(String),

    #[error("traversal exceeded maximum depth of {0}")]
    DepthExceeded(usize),

    #[error("stale or mismatched handle: {0}")]
    InvalidHandle(String),

    #[error("container file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-level errors surfaced by the CLI front end
#[derive(Debug, Error)]
pub enum CofferError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for CofferError {
    fn from(err: config::ConfigError) -> Self {
        CofferError::Config(err.to_string())
    }
}
