//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

use credchain_core::CoreError;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Content rejected as a cookie file.
    #[error("Invalid cookies: {0}")]
    InvalidCookies(String),

    /// Restore requested but no backup exists.
    #[error("No backup found at {}", .0.display())]
    NoBackup(PathBuf),

    /// Core error.
    #[error("Core error: {0}")]
    Core(CoreError),
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCookieFile(msg) => StoreError::InvalidCookies(msg),
            other => StoreError::Core(other),
        }
    }
}
