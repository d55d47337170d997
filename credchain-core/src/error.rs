//! Core error types for credchain.

use thiserror::Error;

/// Core error type for credchain operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The content is not a usable Netscape cookie file.
    #[error("Invalid cookie file: {0}")]
    InvalidCookieFile(String),

    /// The proxy URL could not be parsed.
    #[error("Invalid proxy URL: {0}")]
    InvalidProxyUrl(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A raw cookie string that cannot be turned into cookies.
    #[error("cookie value {0}")]
    InvalidCookieValue(&'static str),
}
