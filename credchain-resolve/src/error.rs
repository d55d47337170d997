//! Resolver and subprocess error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Resolve Error
// ============================================================================

/// Error type for resolution.
///
/// Per-candidate failures are recorded in the report, never returned here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The caller supplied no candidates.
    #[error("No credential candidates supplied")]
    EmptyCandidateList,
}

// ============================================================================
// Process Error
// ============================================================================

/// Error type for process operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command not found.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Command timed out.
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// Non-zero exit code.
    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code from the process.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
