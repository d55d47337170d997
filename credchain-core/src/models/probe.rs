//! Probe outcome type.

use serde::Serialize;

/// Failure reason recorded when an attempt is cancelled or times out.
pub const CANCELLED_REASON: &str = "cancelled";

/// Outcome of attempting one credential source against the external probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeResult<T> {
    /// The probe accepted the credentials and returned metadata.
    Success {
        /// Whatever the probe returned.
        metadata: T,
    },
    /// The probe rejected the credentials or could not run.
    Failure {
        /// Human-readable reason.
        reason: String,
    },
}

impl<T> ProbeResult<T> {
    /// Creates a successful result.
    pub fn success(metadata: T) -> Self {
        Self::Success { metadata }
    }

    /// Creates a failed result.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Creates the failure recorded for a cancelled attempt.
    pub fn cancelled() -> Self {
        Self::failure(CANCELLED_REASON)
    }

    /// Returns true for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true if this is the cancellation failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Failure { reason } if reason == CANCELLED_REASON)
    }

    /// Returns the metadata of a successful result.
    pub fn metadata(&self) -> Option<&T> {
        match self {
            Self::Success { metadata } => Some(metadata),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the reason of a failed result.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let ok: ProbeResult<u32> = ProbeResult::success(7);
        assert!(ok.is_success());
        assert_eq!(ok.metadata(), Some(&7));
        assert_eq!(ok.reason(), None);

        let failed: ProbeResult<u32> = ProbeResult::failure("403 Forbidden");
        assert!(!failed.is_success());
        assert_eq!(failed.reason(), Some("403 Forbidden"));
        assert!(!failed.is_cancelled());
    }

    #[test]
    fn test_cancelled_reason_is_exact() {
        let cancelled: ProbeResult<()> = ProbeResult::cancelled();
        assert_eq!(cancelled.reason(), Some("cancelled"));
        assert!(cancelled.is_cancelled());
    }

    #[test]
    fn test_serialization_tag() {
        let json = serde_json::to_value(ProbeResult::success("title")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["metadata"], "title");

        let json = serde_json::to_value(ProbeResult::<String>::failure("nope")).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["reason"], "nope");
    }
}
