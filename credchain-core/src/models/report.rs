//! Resolution report types.
//!
//! A [`ResolutionReport`] is the only output of one resolution. It is built
//! through a [`ReportBuilder`] by the resolver and is read-only afterwards.

use serde::Serialize;

use super::probe::ProbeResult;
use super::source::CredentialSource;

// ============================================================================
// Resolution Attempt
// ============================================================================

/// One recorded (candidate, outcome) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionAttempt<T> {
    position: usize,
    source: CredentialSource,
    result: ProbeResult<T>,
}

impl<T> ResolutionAttempt<T> {
    /// 1-based position of the candidate in the input list.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The candidate that was attempted.
    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    /// The probe outcome.
    pub fn result(&self) -> &ProbeResult<T> {
        &self.result
    }

    /// Returns true if this attempt succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    fn log_line(&self) -> String {
        match &self.result {
            ProbeResult::Success { .. } => format!("{}. {}: succeeded", self.position, self.source),
            ProbeResult::Failure { reason } => {
                format!("{}. {}: failed ({reason})", self.position, self.source)
            }
        }
    }
}

// ============================================================================
// Resolution Report
// ============================================================================

/// Ordered record of one resolution pass.
///
/// Attempts appear in candidate order. If a winner exists it is the last
/// attempt and the only successful one. The report carries no timing data,
/// so two resolutions with the same deterministic probe compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionReport<T> {
    attempts: Vec<ResolutionAttempt<T>>,
    #[serde(rename = "winner_index")]
    winner: Option<usize>,
}

impl<T> ResolutionReport<T> {
    /// Starts building a report.
    pub fn builder() -> ReportBuilder<T> {
        ReportBuilder::new()
    }

    /// All recorded attempts, in the order they were made.
    pub fn attempts(&self) -> &[ResolutionAttempt<T>] {
        &self.attempts
    }

    /// 0-based index of the winning attempt, if any.
    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    /// The winning credential source, if any.
    pub fn winner(&self) -> Option<&CredentialSource> {
        self.winner.map(|i| &self.attempts[i].source)
    }

    /// Metadata returned by the winning probe, if any.
    pub fn winning_metadata(&self) -> Option<&T> {
        self.winner.and_then(|i| self.attempts[i].result.metadata())
    }

    /// Returns true if some candidate succeeded.
    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }

    /// Failed attempts with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&CredentialSource, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| a.result.reason().map(|reason| (&a.source, reason)))
    }

    /// One-line overall decision.
    pub fn summary(&self) -> String {
        match self.winner() {
            Some(CredentialSource::CookieFile { path }) => {
                format!("used cookie file {}", path.display())
            }
            Some(CredentialSource::CookieEnv { .. }) => {
                "used cookie from environment".to_string()
            }
            Some(source @ CredentialSource::Proxy { .. }) => format!("used {source}"),
            Some(CredentialSource::None) => "used direct unauthenticated access".to_string(),
            None => "no authentication available, manual intervention needed".to_string(),
        }
    }

    /// Human-readable outcome log, one line per attempt.
    pub fn outcome_log(&self) -> Vec<String> {
        self.attempts.iter().map(ResolutionAttempt::log_line).collect()
    }
}

// ============================================================================
// Report Builder
// ============================================================================

/// Accumulates attempts for a [`ResolutionReport`].
///
/// Recording stops at the first success: once a winner is marked, further
/// calls to [`ReportBuilder::record`] are ignored.
#[derive(Debug)]
pub struct ReportBuilder<T> {
    attempts: Vec<ResolutionAttempt<T>>,
    winner: Option<usize>,
}

impl<T> Default for ReportBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReportBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
            winner: None,
        }
    }

    /// Records one attempt. Returns true if resolution should continue.
    pub fn record(&mut self, source: CredentialSource, result: ProbeResult<T>) -> bool {
        if self.winner.is_some() {
            return false;
        }

        let success = result.is_success();
        self.attempts.push(ResolutionAttempt {
            position: self.attempts.len() + 1,
            source,
            result,
        });

        if success {
            self.winner = Some(self.attempts.len() - 1);
        }
        !success
    }

    /// Finishes the report.
    pub fn finish(self) -> ResolutionReport<T> {
        ResolutionReport {
            attempts: self.attempts,
            winner: self.winner,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
