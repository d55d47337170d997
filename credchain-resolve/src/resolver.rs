//! Credential fallback resolver.
//!
//! The resolver walks a caller-ordered candidate list, tries each source
//! against a probe, and stops at the first success. Every attempt is
//! recorded in the returned [`ResolutionReport`].

use std::path::Path;
use tracing::{debug, info, instrument, warn};

use credchain_core::{CredentialSource, ProbeResult, ResolutionReport};

use crate::context::ResolveSettings;
use crate::error::ResolveError;
use crate::probe::CredentialProbe;

// ============================================================================
// Resolver
// ============================================================================

/// Runs the credential fallback chain.
///
/// Holds no mutable state; one resolver can serve concurrent resolutions.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    settings: ResolveSettings,
}

impl Resolver {
    /// Creates a resolver with default settings (no attempt timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with custom settings.
    pub fn with_settings(settings: ResolveSettings) -> Self {
        Self { settings }
    }

    /// Returns the resolver settings.
    pub fn settings(&self) -> &ResolveSettings {
        &self.settings
    }

    /// Tries `candidates` in order until one succeeds.
    ///
    /// Candidates are never reordered or deduplicated. A `CookieFile`
    /// candidate whose file cannot be opened is recorded as a failure
    /// without invoking the probe. Exhausting every candidate is not an
    /// error: the report simply has no winner.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EmptyCandidateList`] if `candidates` is empty.
    #[instrument(skip_all, fields(candidates = candidates.len(), probe = probe.name()))]
    pub async fn resolve<P>(
        &self,
        candidates: &[CredentialSource],
        probe: &P,
    ) -> Result<ResolutionReport<P::Output>, ResolveError>
    where
        P: CredentialProbe + ?Sized,
    {
        if candidates.is_empty() {
            warn!("Refusing to resolve an empty candidate list");
            return Err(ResolveError::EmptyCandidateList);
        }

        let mut report = ResolutionReport::builder();

        for (index, source) in candidates.iter().enumerate() {
            let position = index + 1;
            let kind = source.kind();

            info!("attempting configuration {position}: {kind}");

            let result = self.attempt(source, probe).await;

            match &result {
                ProbeResult::Success { .. } => {
                    info!("configuration {position} ({kind}) succeeded");
                }
                ProbeResult::Failure { reason } => {
                    warn!(reason = %reason, "configuration {position} ({kind}) failed");
                }
            }

            if !report.record(source.clone(), result) {
                break;
            }
        }

        let report = report.finish();
        if !report.is_resolved() {
            warn!(
                attempts = report.attempts().len(),
                "No credential configuration succeeded"
            );
        }

        Ok(report)
    }

    /// Runs one attempt, including the cookie file check and timeout.
    async fn attempt<P>(&self, source: &CredentialSource, probe: &P) -> ProbeResult<P::Output>
    where
        P: CredentialProbe + ?Sized,
    {
        if let Some(path) = source.cookie_path() {
            if let Err(reason) = check_cookie_file(path).await {
                return ProbeResult::failure(reason);
            }
            info!(path = %path.display(), "Using cookie file");
        }

        match self.settings.attempt_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, probe.probe(source)).await {
                Ok(result) => result,
                Err(_) => {
                    debug!(timeout = ?timeout, "Probe attempt timed out");
                    ProbeResult::cancelled()
                }
            },
            None => probe.probe(source).await,
        }
    }
}

/// Checks that a cookie file exists, is a regular file, and can be opened.
async fn check_cookie_file(path: &Path) -> Result<(), String> {
    let unreadable = |e: std::io::Error| {
        format!("cookie file {} is not readable: {e}", path.display())
    };

    let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
    if !metadata.is_file() {
        return Err(format!("cookie file {} is not a regular file", path.display()));
    }
    tokio::fs::File::open(path).await.map_err(unreadable)?;
    Ok(())
}

/// Resolves `candidates` with default settings.
///
/// # Errors
///
/// Returns [`ResolveError::EmptyCandidateList`] if `candidates` is empty.
pub async fn resolve<P>(
    candidates: &[CredentialSource],
    probe: &P,
) -> Result<ResolutionReport<P::Output>, ResolveError>
where
    P: CredentialProbe + ?Sized,
{
    Resolver::new().resolve(candidates, probe).await
}

// ============================================================================
// Tests
// ============================================================================
