//! Probe trait.
//!
//! A probe is the external operation a credential source is tried against,
//! for example "fetch video metadata". The resolver treats it as opaque.

use async_trait::async_trait;
use credchain_core::{CredentialSource, ProbeResult};

// ============================================================================
// Credential Probe Trait
// ============================================================================

/// An operation that attempts real use of one credential source.
///
/// ## Implementing a Probe
///
/// ```ignore
/// struct TitleProbe { url: String }
///
/// #[async_trait]
/// impl CredentialProbe for TitleProbe {
///     type Output = String;
///
///     async fn probe(&self, source: &CredentialSource) -> ProbeResult<String> {
///         match fetch_title(&self.url, source).await {
///             Ok(title) => ProbeResult::success(title),
///             Err(e) => ProbeResult::failure(e.to_string()),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait CredentialProbe: Send + Sync {
    /// Metadata returned on success.
    type Output: Send;

    /// Short name used in log fields.
    fn name(&self) -> &str {
        "probe"
    }

    /// Attempts the operation with `source`.
    ///
    /// Failures are returned as [`ProbeResult::Failure`]; a probe never
    /// aborts the resolution.
    async fn probe(&self, source: &CredentialSource) -> ProbeResult<Self::Output>;
}

// ============================================================================
// Closure Probe
// ============================================================================

/// Adapts a synchronous closure into a [`CredentialProbe`].
pub struct FnProbe<F> {
    f: F,
}

impl<F> FnProbe<F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> std::fmt::Debug for FnProbe<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProbe").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, T> CredentialProbe for FnProbe<F>
where
    F: Fn(&CredentialSource) -> ProbeResult<T> + Send + Sync,
    T: Send,
{
    type Output = T;

    fn name(&self) -> &str {
        "fn"
    }

    async fn probe(&self, source: &CredentialSource) -> ProbeResult<T> {
        (self.f)(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_probe() {
        let probe = FnProbe::new(|source: &CredentialSource| match source {
            CredentialSource::None => ProbeResult::success("direct"),
            _ => ProbeResult::failure("rejected"),
        });

        assert_eq!(
            probe.probe(&CredentialSource::None).await,
            ProbeResult::success("direct")
        );
        assert_eq!(
            probe.probe(&CredentialSource::proxy("http://p:8080")).await,
            ProbeResult::failure("rejected")
        );
    }
}
