//! Download-tool stderr classification.
//!
//! Classification only shapes the failure reason shown to operators. The
//! resolver never branches on it.

use serde::Serialize;
use std::fmt;

/// Coarse category of a download-tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Platform asked to prove the client is not a bot.
    BotDetected,
    /// Content needs a signed-in session.
    SignInRequired,
    /// Cookies were supplied but rejected (rotated, expired, malformed).
    CookiesRejected,
    /// HTTP 429 or similar throttling.
    RateLimited,
    /// The proxy could not be reached.
    ProxyUnreachable,
    /// Other connectivity problems.
    Network,
    /// Video removed, private, or geo-blocked.
    VideoUnavailable,
    /// Anything else.
    Unknown,
}

impl FailureClass {
    /// Classifies tool stderr.
    pub fn from_stderr(stderr: &str) -> Self {
        let stderr = stderr.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| stderr.contains(n));

        if has(&[
            "cookies are no longer valid",
            "cookies have likely been rotated",
            "cookies have expired",
            "failed to load cookies",
            "invalid cookie",
        ]) {
            Self::CookiesRejected
        } else if has(&[
            "confirm you're not a bot",
            "confirm you\u{2019}re not a bot",
            "unusual traffic",
            "bot detection",
        ]) {
            Self::BotDetected
        } else if has(&[
            "sign in to confirm your age",
            "please sign in",
            "login required",
            "members-only",
            "use --cookies",
            "private video",
            "video is private",
        ]) {
            Self::SignInRequired
        } else if has(&["http error 429", "too many requests", "rate limit"]) {
            Self::RateLimited
        } else if has(&["proxy", "tunnel connection failed"]) {
            Self::ProxyUnreachable
        } else if has(&[
            "timed out",
            "connection refused",
            "connection reset",
            "name or service not known",
            "temporary failure in name resolution",
            "network is unreachable",
            "failed to connect",
        ]) {
            Self::Network
        } else if has(&[
            "video unavailable",
            "has been removed",
            "does not exist",
            "not available in your country",
            "http error 404",
        ]) {
            Self::VideoUnavailable
        } else {
            Self::Unknown
        }
    }

    /// Stable label used as the failure reason prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BotDetected => "bot detected",
            Self::SignInRequired => "sign-in required",
            Self::CookiesRejected => "cookies rejected",
            Self::RateLimited => "rate limited",
            Self::ProxyUnreachable => "proxy unreachable",
            Self::Network => "network error",
            Self::VideoUnavailable => "video unavailable",
            Self::Unknown => "download tool failed",
        }
    }

    /// Returns true if better credentials might change the outcome.
    pub fn is_auth_related(&self) -> bool {
        matches!(
            self,
            Self::BotDetected | Self::SignInRequired | Self::CookiesRejected
        )
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
