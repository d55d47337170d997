//! Resolver settings.

use std::time::Duration;

/// Settings for a [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSettings {
    /// Upper bound for a single probe attempt. An attempt that runs longer
    /// is recorded as cancelled and the next candidate is tried.
    pub attempt_timeout: Option<Duration>,
}

impl ResolveSettings {
    /// Settings with a per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        assert_eq!(ResolveSettings::default().attempt_timeout, None);
        let settings = ResolveSettings::default().with_timeout(Duration::from_secs(5));
        assert_eq!(settings.attempt_timeout, Some(Duration::from_secs(5)));
    }
}
