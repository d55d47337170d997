//! Credential configuration and candidate construction.
//!
//! [`CredentialConfig`] is the explicit form of every knob that decides
//! which credential sources get tried. [`CredentialConfig::from_env`] is the
//! only place that reads process environment; everything downstream takes
//! the struct.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use credchain_core::{CookieValue, CredentialSource, mask_proxy_password};

/// Environment variable holding a raw cookie string.
pub const ENV_COOKIES: &str = "CREDCHAIN_COOKIES";
/// Environment variable overriding the cookie file path.
pub const ENV_COOKIE_FILE: &str = "CREDCHAIN_COOKIE_FILE";
/// Environment variables for the HTTP proxy, in lookup order.
pub const ENV_HTTP_PROXY: &[&str] = &["HTTP_PROXY", "http_proxy"];
/// Environment variables for the HTTPS proxy, in lookup order.
pub const ENV_HTTPS_PROXY: &[&str] = &["HTTPS_PROXY", "https_proxy"];

/// Default cookie file name.
pub const DEFAULT_COOKIE_FILE_NAME: &str = "cookies.txt";

/// Returns true for values that mean "not configured".
pub fn is_disabled_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("disabled")
}

/// `cookies.txt` next to the running executable, falling back to the
/// working directory.
pub fn default_cookie_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_COOKIE_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COOKIE_FILE_NAME))
}

fn default_cookie_file_opt() -> Option<PathBuf> {
    Some(default_cookie_file())
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Credential Config
// ============================================================================

/// Where credentials come from.
///
/// The raw cookie string is never persisted; it only arrives through the
/// environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Netscape cookie file to try first.
    #[serde(default = "default_cookie_file_opt")]
    pub cookie_file: Option<PathBuf>,

    /// Raw cookie string.
    #[serde(skip)]
    pub cookie_env: Option<CookieValue>,

    /// HTTP proxy URL.
    #[serde(default)]
    pub http_proxy: Option<String>,

    /// HTTPS proxy URL.
    #[serde(default)]
    pub https_proxy: Option<String>,

    /// Whether to end the chain with a direct unauthenticated attempt.
    #[serde(default = "default_true")]
    pub allow_unauthenticated: bool,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            cookie_file: default_cookie_file_opt(),
            cookie_env: None,
            http_proxy: None,
            https_proxy: None,
            allow_unauthenticated: true,
        }
    }
}

impl CredentialConfig {
    /// Defaults layered with process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overrides fields from an environment lookup. Disabled values
    /// (`""`, `none`, `disabled`) clear the field.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|k| lookup(k));

        if let Some(path) = lookup(ENV_COOKIE_FILE) {
            debug!(var = ENV_COOKIE_FILE, "Cookie file overridden from environment");
            self.cookie_file = (!is_disabled_value(&path)).then(|| PathBuf::from(path.trim()));
        }
        if let Some(value) = lookup(ENV_COOKIES) {
            debug!(var = ENV_COOKIES, "Cookie string found in environment");
            self.cookie_env = (!is_disabled_value(&value)).then(|| CookieValue::new(value.trim()));
        }
        if let Some(url) = first(ENV_HTTP_PROXY) {
            self.http_proxy = (!is_disabled_value(&url)).then(|| url.trim().to_string());
        }
        if let Some(url) = first(ENV_HTTPS_PROXY) {
            self.https_proxy = (!is_disabled_value(&url)).then(|| url.trim().to_string());
        }
    }

    /// Builds the candidate chain in priority order: cookie file, cookie
    /// string, HTTPS proxy, HTTP proxy, then direct access if allowed.
    ///
    /// Disabled values are skipped, an HTTP proxy equal to the HTTPS proxy
    /// is tried once, and unparseable proxy URLs are dropped with a warning.
    pub fn candidates(&self) -> Vec<CredentialSource> {
        let mut candidates = Vec::new();

        if let Some(path) = &self.cookie_file {
            if !is_disabled_value(&path.to_string_lossy()) {
                candidates.push(CredentialSource::cookie_file(path));
            }
        }

        if let Some(value) = &self.cookie_env {
            if !is_disabled_value(value.expose()) {
                candidates.push(CredentialSource::CookieEnv {
                    value: value.clone(),
                });
            }
        }

        for url in [&self.https_proxy, &self.http_proxy].into_iter().flatten() {
            if is_disabled_value(url) {
                continue;
            }
            match CredentialSource::parse_proxy(url) {
                Ok(source) if !candidates.contains(&source) => candidates.push(source),
                Ok(_) => debug!(proxy = %mask_proxy_password(url), "Skipping duplicate proxy"),
                Err(e) => warn!(error = %e, "Ignoring proxy"),
            }
        }

        if self.allow_unauthenticated {
            candidates.push(CredentialSource::None);
        }

        candidates
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use credchain_core::CredentialKind;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn kinds(config: &CredentialConfig) -> Vec<CredentialKind> {
        config.candidates().iter().map(CredentialSource::kind).collect()
    }

    #[test]
    fn test_default_chain_is_file_then_direct() {
        let config = CredentialConfig::default();
        assert!(config.cookie_file.as_ref().unwrap().ends_with("cookies.txt"));
        assert_eq!(kinds(&config), vec![CredentialKind::CookieFile, CredentialKind::None]);
    }

    #[test]
    fn test_full_chain_order() {
        let mut config = CredentialConfig::default();
        config.apply_env(env(&[
            ("CREDCHAIN_COOKIE_FILE", "/srv/cookies.txt"),
            ("CREDCHAIN_COOKIES", "SID=abc"),
            ("HTTPS_PROXY", "http://secure:8443"),
            ("http_proxy", "http://plain:8080"),
        ]));

        let candidates = config.candidates();
        assert_eq!(
            candidates,
            vec![
                CredentialSource::cookie_file("/srv/cookies.txt"),
                CredentialSource::cookie_env("SID=abc"),
                CredentialSource::proxy("http://secure:8443"),
                CredentialSource::proxy("http://plain:8080"),
                CredentialSource::None,
            ]
        );
    }

    #[test]
    fn test_uppercase_proxy_var_wins() {
        let mut config = CredentialConfig::default();
        config.apply_env(env(&[("HTTP_PROXY", "http://upper:1"), ("http_proxy", "http://lower:2")]));
        assert_eq!(config.http_proxy.as_deref(), Some("http://upper:1"));
    }

    #[test]
    fn test_duplicate_proxy_is_tried_once() {
        let config = CredentialConfig {
            cookie_file: None,
            http_proxy: Some("http://p:8080".to_string()),
            https_proxy: Some("http://p:8080".to_string()),
            ..Default::default()
        };
        assert_eq!(kinds(&config), vec![CredentialKind::Proxy, CredentialKind::None]);
    }

    #[test]
    fn test_disabled_values_are_ignored() {
        let mut config = CredentialConfig::default();
        config.apply_env(env(&[
            ("CREDCHAIN_COOKIE_FILE", "none"),
            ("CREDCHAIN_COOKIES", "  "),
            ("HTTP_PROXY", "DISABLED"),
        ]));

        assert_eq!(config.cookie_file, None);
        assert_eq!(config.cookie_env, None);
        assert_eq!(config.http_proxy, None);
        assert_eq!(kinds(&config), vec![CredentialKind::None]);
    }

    #[test]
    fn test_invalid_proxy_is_dropped() {
        let config = CredentialConfig {
            cookie_file: None,
            https_proxy: Some("ftp://p:21".to_string()),
            ..Default::default()
        };
        assert_eq!(kinds(&config), vec![CredentialKind::None]);
    }

    #[test]
    fn test_no_unauthenticated_fallback() {
        let config = CredentialConfig {
            cookie_file: None,
            allow_unauthenticated: false,
            ..Default::default()
        };
        assert!(config.candidates().is_empty());
    }

    #[test]
    fn test_cookie_string_is_not_serialized() {
        let config = CredentialConfig {
            cookie_env: Some(CookieValue::new("SID=secret")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("SID"));
        assert!(!json.contains("cookie_env"));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: CredentialConfig = serde_json::from_str("{}").unwrap();
        assert!(config.cookie_file.is_some());
        assert!(config.allow_unauthenticated);
    }
}
