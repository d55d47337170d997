//! Persisted settings.
//!
//! Settings live in `<config dir>/credchain/settings.json`. A missing file
//! means defaults; environment variables are layered on top at load time.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use credchain_resolve::{DEFAULT_YTDLP_BIN, ResolveSettings, YtDlpProbe};

use crate::config::CredentialConfig;
use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

/// Environment variable overriding the download tool binary.
pub const ENV_YTDLP_BIN: &str = "CREDCHAIN_YTDLP_BIN";
/// Environment variable overriding the per-attempt timeout in seconds.
pub const ENV_ATTEMPT_TIMEOUT: &str = "CREDCHAIN_ATTEMPT_TIMEOUT";

// ============================================================================
// Log Level
// ============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

fn default_ytdlp_bin() -> String {
    DEFAULT_YTDLP_BIN.to_string()
}

fn default_attempt_timeout() -> Option<u64> {
    Some(60)
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Credential sources.
    #[serde(default)]
    pub credentials: CredentialConfig,

    /// Download tool binary name or path.
    #[serde(default = "default_ytdlp_bin")]
    pub ytdlp_bin: String,

    /// Per-attempt timeout in seconds; `None` waits indefinitely.
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_secs: Option<u64>,

    /// Log level used when not running verbose.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credentials: CredentialConfig::default(),
            ytdlp_bin: default_ytdlp_bin(),
            attempt_timeout_secs: default_attempt_timeout(),
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Loads from the default path, then applies process environment.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self, StoreError> {
        let mut settings = Self::load_from(&default_settings_path()).await?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Loads from `path` without touching the environment. A missing file
    /// yields defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !tokio::fs::try_exists(path).await? {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }

        info!(path = %path.display(), "Loading settings");
        load_json(path).await
    }

    /// Saves to `path` with owner-only permissions.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Layers environment overrides over the loaded values.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.credentials.apply_env(&lookup);

        if let Some(bin) = lookup(ENV_YTDLP_BIN).filter(|b| !b.trim().is_empty()) {
            self.ytdlp_bin = bin.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_ATTEMPT_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.attempt_timeout_secs = None,
                Ok(secs) => self.attempt_timeout_secs = Some(secs),
                Err(e) => warn!(var = ENV_ATTEMPT_TIMEOUT, error = %e, "Ignoring invalid timeout"),
            }
        }
    }

    /// Per-attempt timeout.
    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_secs.map(Duration::from_secs)
    }

    /// Resolver settings derived from these settings.
    pub fn resolve_settings(&self) -> ResolveSettings {
        ResolveSettings {
            attempt_timeout: self.attempt_timeout(),
        }
    }

    /// A yt-dlp probe for `url` using the configured binary.
    pub fn probe_for(&self, url: &str) -> YtDlpProbe {
        YtDlpProbe::new(url).with_binary(self.ytdlp_bin.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
