//! Output formatting for CLI.

mod json;
mod text;

use credchain_core::{CredentialSource, mask_proxy_password};
use credchain_resolve::ProcessRunner;
use credchain_store::{Settings, default_settings_path};
use serde::Serialize;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// One entry of the configured candidate chain.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateLine {
    /// 1-based position.
    pub position: usize,
    /// The source.
    pub source: CredentialSource,
    /// For cookie files, whether the file currently exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Effective configuration with secrets masked.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigOutput {
    pub settings_file: String,
    pub cookie_file: Option<String>,
    pub cookie_string: Option<String>,
    pub https_proxy: Option<String>,
    pub http_proxy: Option<String>,
    pub allow_unauthenticated: bool,
    pub ytdlp_bin: String,
    pub ytdlp_found: bool,
    pub attempt_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl ConfigOutput {
    /// Builds the masked view of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let credentials = &settings.credentials;
        Self {
            settings_file: default_settings_path().display().to_string(),
            cookie_file: credentials
                .cookie_file
                .as_ref()
                .map(|p| p.display().to_string()),
            cookie_string: credentials.cookie_env.as_ref().map(|v| v.masked()),
            https_proxy: credentials.https_proxy.as_deref().map(mask_proxy_password),
            http_proxy: credentials.http_proxy.as_deref().map(mask_proxy_password),
            allow_unauthenticated: credentials.allow_unauthenticated,
            ytdlp_found: ProcessRunner::new().command_exists(&settings.ytdlp_bin),
            ytdlp_bin: settings.ytdlp_bin.clone(),
            attempt_timeout_secs: settings.attempt_timeout_secs,
            log_level: settings.log_level.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
