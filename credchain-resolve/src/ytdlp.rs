//! Metadata probe backed by the yt-dlp command-line tool.
//!
//! The probe runs the tool in metadata-only mode with the credential source
//! translated into command-line flags. A zero exit with parseable JSON is a
//! success; everything else becomes a failure reason.

use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use credchain_core::{CredentialSource, ProbeResult, VideoMetadata, netscape_from_header};

use crate::classify::FailureClass;
use crate::error::ProcessError;
use crate::host::process::{ProcessOutput, ProcessRunner};
use crate::probe::CredentialProbe;

/// Default binary name.
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";

/// Flags that make the tool print metadata and exit.
const METADATA_ARGS: &[&str] = &[
    "--dump-json",
    "--skip-download",
    "--no-playlist",
    "--no-warnings",
];

// ============================================================================
// yt-dlp Probe
// ============================================================================

/// Probes one video URL with yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpProbe {
    runner: ProcessRunner,
    binary: String,
    url: String,
    timeout: Option<Duration>,
}

impl YtDlpProbe {
    /// Creates a probe for `url` using the default binary.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            runner: ProcessRunner::new(),
            binary: DEFAULT_YTDLP_BIN.to_string(),
            url: url.into(),
            timeout: None,
        }
    }

    /// Uses a different binary name or path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Bounds each process run.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The URL being probed.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The binary that will be run.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Returns true if the binary can be found.
    pub fn is_available(&self) -> bool {
        self.runner.command_exists(&self.binary)
    }

    /// Builds the full argument list. The URL always follows `--` so it is
    /// never read as an option.
    pub fn build_args(&self, auth: &AuthArgs) -> Vec<String> {
        let mut args: Vec<String> = METADATA_ARGS.iter().map(|a| (*a).to_string()).collect();
        args.extend(auth.args().iter().cloned());
        args.push("--".to_string());
        args.push(self.url.clone());
        args
    }

    fn interpret(&self, output: &ProcessOutput) -> ProbeResult<VideoMetadata> {
        let stdout = match output.stdout_if_success() {
            Ok(stdout) => stdout,
            Err(ProcessError::NonZeroExit { code, stderr }) => {
                let class = FailureClass::from_stderr(&stderr);
                let detail = output
                    .first_stderr_line()
                    .map_or_else(|| format!("exit code {code}"), str::to_string);
                return ProbeResult::failure(format!("{}: {detail}", class.label()));
            }
            Err(e) => return ProbeResult::failure(e.to_string()),
        };

        match VideoMetadata::from_dump_json(stdout, &self.url) {
            Ok(metadata) => ProbeResult::success(metadata),
            Err(e) => ProbeResult::failure(format!("unparseable metadata: {e}")),
        }
    }
}

// ============================================================================
// Auth Args
// ============================================================================

/// Tool flags for one credential source.
///
/// A raw cookie string is written to a temporary cookie file (owner-only
/// permissions) and passed with `--cookies`, keeping the value out of the
/// child's argument list. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct AuthArgs {
    args: Vec<String>,
    cookie_jar: Option<NamedTempFile>,
}

impl AuthArgs {
    /// The flags to pass.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Path of the temporary cookie file, if one was written.
    pub fn cookie_jar_path(&self) -> Option<&Path> {
        self.cookie_jar.as_ref().map(NamedTempFile::path)
    }
}

/// Translates a credential source into tool flags for probing `url`.
///
/// Returns a failure reason when a cookie string cannot be used.
pub fn auth_args(source: &CredentialSource, url: &str) -> Result<AuthArgs, String> {
    let args = match source {
        CredentialSource::CookieFile { path } => {
            vec!["--cookies".to_string(), path.display().to_string()]
        }
        CredentialSource::CookieEnv { value } => {
            let content = netscape_from_header(value.expose(), url).map_err(|e| e.to_string())?;
            let jar = write_cookie_jar(&content)
                .map_err(|e| format!("cannot write temporary cookie file: {e}"))?;
            return Ok(AuthArgs {
                args: vec!["--cookies".to_string(), jar.path().display().to_string()],
                cookie_jar: Some(jar),
            });
        }
        CredentialSource::Proxy { url: proxy } => vec!["--proxy".to_string(), proxy.clone()],
        CredentialSource::None => Vec::new(),
    };
    Ok(AuthArgs {
        args,
        cookie_jar: None,
    })
}

fn write_cookie_jar(content: &str) -> std::io::Result<NamedTempFile> {
    let mut jar = tempfile::Builder::new()
        .prefix("credchain-cookies-")
        .suffix(".txt")
        .tempfile()?;
    jar.write_all(content.as_bytes())?;
    jar.flush()?;
    Ok(jar)
}

#[async_trait]
impl CredentialProbe for YtDlpProbe {
    type Output = VideoMetadata;

    fn name(&self) -> &str {
        "yt-dlp"
    }

    #[instrument(skip_all, fields(kind = %source.kind()))]
    async fn probe(&self, source: &CredentialSource) -> ProbeResult<VideoMetadata> {
        let auth = match auth_args(source, &self.url) {
            Ok(auth) => auth,
            Err(reason) => return ProbeResult::failure(reason),
        };

        let args = self.build_args(&auth);
        match self.runner.run(&self.binary, &args, self.timeout).await {
            Ok(output) => {
                debug!(exit_code = output.exit_code, duration = ?output.duration, "yt-dlp finished");
                self.interpret(&output)
            }
            Err(ProcessError::Timeout(_)) => ProbeResult::cancelled(),
            Err(ProcessError::NotFound(bin)) => {
                ProbeResult::failure(format!("{bin} not found on PATH"))
            }
            Err(e) => ProbeResult::failure(e.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
