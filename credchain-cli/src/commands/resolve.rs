//! Resolve command - run the credential chain against a video URL.

use anyhow::Result;
use clap::Args;
use credchain_core::normalize_input;
use credchain_resolve::Resolver;
use credchain_store::Settings;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the resolve command.
#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    /// Video URL, or a base64-encoded URL.
    pub url: String,

    /// Cookie file to try first (overrides configuration).
    #[arg(long, value_name = "PATH")]
    pub cookies: Option<PathBuf>,

    /// Proxy to try (replaces configured proxies).
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Do not fall back to unauthenticated access.
    #[arg(long)]
    pub no_direct: bool,

    /// Per-attempt timeout in seconds (0 disables).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ResolveArgs {
    /// Applies command-line overrides to loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.cookies {
            settings.credentials.cookie_file = Some(path.clone());
        }
        if let Some(proxy) = &self.proxy {
            settings.credentials.https_proxy = Some(proxy.clone());
            settings.credentials.http_proxy = None;
        }
        if self.no_direct {
            settings.credentials.allow_unauthenticated = false;
        }
        if let Some(secs) = self.timeout {
            settings.attempt_timeout_secs = (secs > 0).then_some(secs);
        }
    }
}

/// Runs the resolve command.
pub async fn run(args: &ResolveArgs, cli: &Cli, settings: &Settings) -> Result<ExitCode> {
    let url = normalize_input(&args.url);
    if url != args.url.trim() {
        info!(url = %url, "Decoded base64 input");
    }

    let mut settings = settings.clone();
    args.apply(&mut settings);

    let candidates = settings.credentials.candidates();
    let probe = settings.probe_for(&url);
    if !probe.is_available() {
        warn!(bin = %probe.binary(), "Download tool not found; every attempt will fail");
    }

    info!(url = %url, candidates = candidates.len(), "Resolving credentials");

    let resolver = Resolver::with_settings(settings.resolve_settings());
    let report = resolver.resolve(&candidates, &probe).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_report(&report, &url));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(&report, &url)?);
        }
    }

    Ok(if report.is_resolved() {
        ExitCode::Success
    } else {
        ExitCode::Unresolved
    })
}
