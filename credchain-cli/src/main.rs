// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! credchain CLI - find which credentials a video platform accepts.
//!
//! # Examples
//!
//! ```bash
//! # Try the configured credential chain against a video
//! credchain resolve https://www.youtube.com/watch?v=abc
//!
//! # Force a cookie file and a proxy, never fall back to direct access
//! credchain resolve URL --cookies ./cookies.txt --proxy http://p:8080 --no-direct
//!
//! # JSON report
//! credchain --format json --pretty resolve URL
//!
//! # Show the chain the current configuration builds
//! credchain candidates
//!
//! # Manage the cookie file
//! credchain cookies install ~/Downloads/cookies.txt
//! credchain cookies status
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use credchain_store::{LogLevel, Settings};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{candidates, config, cookies, resolve};

// ============================================================================
// CLI Definition
// ============================================================================

/// credchain CLI - ordered credential fallback for video metadata.
#[derive(Parser)]
#[command(name = "credchain")]
#[command(about = "Find which credentials a video platform accepts")]
#[command(long_about = r"
credchain tries authentication configurations in order until one works:

  1. Netscape cookie file (cookies.txt next to the binary by default)
  2. Raw cookie string from CREDCHAIN_COOKIES
  3. HTTPS_PROXY, then HTTP_PROXY
  4. Direct, unauthenticated access

Examples:
  credchain resolve https://youtu.be/abc     # Run the chain
  credchain candidates                       # Show the chain
  credchain cookies status                   # Inspect the cookie file
  credchain --format json resolve URL        # JSON report
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logs, minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Try each credential configuration against a video URL.
    #[command(visible_alias = "r")]
    Resolve(resolve::ResolveArgs),

    /// Show the candidate chain built from the current configuration.
    #[command(visible_alias = "c")]
    Candidates,

    /// Manage the cookie file.
    Cookies(cookies::CookiesArgs),

    /// Show configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Every credential configuration failed.
    Unresolved = 2,
}

impl Cli {
    /// Whether text output should use ANSI colors.
    pub fn use_colors(&self) -> bool {
        !self.no_color
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("credchain=debug,info")
    } else {
        EnvFilter::new(format!("credchain={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = Settings::load().await;
    let level = loaded.as_ref().map(|s| s.log_level).unwrap_or_default();
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match loaded {
        Ok(settings) => run(&cli, &settings).await,
        Err(e) => Err(anyhow::Error::new(e).context("failed to load settings")),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::Error
        }
    };

    std::process::exit(code as i32);
}

async fn run(cli: &Cli, settings: &Settings) -> Result<ExitCode> {
    match &cli.command {
        Commands::Resolve(args) => resolve::run(args, cli, settings).await,
        Commands::Candidates => candidates::run(cli, settings).await.map(|()| ExitCode::Success),
        Commands::Cookies(args) => cookies::run(args, cli, settings).await.map(|()| ExitCode::Success),
        Commands::Config(args) => config::run(args, cli, settings).map(|()| ExitCode::Success),
    }
}
