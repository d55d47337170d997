//! Cookies command - manage the cookie file.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use credchain_core::Platform;
use credchain_store::{CookieFileStore, Settings, default_cookie_file};
use std::path::{Path, PathBuf};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the cookies command.
#[derive(Args)]
pub struct CookiesArgs {
    #[command(subcommand)]
    pub action: CookiesAction,
}

/// Cookies subcommands.
#[derive(Subcommand)]
pub enum CookiesAction {
    /// Inspect the cookie file.
    Status,

    /// Validate and install a Netscape cookie file, backing up the current one.
    Install {
        /// File exported from a browser.
        file: PathBuf,

        /// Domain the file must contain cookies for (repeatable).
        /// Defaults to the YouTube domains.
        #[arg(long = "domain", value_name = "DOMAIN")]
        domains: Vec<String>,

        /// Accept cookies for any domain.
        #[arg(long, conflicts_with = "domains")]
        any_domain: bool,
    },

    /// Restore the cookie file from its backup.
    Restore,

    /// Delete the cookie file and its backup.
    Delete,
}

/// Runs the cookies command.
pub async fn run(args: &CookiesArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let path = settings
        .credentials
        .cookie_file
        .clone()
        .unwrap_or_else(default_cookie_file);
    let store = CookieFileStore::new(path);

    match &args.action {
        CookiesAction::Status => status(&store, cli).await,
        CookiesAction::Install {
            file,
            domains,
            any_domain,
        } => install(&store, file, domains, *any_domain, cli).await,
        CookiesAction::Restore => {
            store.restore().await?;
            report(cli, "Restored", &store, serde_json::json!({ "restored": true }))
        }
        CookiesAction::Delete => {
            let outcome = store.delete().await?;
            let message = if outcome.cookie_file || outcome.backup {
                "Deleted"
            } else {
                "Nothing to delete at"
            };
            report(cli, message, &store, serde_json::to_value(outcome)?)
        }
    }
}

/// Domains an installed file must cover.
fn required_domains(domains: &[String], any_domain: bool) -> Vec<&str> {
    if any_domain {
        Vec::new()
    } else if domains.is_empty() {
        Platform::Youtube.cookie_domains().to_vec()
    } else {
        domains.iter().map(String::as_str).collect()
    }
}

async fn status(store: &CookieFileStore, cli: &Cli) -> Result<()> {
    let status = store.status().await?;
    let recommendations = status.recommendations();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_cookie_status(&status, &recommendations));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_cookie_status(&status, &recommendations)?);
        }
    }
    Ok(())
}

async fn install(
    store: &CookieFileStore,
    file: &Path,
    domains: &[String],
    any_domain: bool,
    cli: &Cli,
) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let outcome = store
        .install(&content, &required_domains(domains, any_domain))
        .await?;

    let message = if outcome.backed_up {
        format!("Installed {} cookies (previous file backed up) to", outcome.cookie_count)
    } else {
        format!("Installed {} cookies to", outcome.cookie_count)
    };
    report(cli, &message, store, serde_json::to_value(outcome)?)
}

fn report(cli: &Cli, message: &str, store: &CookieFileStore, json: serde_json::Value) -> Result<()> {
    if cli.quiet {
        return Ok(());
    }
    match cli.format {
        OutputFormat::Text => println!("{message} {}", store.path().display()),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&json)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_domains() {
        assert_eq!(required_domains(&[], false), vec!["youtube.com", "google.com"]);
        assert!(required_domains(&[], true).is_empty());
        assert_eq!(
            required_domains(&["bilibili.com".to_string()], false),
            vec!["bilibili.com"]
        );
    }
}
