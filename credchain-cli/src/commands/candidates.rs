//! Candidates command - show the configured credential chain.

use anyhow::Result;
use credchain_store::Settings;

use crate::output::{CandidateLine, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the candidates command.
pub async fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    let mut lines = Vec::new();
    for (index, source) in settings.credentials.candidates().into_iter().enumerate() {
        let available = match source.cookie_path() {
            Some(path) => Some(tokio::fs::try_exists(path).await?),
            None => None,
        };
        lines.push(CandidateLine {
            position: index + 1,
            source,
            available,
        });
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_candidates(&lines));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&lines)?);
        }
    }

    Ok(())
}
