//! Text output formatting with colors.

use chrono::Local;
use credchain_core::{Platform, ResolutionReport, VideoMetadata};
use credchain_store::CookieFileStatus;

use super::{CandidateLine, ConfigOutput};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

const OK_MARK: &str = "✓";
const FAIL_MARK: &str = "✗";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a resolution report.
    pub fn format_report(&self, report: &ResolutionReport<VideoMetadata>, url: &str) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {}",
            self.bold(url),
            self.dim(&format!("({})", Platform::detect(url)))
        ));

        for attempt in report.attempts() {
            let line = match attempt.result().reason() {
                None => format!(
                    "  {}. {} {}",
                    attempt.position(),
                    self.green(OK_MARK),
                    attempt.source()
                ),
                Some(reason) => format!(
                    "  {}. {} {}: {}",
                    attempt.position(),
                    self.red(FAIL_MARK),
                    attempt.source(),
                    self.dim(reason)
                ),
            };
            lines.push(line);
        }

        let summary = report.summary();
        if report.is_resolved() {
            lines.push(format!("Result: {}", self.bold(&summary)));
        } else {
            lines.push(format!("Result: {}", self.red(&summary)));
        }

        if let Some(meta) = report.winning_metadata() {
            lines.push(String::new());
            lines.extend(self.format_video(meta));
        }

        lines.join("\n")
    }

    /// Formats the metadata block for a video.
    fn format_video(&self, meta: &VideoMetadata) -> Vec<String> {
        let mut lines = vec![format!("Title:    {}", self.cyan(&meta.title))];
        if let Some(uploader) = &meta.uploader {
            lines.push(format!("Uploader: {uploader}"));
        }
        if let Some(duration) = meta.duration_display() {
            let live = if meta.is_live() { " (live)" } else { "" };
            lines.push(format!("Duration: {duration}{live}"));
        }
        if let Some(views) = meta.view_count {
            lines.push(format!("Views:    {views}"));
        }
        if let Some(date) = &meta.upload_date {
            lines.push(format!("Uploaded: {date}"));
        }
        lines
    }

    /// Formats the configured candidate chain.
    pub fn format_candidates(&self, candidates: &[CandidateLine]) -> String {
        if candidates.is_empty() {
            return self.yellow("No candidates configured; resolution will fail");
        }

        candidates
            .iter()
            .map(|line| {
                let note = match line.available {
                    Some(true) => format!(" {}", self.green("(present)")),
                    Some(false) => format!(" {}", self.yellow("(missing)")),
                    None => String::new(),
                };
                format!("{}. {}{note}", line.position, line.source)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats cookie file status with recommendations.
    pub fn format_cookie_status(
        &self,
        status: &CookieFileStatus,
        recommendations: &[String],
    ) -> String {
        let mut lines = vec![format!("Cookie file: {}", self.bold(&status.path.display().to_string()))];

        lines.push(format!("  Exists:        {}", self.yes_no(status.exists)));
        if status.exists {
            lines.push(format!("  Size:          {} bytes", status.file_size));
            if let Some(modified) = status.last_modified {
                lines.push(format!(
                    "  Last modified: {}",
                    modified.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                ));
            }
            lines.push(format!("  Readable:      {}", self.yes_no(status.is_readable)));
            let expired = if status.expired_count > 0 {
                format!(" ({})", self.yellow(&format!("{} expired", status.expired_count)))
            } else {
                String::new()
            };
            lines.push(format!("  Cookies:       {}{expired}", status.cookie_count));
        }
        lines.push(format!(
            "  Backup:        {}",
            if status.backup_exists { "present" } else { "none" }
        ));

        if !recommendations.is_empty() {
            lines.push(String::new());
            lines.push("Recommendations:".to_string());
            for advice in recommendations {
                lines.push(format!("  • {advice}"));
            }
        }

        lines.join("\n")
    }

    /// Formats the effective configuration.
    pub fn format_config(&self, config: &ConfigOutput) -> String {
        let unset = self.dim("not set");
        let or_unset = |value: &Option<String>| value.clone().unwrap_or_else(|| unset.clone());

        let timeout = config
            .attempt_timeout_secs
            .map_or_else(|| "none".to_string(), |s| format!("{s}s"));
        let ytdlp = if config.ytdlp_found {
            config.ytdlp_bin.clone()
        } else {
            format!("{} {}", config.ytdlp_bin, self.red("(not found)"))
        };

        [
            self.bold("credchain configuration"),
            "─".repeat(40),
            format!("Settings file:   {}", config.settings_file),
            format!("Cookie file:     {}", or_unset(&config.cookie_file)),
            format!("Cookie string:   {}", or_unset(&config.cookie_string)),
            format!("HTTPS proxy:     {}", or_unset(&config.https_proxy)),
            format!("HTTP proxy:      {}", or_unset(&config.http_proxy)),
            format!(
                "Direct access:   {}",
                if config.allow_unauthenticated { "allowed" } else { "disabled" }
            ),
            format!("yt-dlp:          {ytdlp}"),
            format!("Attempt timeout: {timeout}"),
            format!("Log level:       {}", config.log_level),
        ]
        .join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn yes_no(&self, value: bool) -> String {
        if value { self.green("yes") } else { self.red("no") }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
