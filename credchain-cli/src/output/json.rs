//! JSON output formatting.

use anyhow::Result;
use credchain_core::{CredentialSource, Platform, ResolutionReport, VideoMetadata};
use credchain_store::CookieFileStatus;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one resolution.
#[derive(Debug, Serialize)]
pub struct ReportOutput<'a> {
    pub url: &'a str,
    pub platform: Platform,
    pub resolved: bool,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<&'a CredentialSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<&'a VideoMetadata>,
    pub attempts: Vec<AttemptOutput<'a>>,
}

/// One attempt in a report.
#[derive(Debug, Serialize)]
pub struct AttemptOutput<'a> {
    pub position: usize,
    pub source: &'a CredentialSource,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

/// Cookie status with recommendations.
#[derive(Debug, Serialize)]
pub struct CookieStatusOutput<'a> {
    #[serde(flatten)]
    pub status: &'a CookieFileStatus,
    pub recommendations: &'a [String],
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Converts a report to its output shape.
    pub fn report_output<'a>(
        &self,
        report: &'a ResolutionReport<VideoMetadata>,
        url: &'a str,
    ) -> ReportOutput<'a> {
        ReportOutput {
            url,
            platform: Platform::detect(url),
            resolved: report.is_resolved(),
            summary: report.summary(),
            winner: report.winner(),
            video: report.winning_metadata(),
            attempts: report
                .attempts()
                .iter()
                .map(|a| AttemptOutput {
                    position: a.position(),
                    source: a.source(),
                    success: a.is_success(),
                    reason: a.result().reason(),
                })
                .collect(),
        }
    }

    /// Formats a resolution report.
    pub fn format_report(
        &self,
        report: &ResolutionReport<VideoMetadata>,
        url: &str,
    ) -> Result<String> {
        self.format(&self.report_output(report, url))
    }

    /// Formats cookie status.
    pub fn format_cookie_status(
        &self,
        status: &CookieFileStatus,
        recommendations: &[String],
    ) -> Result<String> {
        self.format(&CookieStatusOutput {
            status,
            recommendations,
        })
    }
}
