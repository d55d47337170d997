//! Video metadata returned by the download tool, plus input normalization.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substrings that mark decoded base64 text as a URL.
const URL_MARKERS: &[&str] = &["http://", "https://", ".com", ".tv", ".net", ".org", ".co"];

// ============================================================================
// Platform
// ============================================================================

/// Video platform a URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// bilibili.com / b23.tv
    Bilibili,
    /// youtube.com / youtu.be
    Youtube,
    /// tiktok.com
    Tiktok,
    /// Anything else.
    #[default]
    Unknown,
}

impl Platform {
    /// Detects the platform from a URL by host substring.
    pub fn detect(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("bilibili.com") || url.contains("b23.tv") {
            Self::Bilibili
        } else if url.contains("youtube.com") || url.contains("youtu.be") {
            Self::Youtube
        } else if url.contains("tiktok.com") {
            Self::Tiktok
        } else {
            Self::Unknown
        }
    }

    /// Cookie domains a cookie file must contain to be useful here.
    pub fn cookie_domains(&self) -> &'static [&'static str] {
        match self {
            Self::Youtube => &["youtube.com", "google.com"],
            Self::Bilibili => &["bilibili.com"],
            Self::Tiktok => &["tiktok.com"],
            Self::Unknown => &[],
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bilibili => "bilibili",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Video Metadata
// ============================================================================

/// Metadata the download tool prints with `--dump-json`.
///
/// Only the fields we report are kept; everything else in the tool's output
/// is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoMetadata {
    /// Video title.
    #[serde(default)]
    pub title: String,
    /// Channel or uploader name.
    #[serde(default)]
    pub uploader: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// View count.
    #[serde(default)]
    pub view_count: Option<u64>,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Upload date as `YYYYMMDD`.
    #[serde(default)]
    pub upload_date: Option<String>,
    /// Canonical page URL.
    #[serde(default)]
    pub webpage_url: Option<String>,
    /// `not_live`, `is_live`, `was_live`, ...
    #[serde(default)]
    pub live_status: Option<String>,
    /// Platform, filled in from the request URL.
    #[serde(default)]
    pub platform: Platform,
}

impl VideoMetadata {
    /// Parses the tool's JSON output and tags it with the platform of `url`.
    ///
    /// A URL that expands to several entries prints one JSON object per
    /// line; the first one is used.
    pub fn from_dump_json(json: &str, url: &str) -> Result<Self, serde_json::Error> {
        let mut metadata: Self = match serde_json::Deserializer::from_str(json)
            .into_iter::<Self>()
            .next()
        {
            Some(first) => first?,
            None => serde_json::from_str(json)?,
        };
        metadata.platform = Platform::detect(url);
        if metadata.webpage_url.is_none() {
            metadata.webpage_url = Some(url.to_string());
        }
        Ok(metadata)
    }

    /// Returns true if the tool reported a live stream.
    pub fn is_live(&self) -> bool {
        self.live_status.as_deref() == Some("is_live")
    }

    /// Duration formatted as `H:MM:SS` or `M:SS`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duration_display(&self) -> Option<String> {
        let total = self.duration?.max(0.0).round() as u64;
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        Some(if h > 0 {
            format!("{h}:{m:02}:{s:02}")
        } else {
            format!("{m}:{s:02}")
        })
    }
}

// ============================================================================
// Input normalization
// ============================================================================

/// Normalizes a user-supplied video reference.
///
/// Base64-encoded URLs are decoded; anything else is returned trimmed.
pub fn normalize_input(input: &str) -> String {
    let trimmed = input.trim();
    decode_base64_url(trimmed).unwrap_or_else(|| trimmed.to_string())
}

fn decode_base64_url(input: &str) -> Option<String> {
    if input.len() < 8 || input.len() % 4 != 0 {
        return None;
    }
    if !input
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
    {
        return None;
    }

    let bytes = STANDARD.decode(input).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let decoded = decoded.trim();

    URL_MARKERS
        .iter()
        .any(|marker| decoded.contains(marker))
        .then(|| decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detect() {
        assert_eq!(Platform::detect("https://www.youtube.com/watch?v=x"), Platform::Youtube);
        assert_eq!(Platform::detect("https://youtu.be/x"), Platform::Youtube);
        assert_eq!(Platform::detect("https://b23.tv/abc"), Platform::Bilibili);
        assert_eq!(Platform::detect("https://www.bilibili.com/video/BV1"), Platform::Bilibili);
        assert_eq!(Platform::detect("https://www.tiktok.com/@u/video/1"), Platform::Tiktok);
        assert_eq!(Platform::detect("https://vimeo.com/1"), Platform::Unknown);
    }

    #[test]
    fn test_normalize_plain_url() {
        assert_eq!(
            normalize_input("  https://youtu.be/abc  "),
            "https://youtu.be/abc"
        );
    }

    #[test]
    fn test_normalize_base64_url() {
        let encoded = STANDARD.encode("https://www.youtube.com/watch?v=abc");
        assert_eq!(normalize_input(&encoded), "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn test_normalize_base64_non_url_is_untouched() {
        // "hello world!" has no URL marker
        let encoded = STANDARD.encode("hello world!");
        assert_eq!(normalize_input(&encoded), encoded);
        assert_eq!(normalize_input("abcd"), "abcd");
    }

    #[test]
    fn test_from_dump_json() {
        let json = r#"{"title":"Demo","uploader":"Chan","duration":125.4,"view_count":42,"id":"abc","formats":[]}"#;
        let meta = VideoMetadata::from_dump_json(json, "https://youtu.be/abc").unwrap();
        assert_eq!(meta.title, "Demo");
        assert_eq!(meta.platform, Platform::Youtube);
        assert_eq!(meta.view_count, Some(42));
        assert_eq!(meta.webpage_url.as_deref(), Some("https://youtu.be/abc"));
        assert_eq!(meta.duration_display().as_deref(), Some("2:05"));
        assert!(!meta.is_live());
    }

    #[test]
    fn test_from_dump_json_takes_first_entry() {
        let json = "{\"title\":\"A\"}\n{\"title\":\"B\"}\n";
        let meta = VideoMetadata::from_dump_json(json, "https://www.youtube.com/playlist?list=x").unwrap();
        assert_eq!(meta.title, "A");
    }

    #[test]
    fn test_from_dump_json_empty_is_error() {
        assert!(VideoMetadata::from_dump_json("  \n", "https://youtu.be/abc").is_err());
    }

    #[test]
    fn test_duration_display_hours() {
        let meta = VideoMetadata {
            duration: Some(3725.0),
            ..Default::default()
        };
        assert_eq!(meta.duration_display().as_deref(), Some("1:02:05"));
    }
}
