//! Netscape cookie file parsing.
//!
//! The format is one cookie per line, tab-separated:
//! `domain  include_subdomains  path  secure  expires  name  value`.
//! Lines starting with `#` are comments, except the `#HttpOnly_` prefix
//! that browsers put in front of the domain of HTTP-only cookies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use url::Url;

use crate::error::CoreError;
use crate::models::{Platform, mask_secret};

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Minimum number of tab-separated fields for a cookie line. Some exporters
/// drop the trailing empty value.
const MIN_FIELDS: usize = 6;

/// One cookie line from a Netscape cookie file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetscapeCookie {
    /// Cookie domain, without the `#HttpOnly_` prefix.
    pub domain: String,
    /// Whether subdomains match.
    pub include_subdomains: bool,
    /// Cookie path.
    pub path: String,
    /// Secure-only flag.
    pub secure: bool,
    /// Expiry as Unix seconds; 0 for session cookies.
    pub expires: i64,
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    #[serde(serialize_with = "serialize_masked")]
    pub value: String,
    /// Whether the line carried the `#HttpOnly_` prefix.
    pub http_only: bool,
}

fn serialize_masked<S: serde::Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&mask_secret(value))
}

impl NetscapeCookie {
    /// Parses one line. Returns `None` for comments, blanks and short lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None if line.starts_with('#') => return None,
            None => (line, false),
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            domain: fields[0].trim().to_string(),
            include_subdomains: fields[1].eq_ignore_ascii_case("TRUE"),
            path: fields[2].to_string(),
            secure: fields[3].eq_ignore_ascii_case("TRUE"),
            expires: fields[4].trim().parse().unwrap_or(0),
            name: fields[5].to_string(),
            value: fields.get(6).map(|v| (*v).to_string()).unwrap_or_default(),
            http_only,
        })
    }

    /// Returns true for session cookies.
    pub fn is_session(&self) -> bool {
        self.expires <= 0
    }

    /// Returns true if the cookie had expired at `now`. Session cookies
    /// never expire by this check.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_session() && self.expires < now.timestamp()
    }

    /// Returns true if the cookie domain matches `domain` or a subdomain of it.
    pub fn matches_domain(&self, domain: &str) -> bool {
        let own = self.domain.trim_start_matches('.').to_lowercase();
        let wanted = domain.trim_start_matches('.').to_lowercase();
        own == wanted || own.ends_with(&format!(".{wanted}"))
    }
}

/// Parses every cookie line in `content`.
pub fn parse_netscape(content: &str) -> Vec<NetscapeCookie> {
    content.lines().filter_map(NetscapeCookie::parse_line).collect()
}

/// Checks that `content` looks like a Netscape cookie file.
///
/// When `required_domains` is non-empty at least one cookie must belong to
/// one of them. Returns the parsed cookies.
pub fn validate_netscape(
    content: &str,
    required_domains: &[&str],
) -> Result<Vec<NetscapeCookie>, CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::InvalidCookieFile("file is empty".to_string()));
    }

    let cookies = parse_netscape(content);
    if cookies.is_empty() {
        return Err(CoreError::InvalidCookieFile(
            "no tab-separated cookie lines found".to_string(),
        ));
    }

    if !required_domains.is_empty()
        && !cookies
            .iter()
            .any(|c| required_domains.iter().any(|d| c.matches_domain(d)))
    {
        return Err(CoreError::InvalidCookieFile(format!(
            "no cookies for {}",
            required_domains.join(" or ")
        )));
    }

    Ok(cookies)
}

/// Converts a raw `Cookie:` header value into Netscape cookie file content
/// scoped to the domains of `url`.
///
/// Known platforms get their cookie domains; anything else gets the URL host.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCookieValue`] for empty values, values with
/// tabs or line breaks, values without `name=value` pairs, or when no domain
/// can be derived from `url`.
pub fn netscape_from_header(header: &str, url: &str) -> Result<String, CoreError> {
    if header.trim().is_empty() {
        return Err(CoreError::InvalidCookieValue("is empty"));
    }
    if header.contains(['\t', '\r', '\n']) {
        return Err(CoreError::InvalidCookieValue("contains a tab or line break"));
    }

    let pairs: Vec<(&str, &str)> = header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .collect();
    if pairs.is_empty() {
        return Err(CoreError::InvalidCookieValue("has no name=value pairs"));
    }

    let mut domains: Vec<String> = Platform::detect(url)
        .cookie_domains()
        .iter()
        .map(|d| (*d).to_string())
        .collect();
    if domains.is_empty() {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .ok_or(CoreError::InvalidCookieValue("has no domain to apply to"))?;
        domains.push(host.trim_start_matches("www.").to_string());
    }

    let mut content = String::from("# Netscape HTTP Cookie File\n");
    for domain in &domains {
        for (name, value) in &pairs {
            content.push_str(&format!(".{domain}\tTRUE\t/\tFALSE\t0\t{name}\t{value}\n"));
        }
    }
    Ok(content)
}
