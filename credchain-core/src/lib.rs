// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # credchain Core
//!
//! Data model for the credential fallback chain.
//!
//! ## Key Types
//!
//! - [`CredentialSource`] - one way to authenticate (cookie file, cookie
//!   string, proxy, or nothing)
//! - [`ProbeResult`] - outcome of trying one source
//! - [`ResolutionReport`] - ordered record of one resolution pass
//! - [`VideoMetadata`] - what the download tool returns on success
//! - [`NetscapeCookie`] - one line of a cookie file

pub mod cookies;
pub mod error;
pub mod models;

pub use cookies::{NetscapeCookie, netscape_from_header, parse_netscape, validate_netscape};
pub use error::CoreError;
pub use models::{
    // Sources
    CookieValue,
    CredentialKind,
    CredentialSource,
    mask_proxy_password,
    mask_secret,
    // Probe & report
    CANCELLED_REASON,
    ProbeResult,
    ReportBuilder,
    ResolutionAttempt,
    ResolutionReport,
    // Video
    Platform,
    VideoMetadata,
    normalize_input,
};
