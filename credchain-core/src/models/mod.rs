//! Domain models for credchain.
//!
//! - [`source`] - credential sources and secret masking
//! - [`probe`] - probe outcomes
//! - [`report`] - resolution reports
//! - [`video`] - video metadata and input normalization

mod probe;
mod report;
mod source;
mod video;

pub use probe::{CANCELLED_REASON, ProbeResult};
pub use report::{ReportBuilder, ResolutionAttempt, ResolutionReport};
pub use source::{CookieValue, CredentialKind, CredentialSource, mask_proxy_password, mask_secret};
pub use video::{Platform, VideoMetadata, normalize_input};
