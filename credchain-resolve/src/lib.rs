// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # credchain Resolve
//!
//! Ordered credential fallback for requests against video platforms.
//!
//! ## Resolver
//!
//! - [`Resolver`] / [`resolve`] - try candidates in order, stop at the
//!   first success, return a [`ResolutionReport`](credchain_core::ResolutionReport)
//! - [`CredentialProbe`] - the operation each candidate is tried against
//! - [`FnProbe`] - closure adapter for simple probes
//!
//! ## yt-dlp
//!
//! - [`YtDlpProbe`] - metadata probe running the download tool
//! - [`FailureClass`] - stderr classification for failure reasons
//! - [`host::process`] - subprocess execution
//!
//! ## Example
//!
//! ```ignore
//! use credchain_core::CredentialSource;
//! use credchain_resolve::{resolve, YtDlpProbe};
//!
//! let candidates = vec![
//!     CredentialSource::cookie_file("cookies.txt"),
//!     CredentialSource::None,
//! ];
//! let probe = YtDlpProbe::new("https://youtu.be/abc");
//! let report = resolve(&candidates, &probe).await?;
//! println!("{}", report.summary());
//! ```

pub mod classify;
pub mod context;
pub mod error;
pub mod host;
pub mod probe;
pub mod resolver;
pub mod ytdlp;

pub use classify::FailureClass;
pub use context::ResolveSettings;
pub use error::{ProcessError, ResolveError};
pub use host::{ProcessOutput, ProcessRunner};
pub use probe::{CredentialProbe, FnProbe};
pub use resolver::{Resolver, resolve};
pub use ytdlp::{AuthArgs, DEFAULT_YTDLP_BIN, YtDlpProbe, auth_args};
