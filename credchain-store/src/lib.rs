// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # credchain Store
//!
//! Configuration and cookie file management.
//!
//! - **CredentialConfig**: explicit credential knobs and candidate chain
//! - **Settings**: persisted JSON settings with environment overrides
//! - **CookieFileStore**: install / status / backup / restore of the cookie file
//! - **Persistence**: JSON file helpers
//!
//! ## Usage
//!
//! ```ignore
//! use credchain_store::Settings;
//! use credchain_resolve::Resolver;
//!
//! let settings = Settings::load().await?;
//! let candidates = settings.credentials.candidates();
//! let probe = settings.probe_for("https://youtu.be/abc");
//! let report = Resolver::with_settings(settings.resolve_settings())
//!     .resolve(&candidates, &probe)
//!     .await?;
//! ```

pub mod config;
pub mod cookie_store;
pub mod error;
pub mod persistence;
pub mod settings;

pub use config::{CredentialConfig, default_cookie_file, is_disabled_value};
pub use cookie_store::{CookieFileStatus, CookieFileStore, DeleteOutcome, InstallOutcome};
pub use error::StoreError;
pub use persistence::{default_config_dir, default_settings_path, load_json, save_json};
pub use settings::{LogLevel, Settings};
