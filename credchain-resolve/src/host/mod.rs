//! Host APIs used by probes.
//!
//! - [`process`] - Subprocess execution for the download tool

pub mod process;

pub use process::{ProcessOutput, ProcessRunner};
