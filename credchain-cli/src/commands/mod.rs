//! CLI command implementations.

pub mod candidates;
pub mod config;
pub mod cookies;
pub mod resolve;
