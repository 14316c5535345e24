//! Core building blocks shared by every command
//!
//! - **config**: herd configuration (corral.toml) parsing and validation
//! - **error**: error taxonomy with exit codes and help messages
//! - **logging**: one-time `tracing` subscriber setup

pub mod config;
pub mod error;
pub mod logging;
