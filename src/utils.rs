//! Environment helpers for running inside GitHub Actions

use crate::core::error::{ConfigError, CorralError, CorralResult};
use std::env;
use std::path::PathBuf;

/// Value of a required, non-empty environment variable
pub fn require_env(name: &str) -> CorralResult<String> {
  match env::var(name) {
    Ok(value) if !value.trim().is_empty() => Ok(value),
    _ => Err(CorralError::Config(ConfigError::MissingEnv { name: name.to_string() })),
  }
}

/// `GITHUB_WORKSPACE`, the checkout directory of the running workflow
pub fn github_workspace() -> CorralResult<PathBuf> {
  require_env("GITHUB_WORKSPACE").map(PathBuf::from)
}
