//! Herd aggregation
//!
//! A herd is the ordered collection of per-repository status records (cattle) for
//! one summary run, plus the shepherd version: the build version of the whole
//! multi-repository release. The herd lives for a single invocation and is never
//! persisted; its only destination is the rendered summary.

pub mod cattle;

pub use cattle::{Cattle, Indicator};

use crate::core::config::HerdConfig;
use crate::core::error::{ConfigError, CorralError, CorralResult};
use crate::github::ReleaseHost;
use crate::version::{self, VersionKind};
use tracing::{debug, info};

/// How a herd is built
#[derive(Debug, Clone, Default)]
pub struct HerdOptions {
  /// Development summary (snapshot builds) instead of release summary
  pub dev: bool,
  /// Explicit shepherd version, bypassing the shepherd descriptor
  pub version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Herd {
  heads: Vec<(String, Cattle)>,
  shepherd_version: String,
}

impl Herd {
  pub fn new(shepherd_version: impl Into<String>) -> Self {
    Self {
      heads: Vec::new(),
      shepherd_version: shepherd_version.into(),
    }
  }

  /// Fetch one cattle per configured repository, in configuration order
  ///
  /// The shepherd version is resolved and checked against the requested mode
  /// before any repository is queried. `on_head` is called after each fetch.
  pub fn build(
    config: &HerdConfig,
    options: &HerdOptions,
    host: &dyn ReleaseHost,
    on_head: &mut dyn FnMut(&Cattle),
  ) -> CorralResult<Self> {
    let shepherd_version = resolve_shepherd_version(config, options)?;
    info!(version = %shepherd_version, "build version");
    let mode = version::validate_mode(options.dev, &shepherd_version)?;
    if let Some(marker) = version::dev_marker(&shepherd_version) {
      debug!(toolchain = marker.toolchain, "development build");
    }

    let mut herd = Herd::new(shepherd_version);
    for entry in &config.cattle {
      let cattle = Cattle::fetch(host, entry, mode, config.summary.branch.as_deref())?;
      on_head(&cattle);
      herd.insert(cattle);
    }

    info!(heads = herd.number_of_heads(), "herd assembled");
    Ok(herd)
  }

  /// Append a head; an existing id is replaced in place
  pub fn insert(&mut self, cattle: Cattle) {
    let id = cattle.id();
    match self.heads.iter_mut().find(|(key, _)| *key == id) {
      Some(slot) => slot.1 = cattle,
      None => self.heads.push((id, cattle)),
    }
  }

  /// Heads in insertion order
  pub fn cattle_heads(&self) -> &[(String, Cattle)] {
    &self.heads
  }

  #[cfg(test)]
  pub fn get(&self, id: &str) -> Option<&Cattle> {
    self.heads.iter().find(|(key, _)| key == id).map(|(_, c)| c)
  }

  pub fn number_of_heads(&self) -> usize {
    self.heads.len()
  }

  pub fn shepherd_version(&self) -> &str {
    &self.shepherd_version
  }

  /// Override the shepherd version without touching the descriptor
  #[cfg(test)]
  pub fn set_shepherd_version(&mut self, version: impl Into<String>) {
    self.shepherd_version = version.into();
  }

  /// Classification of the shepherd version if it matches the requested mode
  pub fn validate_mode(&self, dev: bool) -> CorralResult<VersionKind> {
    version::validate_mode(dev, &self.shepherd_version)
  }
}

/// Explicit override first, otherwise the configured shepherd descriptor
pub fn resolve_shepherd_version(config: &HerdConfig, options: &HerdOptions) -> CorralResult<String> {
  if let Some(version) = &options.version {
    return Ok(version.clone());
  }

  let descriptor = config.shepherd_descriptor().ok_or_else(|| {
    CorralError::Config(ConfigError::MissingField {
      field: "shepherd.descriptor (or pass --build-version)".to_string(),
    })
  })?;
  version::read_version(&descriptor)
}
