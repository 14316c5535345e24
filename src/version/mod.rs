//! Version classification
//!
//! Version strings are opaque. The only thing corral reads out of them is whether
//! they denote a development build, which every supported toolchain marks with a
//! suffix of its own. The marker registry lives here so a new toolchain family is
//! a one-line addition that no call site needs to know about.

pub mod descriptor;

pub use descriptor::read_version;

use crate::core::error::{CorralError, CorralResult};
use std::fmt;

/// Development-build marker for one toolchain family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevMarker {
  pub toolchain: &'static str,
  pub suffix: &'static str,
}

/// Every recognized development marker
pub const DEV_MARKERS: &[DevMarker] = &[
  DevMarker {
    toolchain: "maven",
    suffix: "-SNAPSHOT",
  },
  DevMarker {
    toolchain: "python",
    suffix: ".dev",
  },
];

/// Tag suffix identifying a rolling snapshot release
pub const SNAPSHOT_TAG_MARKER: &str = "SNAPSHOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
  Development,
  Release,
}

impl VersionKind {
  pub fn is_dev(self) -> bool {
    matches!(self, VersionKind::Development)
  }

  /// Kind a caller asks for with a `--dev` style flag
  pub fn requested(dev: bool) -> Self {
    if dev { VersionKind::Development } else { VersionKind::Release }
  }
}

impl fmt::Display for VersionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionKind::Development => write!(f, "development"),
      VersionKind::Release => write!(f, "release"),
    }
  }
}

/// First registered development marker found in `version`
pub fn dev_marker(version: &str) -> Option<&'static DevMarker> {
  DEV_MARKERS.iter().find(|m| version.contains(m.suffix))
}

/// Classify a version string. Total over any input.
pub fn classify(version: &str) -> VersionKind {
  match dev_marker(version) {
    Some(_) => VersionKind::Development,
    None => VersionKind::Release,
  }
}

/// Reject a build version whose classification contradicts the requested mode
pub fn validate_mode(dev: bool, version: &str) -> CorralResult<VersionKind> {
  let requested = VersionKind::requested(dev);
  let actual = classify(version);

  if requested != actual {
    return Err(CorralError::ModeMismatch {
      requested,
      actual,
      version: version.to_string(),
    });
  }

  Ok(actual)
}
