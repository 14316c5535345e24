//! Release host abstraction
//!
//! Everything corral does remotely goes through [`ReleaseHost`]: listing and
//! deleting releases, tagging a branch tip, creating a release, uploading assets,
//! and the read-only repository probes used to build a herd. [`GithubClient`]
//! implements it over the GitHub REST API; tests use an in-memory host.

pub mod client;

#[cfg(test)]
pub mod fake;

pub use client::GithubClient;

use crate::core::error::{ConfigError, CorralError, CorralResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// `owner/name` repository reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
  pub owner: String,
  pub name: String,
}

impl RepoRef {
  pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      name: name.into(),
    }
  }

  /// Parse `owner/name` (as found in `GITHUB_REPOSITORY`)
  pub fn parse(slug: &str) -> CorralResult<Self> {
    match slug.trim().split_once('/') {
      Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
        Ok(Self::new(owner, name))
      }
      _ => Err(CorralError::Config(ConfigError::InvalidRepo { repo: slug.to_string() })),
    }
  }
}

impl fmt::Display for RepoRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

/// Identity recorded on annotated tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagger {
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
  pub name: String,
  pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
  pub id: u64,
  pub tag_name: String,
  #[serde(default)]
  pub target_commitish: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default)]
  pub draft: bool,
  #[serde(default)]
  pub prerelease: bool,
  #[serde(default)]
  pub published_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub html_url: String,
  #[serde(default)]
  pub upload_url: String,
  #[serde(default)]
  pub assets: Vec<Asset>,
}

/// Annotated tag object as created on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
  pub tag: String,
  pub sha: String,
}

/// Release creation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
  pub tag_name: String,
  pub target_commitish: String,
  pub name: String,
  pub body: String,
  pub draft: bool,
  pub prerelease: bool,
}

/// Repository metadata used for a herd summary row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoInfo {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub html_url: String,
  #[serde(default)]
  pub homepage: Option<String>,
  #[serde(default = "default_branch")]
  pub default_branch: String,
  #[serde(default)]
  pub license: Option<License>,
  #[serde(default)]
  pub has_issues: bool,
  #[serde(default)]
  pub pushed_at: Option<DateTime<Utc>>,
}

fn default_branch() -> String {
  "main".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct License {
  #[serde(default)]
  pub spdx_id: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
}

/// Open a file about to be uploaded; a missing file is `NotFound`
pub fn open_asset(path: &Path) -> CorralResult<File> {
  File::open(path).map_err(|e| match e.kind() {
    io::ErrorKind::NotFound => CorralError::not_found(format!("release asset {}", path.display())),
    _ => CorralError::from(e).context(format!("Failed to open asset {}", path.display())),
  })
}

/// Operations corral needs from a repository host
///
/// All calls block until complete. Failures surface as `NotFound` or
/// `RemoteRejected` and are never retried here.
pub trait ReleaseHost {
  /// Every release of the repository, newest first
  fn list_releases(&self, repo: &RepoRef) -> CorralResult<Vec<Release>>;

  fn delete_release(&self, repo: &RepoRef, release_id: u64) -> CorralResult<()>;

  /// SHA of the branch tip; `NotFound` for an unknown branch
  fn branch_tip(&self, repo: &RepoRef, branch: &str) -> CorralResult<String>;

  /// Create an annotated tag object and its `refs/tags/<tag>` reference
  fn create_tag(
    &self,
    repo: &RepoRef,
    tag: &str,
    message: &str,
    object_sha: &str,
    object_type: &str,
    tagger: &Tagger,
  ) -> CorralResult<TagRef>;

  fn create_release(&self, repo: &RepoRef, release: &NewRelease) -> CorralResult<Release>;

  fn upload_asset(
    &self,
    repo: &RepoRef,
    release: &Release,
    content_type: &str,
    file_name: &str,
    file: &Path,
  ) -> CorralResult<Asset>;

  fn repository(&self, repo: &RepoRef) -> CorralResult<RepoInfo>;

  /// Whether `path` exists on `branch`
  fn file_exists(&self, repo: &RepoRef, branch: &str, path: &str) -> CorralResult<bool>;
}
