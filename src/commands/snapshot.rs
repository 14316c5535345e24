//! `corral snapshot`: replace the repository's nightly snapshot release
//!
//! Meant to run as a GitHub Actions step after the build produced
//! `target/<repo>-<version>-bin.{tar.gz,zip}`.

use crate::core::error::CorralResult;
use crate::github::{GithubClient, RepoRef, Tagger};
use crate::snapshot::{self, SnapshotRequest};
use crate::utils::{github_workspace, require_env};
use crate::version::read_version;
use std::path::PathBuf;
use tracing::{info, warn};

/// Run the snapshot command
pub fn run_snapshot(
  token: Option<String>,
  branch: String,
  descriptor: PathBuf,
  tagger_name: String,
  tagger_email: String,
) -> CorralResult<()> {
  let workspace = github_workspace()?;
  let repo = RepoRef::parse(&require_env("GITHUB_REPOSITORY")?)?;

  let tag_name = read_version(&snapshot::descriptor_path(&workspace, &descriptor))?;
  info!(repo = %repo, version = %tag_name, "project version");

  if !snapshot::is_snapshot_tag(&tag_name) {
    warn!(
      version = %tag_name,
      "version does not end with SNAPSHOT; the next run will not replace this release"
    );
  }

  let request = SnapshotRequest {
    repo_name: repo.name.clone(),
    branch,
    tag_name,
    tagger: Tagger {
      name: tagger_name,
      email: tagger_email,
    },
    workspace,
  };

  let client = GithubClient::new(token)?;
  let release = snapshot::replace_snapshot(&client, &repo, &request)?;

  info!(tag = %release.tag_name, assets = release.assets.len(), "snapshot release published");
  if !release.html_url.is_empty() {
    println!("{}", release.html_url);
  }

  Ok(())
}
