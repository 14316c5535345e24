//! Rolling nightly snapshot releases
//!
//! # Protocol
//!
//! 1. Delete every release whose tag ends with `SNAPSHOT`
//! 2. Tag the tip of the branch with the project's current version
//! 3. Create a release on that tag
//! 4. Upload the `.tar.gz` and `.zip` binary packages from `<workspace>/target`
//!
//! Deletion always completes before creation, so after a successful run the
//! repository carries exactly one snapshot release. There is no rollback: if
//! creation fails after deletion, the repository is left without a snapshot
//! until the next run. Packages are opened only when uploaded, so a missing
//! package leaves a release with fewer than two assets.

use crate::core::error::CorralResult;
use crate::github::{Asset, NewRelease, Release, ReleaseHost, RepoRef, Tagger};
use crate::version::SNAPSHOT_TAG_MARKER;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TAG_MESSAGE: &str = "nightly snapshot";
pub const RELEASE_BODY: &str = "nightly build";

/// One binary package attached to every snapshot release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageKind {
  pub extension: &'static str,
  pub content_type: &'static str,
}

pub const PACKAGES: [PackageKind; 2] = [
  PackageKind {
    extension: "tar.gz",
    content_type: "application/tar+gzip",
  },
  PackageKind {
    extension: "zip",
    content_type: "application/zip",
  },
];

/// Everything needed to cut a snapshot release
#[derive(Debug, Clone)]
pub struct SnapshotRequest {
  pub repo_name: String,
  pub branch: String,
  pub tag_name: String,
  pub tagger: Tagger,
  /// CI workspace containing `target/`
  pub workspace: PathBuf,
}

/// A package resolved on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
  pub file_name: String,
  pub path: PathBuf,
  pub content_type: &'static str,
}

impl SnapshotRequest {
  /// `<workspace>/target/<repo>-<tag>-bin.<ext>` for each package kind
  pub fn package_files(&self) -> Vec<PackageFile> {
    PACKAGES
      .iter()
      .map(|kind| {
        let file_name = format!("{}-{}-bin.{}", self.repo_name, self.tag_name, kind.extension);
        PackageFile {
          path: self.workspace.join("target").join(&file_name),
          file_name,
          content_type: kind.content_type,
        }
      })
      .collect()
  }
}

pub fn is_snapshot_tag(tag_name: &str) -> bool {
  tag_name.ends_with(SNAPSHOT_TAG_MARKER)
}

/// Delete all snapshot releases, returning how many were removed
pub fn delete_snapshot_releases(host: &dyn ReleaseHost, repo: &RepoRef) -> CorralResult<usize> {
  let stale: Vec<Release> = host
    .list_releases(repo)?
    .into_iter()
    .filter(|r| is_snapshot_tag(&r.tag_name))
    .collect();

  for release in &stale {
    host.delete_release(repo, release.id)?;
    info!(repo = %repo, tag = %release.tag_name, id = release.id, "deleted snapshot release");
  }

  if stale.is_empty() {
    info!(repo = %repo, "no snapshot release to delete");
  }

  Ok(stale.len())
}

/// Tag the branch tip, create the release and upload both packages
pub fn create_snapshot_release(
  host: &dyn ReleaseHost,
  repo: &RepoRef,
  request: &SnapshotRequest,
) -> CorralResult<Release> {
  let packages = request.package_files();

  let sha = host.branch_tip(repo, &request.branch)?;
  info!(repo = %repo, branch = %request.branch, %sha, "resolved branch tip");

  host.create_tag(repo, &request.tag_name, TAG_MESSAGE, &sha, "commit", &request.tagger)?;
  info!(repo = %repo, tag = %request.tag_name, "created tag");

  let mut release = host.create_release(
    repo,
    &NewRelease {
      tag_name: request.tag_name.clone(),
      target_commitish: request.branch.clone(),
      name: request.tag_name.clone(),
      body: RELEASE_BODY.to_string(),
      draft: false,
      prerelease: false,
    },
  )?;
  info!(repo = %repo, tag = %release.tag_name, id = release.id, "created release");

  for package in &packages {
    let asset = upload_package(host, repo, &release, package)?;
    release.assets.push(asset);
  }

  Ok(release)
}

fn upload_package(
  host: &dyn ReleaseHost,
  repo: &RepoRef,
  release: &Release,
  package: &PackageFile,
) -> CorralResult<Asset> {
  let asset = host.upload_asset(repo, release, package.content_type, &package.file_name, &package.path)?;
  info!(asset = %asset.name, content_type = %asset.content_type, "uploaded asset");
  Ok(asset)
}

/// Replace the repository's snapshot: delete stale ones, then create the new one
pub fn replace_snapshot(host: &dyn ReleaseHost, repo: &RepoRef, request: &SnapshotRequest) -> CorralResult<Release> {
  let deleted = delete_snapshot_releases(host, repo)?;
  info!(repo = %repo, deleted, "stale snapshots removed");
  create_snapshot_release(host, repo, request)
}

/// Workspace-relative location of the build descriptor
pub fn descriptor_path(workspace: &Path, descriptor: &Path) -> PathBuf {
  if descriptor.is_absolute() {
    descriptor.to_path_buf()
  } else {
    workspace.join(descriptor)
  }
}
