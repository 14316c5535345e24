//! In-memory release host for unit tests

use super::{Asset, NewRelease, Release, ReleaseHost, RepoInfo, RepoRef, TagRef, Tagger, open_asset};
use crate::core::error::{CorralError, CorralResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
  pub tag: String,
  pub message: String,
  pub object_sha: String,
  pub object_type: String,
  pub tagger: Tagger,
}

#[derive(Default)]
pub struct FakeHost {
  pub releases: RefCell<Vec<Release>>,
  pub branches: HashMap<String, String>,
  pub repos: HashMap<String, RepoInfo>,
  pub repo_releases: HashMap<String, Vec<Release>>,
  pub files: Vec<String>,
  pub tags: RefCell<Vec<CreatedTag>>,
  /// Every call in order, e.g. `delete:3`
  pub calls: RefCell<Vec<String>>,
  next_id: RefCell<u64>,
}

impl FakeHost {
  pub fn new() -> Self {
    Self {
      next_id: RefCell::new(1000),
      ..Default::default()
    }
  }

  pub fn with_branch(mut self, branch: &str, sha: &str) -> Self {
    self.branches.insert(branch.to_string(), sha.to_string());
    self
  }

  pub fn with_release(self, id: u64, tag: &str) -> Self {
    self.releases.borrow_mut().push(release(id, tag));
    self
  }

  pub fn with_repo(mut self, slug: &str, info: RepoInfo, releases: Vec<Release>) -> Self {
    self.repos.insert(slug.to_string(), info);
    self.repo_releases.insert(slug.to_string(), releases);
    self
  }

  pub fn with_file(mut self, slug: &str, branch: &str, path: &str) -> Self {
    self.files.push(format!("{}@{}:{}", slug, branch, path));
    self
  }

  pub fn snapshot_tags(&self) -> Vec<String> {
    self
      .releases
      .borrow()
      .iter()
      .filter(|r| r.tag_name.ends_with("SNAPSHOT"))
      .map(|r| r.tag_name.clone())
      .collect()
  }

  fn record(&self, call: String) {
    self.calls.borrow_mut().push(call);
  }
}

pub fn release(id: u64, tag: &str) -> Release {
  Release {
    id,
    tag_name: tag.to_string(),
    target_commitish: "master".to_string(),
    name: Some(tag.to_string()),
    body: None,
    draft: false,
    prerelease: false,
    published_at: None,
    html_url: format!("https://github.com/o/r/releases/tag/{}", tag),
    upload_url: String::new(),
    assets: Vec::new(),
  }
}

pub fn repo_info(name: &str) -> RepoInfo {
  RepoInfo {
    name: name.to_string(),
    description: Some(format!("The {} tool", name)),
    html_url: format!("https://github.com/NASA-PDS/{}", name),
    homepage: None,
    default_branch: "master".to_string(),
    license: None,
    has_issues: false,
    pushed_at: None,
  }
}

impl ReleaseHost for FakeHost {
  fn list_releases(&self, repo: &RepoRef) -> CorralResult<Vec<Release>> {
    self.record(format!("list:{}", repo));
    if let Some(releases) = self.repo_releases.get(&repo.to_string()) {
      return Ok(releases.clone());
    }
    Ok(self.releases.borrow().clone())
  }

  fn delete_release(&self, _repo: &RepoRef, release_id: u64) -> CorralResult<()> {
    self.record(format!("delete:{}", release_id));
    let mut releases = self.releases.borrow_mut();
    let before = releases.len();
    releases.retain(|r| r.id != release_id);
    if releases.len() == before {
      return Err(CorralError::not_found(format!("release {}", release_id)));
    }
    Ok(())
  }

  fn branch_tip(&self, repo: &RepoRef, branch: &str) -> CorralResult<String> {
    self.record(format!("branch:{}", branch));
    self
      .branches
      .get(branch)
      .cloned()
      .ok_or_else(|| CorralError::not_found(format!("branch {} of {}", branch, repo)))
  }

  fn create_tag(
    &self,
    repo: &RepoRef,
    tag: &str,
    message: &str,
    object_sha: &str,
    object_type: &str,
    tagger: &Tagger,
  ) -> CorralResult<TagRef> {
    self.record(format!("tag:{}", tag));
    if self.tags.borrow().iter().any(|t| t.tag == tag) {
      return Err(CorralError::rejected(
        format!("create tag {} on {}", tag, repo),
        Some(422),
        "Reference already exists",
      ));
    }
    self.tags.borrow_mut().push(CreatedTag {
      tag: tag.to_string(),
      message: message.to_string(),
      object_sha: object_sha.to_string(),
      object_type: object_type.to_string(),
      tagger: tagger.clone(),
    });
    Ok(TagRef {
      tag: tag.to_string(),
      sha: format!("tag-{}", object_sha),
    })
  }

  fn create_release(&self, _repo: &RepoRef, new: &NewRelease) -> CorralResult<Release> {
    self.record(format!("release:{}", new.tag_name));
    let id = {
      let mut next = self.next_id.borrow_mut();
      *next += 1;
      *next
    };
    let mut created = release(id, &new.tag_name);
    created.target_commitish = new.target_commitish.clone();
    created.name = Some(new.name.clone());
    created.body = Some(new.body.clone());
    self.releases.borrow_mut().push(created.clone());
    Ok(created)
  }

  fn upload_asset(
    &self,
    _repo: &RepoRef,
    release: &Release,
    content_type: &str,
    file_name: &str,
    file: &Path,
  ) -> CorralResult<Asset> {
    self.record(format!("upload:{}", file_name));
    open_asset(file)?;
    let asset = Asset {
      name: file_name.to_string(),
      content_type: content_type.to_string(),
    };
    let mut releases = self.releases.borrow_mut();
    let target = releases
      .iter_mut()
      .find(|r| r.id == release.id)
      .ok_or_else(|| CorralError::not_found(format!("release {}", release.id)))?;
    target.assets.push(asset.clone());
    Ok(asset)
  }

  fn repository(&self, repo: &RepoRef) -> CorralResult<RepoInfo> {
    self.record(format!("repo:{}", repo));
    self
      .repos
      .get(&repo.to_string())
      .cloned()
      .ok_or_else(|| CorralError::not_found(format!("repository {}", repo)))
  }

  fn file_exists(&self, repo: &RepoRef, branch: &str, path: &str) -> CorralResult<bool> {
    Ok(self.files.contains(&format!("{}@{}:{}", repo, branch, path)))
  }
}
