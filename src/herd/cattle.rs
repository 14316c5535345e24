//! Per-repository status record

use crate::core::config::CattleConfig;
use crate::core::error::CorralResult;
use crate::github::{Release, ReleaseHost, RepoRef};
use crate::version::{VersionKind, classify};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

/// Status indicators shown as columns of the summary, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
  Manual,
  Changelog,
  Requirements,
  Download,
  License,
  Feedback,
}

impl Indicator {
  pub const ALL: [Indicator; 6] = [
    Indicator::Manual,
    Indicator::Changelog,
    Indicator::Requirements,
    Indicator::Download,
    Indicator::License,
    Indicator::Feedback,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Indicator::Manual => "manual",
      Indicator::Changelog => "changelog",
      Indicator::Requirements => "requirements",
      Indicator::Download => "download",
      Indicator::License => "license",
      Indicator::Feedback => "feedback",
    }
  }

  fn index(self) -> usize {
    self as usize
  }
}

impl fmt::Display for Indicator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cattle {
  pub repo: RepoRef,
  pub name: String,
  pub html_url: String,
  /// Tag of the latest release matching the run's mode
  pub version: Option<String>,
  pub updated: Option<DateTime<Utc>>,
  pub description: String,
  links: [Option<String>; 6],
}

impl Cattle {
  pub fn new(repo: RepoRef, name: impl Into<String>, html_url: impl Into<String>) -> Self {
    Self {
      repo,
      name: name.into(),
      html_url: html_url.into(),
      version: None,
      updated: None,
      description: String::new(),
      links: Default::default(),
    }
  }

  /// Herd key
  pub fn id(&self) -> String {
    self.repo.to_string()
  }

  pub fn link(&self, indicator: Indicator) -> Option<&str> {
    self.links[indicator.index()].as_deref()
  }

  pub fn set_link(&mut self, indicator: Indicator, link: Option<String>) {
    self.links[indicator.index()] = link.filter(|l| !l.trim().is_empty());
  }

  /// Query the host for one repository's status
  pub fn fetch(
    host: &dyn ReleaseHost,
    config: &CattleConfig,
    mode: VersionKind,
    branch_override: Option<&str>,
  ) -> CorralResult<Self> {
    let repo = config.repo_ref()?;
    let info = host.repository(&repo)?;
    let releases = host.list_releases(&repo)?;
    let release = select_release(&releases, mode);
    let branch = branch_override.unwrap_or(&info.default_branch).to_string();

    let mut cattle = Cattle::new(repo.clone(), config.display_name(), info.html_url.clone());
    cattle.version = release.map(|r| r.tag_name.clone());
    cattle.updated = release.and_then(|r| r.published_at).or(info.pushed_at);
    cattle.description = config
      .description
      .clone()
      .or_else(|| info.description.clone())
      .unwrap_or_default();

    let blob = |path: &str| format!("{}/blob/{}/{}", info.html_url, branch, path);

    cattle.set_link(Indicator::Manual, info.homepage.clone());

    if host.file_exists(&repo, &branch, "CHANGELOG.md")? {
      cattle.set_link(Indicator::Changelog, Some(blob("CHANGELOG.md")));
    }

    if let Some(version) = &cattle.version {
      let path = format!("docs/requirements/{}/REQUIREMENTS.md", version);
      if host.file_exists(&repo, &branch, &path)? {
        cattle.set_link(Indicator::Requirements, Some(blob(&path)));
      }
    }

    cattle.set_link(Indicator::Download, release.map(|r| r.html_url.clone()));

    if info.license.is_some() {
      cattle.set_link(Indicator::License, Some(blob("LICENSE.md")));
    }

    if info.has_issues {
      cattle.set_link(Indicator::Feedback, Some(format!("{}/issues", info.html_url)));
    }

    debug!(repo = %repo, version = ?cattle.version, "fetched cattle");
    Ok(cattle)
  }

  /// Summary row cells, aligned with the summary column schema
  pub fn table_row(&self, image_base_url: &str) -> Vec<String> {
    let mut row = vec![
      format!("[{}]({})", self.name, self.html_url),
      self.version.clone().unwrap_or_default(),
      self.updated.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
      self.description.clone(),
    ];

    for indicator in Indicator::ALL {
      row.push(match self.link(indicator) {
        Some(link) => format!(
          "[![{name}]({base}/{name}_icon.png)]({link})",
          name = indicator.name(),
          base = image_base_url.trim_end_matches('/'),
          link = link
        ),
        None => String::new(),
      });
    }

    row
  }
}

/// Most recently published, non-draft release whose tag matches `mode`
pub fn select_release(releases: &[Release], mode: VersionKind) -> Option<&Release> {
  releases
    .iter()
    .filter(|r| !r.draft)
    .filter(|r| match mode {
      VersionKind::Development => classify(&r.tag_name).is_dev(),
      VersionKind::Release => !r.prerelease && !classify(&r.tag_name).is_dev(),
    })
    .max_by_key(|r| r.published_at)
}
