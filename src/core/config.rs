use crate::core::error::{ConfigError, CorralError, CorralResult, ResultExt};
use crate::github::RepoRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://nasa-pds.github.io/pdsen-corral/images";

/// Herd configuration
/// Searched in order: corral.toml, .corral.toml, .config/corral.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HerdConfig {
  #[serde(default)]
  pub shepherd: ShepherdConfig,
  #[serde(default)]
  pub summary: SummaryConfig,
  #[serde(default)]
  pub cattle: Vec<CattleConfig>,
  /// Directory relative paths in the file resolve against
  #[serde(skip)]
  pub base_dir: PathBuf,
}

/// Where the overall build version comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShepherdConfig {
  /// Build descriptor (pom.xml or Cargo.toml) holding the herd's build version
  #[serde(default)]
  pub descriptor: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
  /// Base URL of the `<indicator>_text.png` / `<indicator>_icon.png` images
  #[serde(default = "default_image_base_url")]
  pub image_base_url: String,

  /// Branch used for in-repository links (default: each repository's default branch)
  #[serde(default)]
  pub branch: Option<String>,
}

fn default_image_base_url() -> String {
  DEFAULT_IMAGE_BASE_URL.to_string()
}

impl Default for SummaryConfig {
  fn default() -> Self {
    Self {
      image_base_url: default_image_base_url(),
      branch: None,
    }
  }
}

/// One tracked repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CattleConfig {
  /// `owner/name`
  pub repo: String,
  /// Display name (default: repository name)
  #[serde(default)]
  pub name: Option<String>,
  /// Overrides the repository description
  #[serde(default)]
  pub description: Option<String>,
}

impl CattleConfig {
  #[cfg(test)]
  pub fn new(repo: impl Into<String>) -> Self {
    Self {
      repo: repo.into(),
      name: None,
      description: None,
    }
  }

  pub fn repo_ref(&self) -> CorralResult<RepoRef> {
    RepoRef::parse(&self.repo)
  }

  pub fn display_name(&self) -> String {
    match &self.name {
      Some(name) => name.clone(),
      None => self.repo.rsplit('/').next().unwrap_or(&self.repo).to_string(),
    }
  }
}

impl HerdConfig {
  /// Find config file in search order: corral.toml, .corral.toml, .config/corral.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("corral.toml"),
      path.join(".corral.toml"),
      path.join(".config").join("corral.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load from an explicit file, or search a directory
  pub fn load(path: &Path) -> CorralResult<Self> {
    let config_path = if path.is_file() {
      path.to_path_buf()
    } else {
      Self::find_config_path(path).ok_or_else(|| {
        CorralError::Config(ConfigError::NotFound {
          search_root: path.to_path_buf(),
        })
      })?
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let mut config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;
    config.base_dir = config_path.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok(config)
  }

  /// Parse and validate TOML content
  pub fn parse(content: &str) -> CorralResult<Self> {
    let config: HerdConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Every repository must be `owner/name` and listed once
  pub fn validate(&self) -> CorralResult<()> {
    let mut seen = HashSet::new();
    for cattle in &self.cattle {
      let repo = cattle.repo_ref()?;
      if !seen.insert(repo.to_string().to_lowercase()) {
        return Err(CorralError::Config(ConfigError::DuplicateRepo {
          repo: cattle.repo.clone(),
        }));
      }
    }

    if self.summary.image_base_url.trim().is_empty() {
      return Err(CorralError::Config(ConfigError::MissingField {
        field: "summary.image_base_url".to_string(),
      }));
    }

    Ok(())
  }

  /// Shepherd descriptor path resolved against the config directory
  pub fn shepherd_descriptor(&self) -> Option<PathBuf> {
    self.shepherd.descriptor.as_ref().map(|d| {
      if d.is_absolute() {
        d.clone()
      } else {
        self.base_dir.join(d)
      }
    })
  }
}
