//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory holding a herd configuration
pub struct TestHerd {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestHerd {
  /// Herd with no tracked repositories
  pub fn new() -> Result<Self> {
    Self::with_config("[summary]\nimage_base_url = \"https://example.org/images\"\n")
  }

  pub fn with_config(content: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::write(path.join("corral.toml"), content)?;
    Ok(Self { _root: root, path })
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(path)).with_context(|| format!("Failed to read {}", path))
  }
}

/// Base command with the GitHub Actions environment scrubbed
pub fn corral_command(cwd: &Path) -> Command {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_corral"));
  cmd
    .current_dir(cwd)
    .env_remove("GITHUB_WORKSPACE")
    .env_remove("GITHUB_REPOSITORY")
    .env_remove("GITHUB_TOKEN")
    .env_remove("RUST_LOG")
    .env("GITHUB_API_URL", "http://127.0.0.1:9")
    .env("CORRAL_LOG_LEVEL", "warn");
  cmd
}

/// Run corral and return its output whether or not it succeeded
pub fn run_corral(cwd: &Path, args: &[&str]) -> Result<Output> {
  corral_command(cwd).args(args).output().context("Failed to run corral")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
