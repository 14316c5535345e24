//! Tests for the `snapshot` command
//!
//! Only local preconditions and an unreachable API are exercised; no case
//! gets a response from GitHub.

use crate::helpers::*;
use anyhow::Result;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <artifactId>validate</artifactId>
  <version>2.1.0-SNAPSHOT</version>
</project>
"#;

#[test]
fn test_missing_workspace_env() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = corral_command(dir.path())
    .env("GITHUB_REPOSITORY", "NASA-PDS/validate")
    .arg("snapshot")
    .output()?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("GITHUB_WORKSPACE"));
  Ok(())
}

#[test]
fn test_missing_repository_env() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = corral_command(dir.path())
    .env("GITHUB_WORKSPACE", dir.path())
    .arg("snapshot")
    .output()?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("GITHUB_REPOSITORY"));
  Ok(())
}

#[test]
fn test_invalid_repository_slug() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = corral_command(dir.path())
    .env("GITHUB_WORKSPACE", dir.path())
    .env("GITHUB_REPOSITORY", "validate")
    .arg("snapshot")
    .output()?;

  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_missing_descriptor() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = corral_command(dir.path())
    .env("GITHUB_WORKSPACE", dir.path())
    .env("GITHUB_REPOSITORY", "NASA-PDS/validate")
    .arg("snapshot")
    .output()?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("pom.xml"));
  Ok(())
}

#[test]
fn test_unreachable_api_is_system_error() -> Result<()> {
  let herd = TestHerd::with_config("")?;
  herd.write_file("pom.xml", POM)?;

  let output = corral_command(&herd.path)
    .env("GITHUB_WORKSPACE", &herd.path)
    .env("GITHUB_REPOSITORY", "NASA-PDS/validate")
    .arg("snapshot")
    .output()?;

  assert_eq!(output.status.code(), Some(2));
  Ok(())
}
