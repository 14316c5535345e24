//! Tests for the `summary` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_dev_summary_written_under_version_directory() -> Result<()> {
  let herd = TestHerd::new()?;

  let output = run_corral(&herd.path, &["summary", "--dev", "--build-version", "2.1.0-SNAPSHOT"])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(herd.file_exists("2.1.0-SNAPSHOT/index.md"));
  assert!(stdout(&output).trim_end().ends_with("index.md"));

  let content = herd.read_file("2.1.0-SNAPSHOT/index.md")?;
  assert!(content.starts_with("# Software Summary (build 2.1.0-SNAPSHOT)"));
  assert!(content.contains("| tool | version | last updated | description |"));
  assert!(content.contains("![manual](https://example.org/images/manual_text.png)"));
  assert!(content.contains(":---:"));
  Ok(())
}

#[test]
fn test_dev_summary_rejects_release_version() -> Result<()> {
  let herd = TestHerd::new()?;

  let output = run_corral(&herd.path, &["summary", "--dev", "--build-version", "2.1.0"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(!herd.file_exists("2.1.0"));
  Ok(())
}

#[test]
fn test_release_summary_rejects_snapshot_version() -> Result<()> {
  let herd = TestHerd::new()?;

  let output = run_corral(&herd.path, &["summary", "--build-version", "2.1.0-SNAPSHOT"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(!herd.file_exists("2.1.0-SNAPSHOT"));
  Ok(())
}

#[test]
fn test_release_summary_in_rst() -> Result<()> {
  let herd = TestHerd::new()?;

  let output = run_corral(&herd.path, &["summary", "--build-version", "1.0.0", "--format", "rst"])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let content = herd.read_file("1.0.0/index.rst")?;
  assert!(content.starts_with("Software Summary (build 1.0.0)\n=============================="));
  assert!(content.contains(".. list-table::"));
  assert!(content.contains(":header-rows: 1"));
  Ok(())
}

#[test]
fn test_version_read_from_shepherd_descriptor() -> Result<()> {
  let herd = TestHerd::with_config("[shepherd]\ndescriptor = \"pom.xml\"\n")?;
  herd.write_file(
    "pom.xml",
    r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <artifactId>shepherd</artifactId>
  <version>9.0.0-SNAPSHOT</version>
</project>
"#,
  )?;

  let output = run_corral(&herd.path, &["summary", "--dev"])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(herd.file_exists("9.0.0-SNAPSHOT/index.md"));
  Ok(())
}

#[test]
fn test_explicit_output_gets_extension() -> Result<()> {
  let herd = TestHerd::new()?;

  let output = run_corral(
    &herd.path,
    &["summary", "--build-version", "1.0.0", "--output", "out/summary"],
  )?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(herd.file_exists("out/summary.md"));
  assert!(!herd.file_exists("1.0.0"));
  Ok(())
}

#[test]
fn test_missing_config_is_user_error() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_corral(dir.path(), &["summary", "--build-version", "1.0.0"])?;

  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_duplicate_repository_is_user_error() -> Result<()> {
  let herd = TestHerd::with_config(
    r#"
[[cattle]]
repo = "NASA-PDS/validate"

[[cattle]]
repo = "nasa-pds/Validate"
"#,
  )?;

  let output = run_corral(&herd.path, &["summary", "--build-version", "1.0.0"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!herd.file_exists("1.0.0"));
  Ok(())
}

#[test]
fn test_unknown_format_is_user_error() -> Result<()> {
  let herd = TestHerd::new()?;

  let output = run_corral(&herd.path, &["summary", "--build-version", "1.0.0", "--format", "html"])?;

  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_path_like_version_is_rejected() -> Result<()> {
  let herd = TestHerd::new()?;
  let outside = tempfile::TempDir::new()?;
  let version = format!("{}/escape-SNAPSHOT", outside.path().display());

  let output = run_corral(&herd.path, &["summary", "--dev", "--root-dir", "site", "--build-version", &version])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!outside.path().join("escape-SNAPSHOT").exists());
  assert!(!herd.file_exists("site"));
  Ok(())
}
