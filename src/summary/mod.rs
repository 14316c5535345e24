//! Software summary document
//!
//! Renders a herd as one fixed-schema table: `tool, version, last updated,
//! description`, then one image-headed column per status indicator. The mode
//! gate runs before anything touches the filesystem, so a summary is never
//! published under a contradictory dev/release label.

pub mod render;

pub use render::{OutputFormat, Table};

use crate::core::config::DEFAULT_IMAGE_BASE_URL;
use crate::core::error::{CorralError, CorralResult, ResultExt};
use crate::herd::{Herd, Indicator};
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

pub const BASE_COLUMNS: [&str; 4] = ["tool", "version", "last updated", "description"];

#[derive(Debug, Clone)]
pub struct SummaryOptions {
  pub dev: bool,
  pub root_dir: PathBuf,
  /// Explicit output path; the dialect's extension is appended if missing
  pub output: Option<PathBuf>,
  pub format: OutputFormat,
  pub image_base_url: String,
}

impl Default for SummaryOptions {
  fn default() -> Self {
    Self {
      dev: false,
      root_dir: PathBuf::from("."),
      output: None,
      format: OutputFormat::default(),
      image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
    }
  }
}

pub fn title(version: &str) -> String {
  format!("Software Summary (build {})", version)
}

/// Header cells: base columns, then `![name](<base>/<name>_text.png)` per indicator
pub fn table_columns(image_base_url: &str) -> Vec<String> {
  let base = image_base_url.trim_end_matches('/');
  BASE_COLUMNS
    .iter()
    .map(|c| c.to_string())
    .chain(
      Indicator::ALL
        .iter()
        .map(|i| format!("![{name}]({base}/{name}_text.png)", name = i.name(), base = base)),
    )
    .collect()
}

/// One row per head, in herd order
pub fn build_table(herd: &Herd, image_base_url: &str) -> Table {
  Table {
    title: title(herd.shepherd_version()),
    columns: table_columns(image_base_url),
    rows: herd
      .cattle_heads()
      .iter()
      .map(|(_, cattle)| cattle.table_row(image_base_url))
      .collect(),
  }
}

/// `<root>/<version>/index.<ext>`, or the explicit path with `.<ext>` ensured
pub fn output_path(root_dir: &Path, output: Option<&Path>, version: &str, extension: &str) -> PathBuf {
  match output {
    Some(path) if path.extension().and_then(|e| e.to_str()) == Some(extension) => path.to_path_buf(),
    Some(path) => {
      let mut name = OsString::from(path.as_os_str());
      name.push(".");
      name.push(extension);
      PathBuf::from(name)
    }
    None => root_dir.join(version).join(format!("index.{}", extension)),
  }
}

/// A build version names a directory under the root: exactly one plain segment
pub fn check_version_segment(version: &str) -> CorralResult<()> {
  let mut components = Path::new(version).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(_)), None) if !version.contains(['/', '\\']) => Ok(()),
    _ => Err(CorralError::with_help(
      format!("Build version '{}' cannot be used as a directory name", version),
      "Versions must not be empty, absolute, or contain path separators or '..'.",
    )),
  }
}

/// Validate the herd's mode, then write the summary; returns the written path
pub fn write_build_summary(herd: &Herd, options: &SummaryOptions) -> CorralResult<PathBuf> {
  let kind = herd.validate_mode(options.dev)?;
  check_version_segment(herd.shepherd_version())?;

  let renderer = options.format.renderer();
  let path = output_path(
    &options.root_dir,
    options.output.as_deref(),
    herd.shepherd_version(),
    renderer.extension(),
  );

  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }

  let document = renderer.render(&build_table(herd, &options.image_base_url));
  fs::write(&path, document).with_context(|| format!("Failed to write {}", path.display()))?;

  info!(path = %path.display(), heads = herd.number_of_heads(), %kind, "wrote build summary");
  Ok(path)
}
