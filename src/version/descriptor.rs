//! Build descriptor version lookup
//!
//! Reads the project version out of the file a build toolchain keeps it in:
//! - Maven `pom.xml`: `/pom:project/pom:version`
//! - Cargo `Cargo.toml`: `package.version`

use crate::core::error::{CorralError, CorralResult, ResultExt};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
pub const POM_VERSION_PATH: &str = "/pom:project/pom:version";

/// Supported descriptor formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
  Maven,
  Cargo,
}

impl DescriptorKind {
  /// Detect the descriptor format from its file name
  pub fn detect(path: &Path) -> CorralResult<Self> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    match file_name {
      "Cargo.toml" => Ok(DescriptorKind::Cargo),
      name if name == "pom.xml" || name.ends_with(".xml") => Ok(DescriptorKind::Maven),
      _ => Err(CorralError::with_help(
        format!("Unsupported build descriptor: {}", path.display()),
        "Use a Maven pom.xml or a Cargo.toml",
      )),
    }
  }
}

/// Read the version declared by a build descriptor
pub fn read_version(path: &Path) -> CorralResult<String> {
  let kind = DescriptorKind::detect(path)?;
  if !path.is_file() {
    return Err(CorralError::not_found(format!("build descriptor {}", path.display())));
  }

  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let version = match kind {
    DescriptorKind::Maven => maven_version(&content),
    DescriptorKind::Cargo => cargo_version(&content),
  }
  .with_context(|| format!("in {}", path.display()))?;

  debug!(descriptor = %path.display(), %version, "read build version");
  Ok(version)
}

/// Extract `/pom:project/pom:version`
pub fn maven_version(content: &str) -> CorralResult<String> {
  let doc = roxmltree::Document::parse(content)?;
  select_text(&doc, POM_VERSION_PATH, &[("pom", POM_NAMESPACE)])
}

/// Extract `package.version`; workspace-inherited versions are not resolved
pub fn cargo_version(content: &str) -> CorralResult<String> {
  let doc: toml_edit::DocumentMut = content.parse()?;
  doc
    .get("package")
    .and_then(|p| p.get("version"))
    .and_then(|v| v.as_str())
    .map(str::to_string)
    .ok_or_else(|| CorralError::not_found("package.version"))
}

/// Evaluate an absolute, child-only path such as `/pom:project/pom:version`
///
/// Each step is `prefix:local` with `prefix` bound in `namespaces`, or a bare
/// local name matching elements without a namespace. The text of the first
/// matching element is returned, trimmed.
pub fn select_text(doc: &roxmltree::Document, path: &str, namespaces: &[(&str, &str)]) -> CorralResult<String> {
  let not_found = || CorralError::not_found(format!("XML path {}", path));

  let mut steps = Vec::new();
  for step in path.trim_start_matches('/').split('/') {
    let (namespace, local) = match step.split_once(':') {
      Some((prefix, local)) => {
        let uri = namespaces
          .iter()
          .find(|(p, _)| *p == prefix)
          .map(|(_, uri)| *uri)
          .ok_or_else(|| CorralError::message(format!("Unbound namespace prefix '{}' in {}", prefix, path)))?;
        (Some(uri), local)
      }
      None => (None, step),
    };
    steps.push((namespace, local));
  }

  let (first, rest) = steps.split_first().ok_or_else(not_found)?;
  let mut current = doc.root_element();
  if !element_matches(current, *first) {
    return Err(not_found());
  }

  for step in rest {
    current = current.children().find(|child| element_matches(*child, *step)).ok_or_else(not_found)?;
  }

  current
    .text()
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_string)
    .ok_or_else(not_found)
}

fn element_matches(node: roxmltree::Node<'_, '_>, (namespace, local): (Option<&str>, &str)) -> bool {
  node.is_element() && node.tag_name().name() == local && node.tag_name().namespace() == namespace
}
