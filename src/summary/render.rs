//! Table renderers
//!
//! Both dialects consume the same [`Table`]; picking one changes syntax only.

use crate::core::error::CorralError;
use std::fmt::Write as _;
use std::str::FromStr;

/// Column/row data shared by every renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
  pub title: String,
  pub columns: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

pub trait TableRenderer {
  /// File extension of the produced document, without the dot
  fn extension(&self) -> &'static str;

  fn render(&self, table: &Table) -> String;
}

/// Markdown heading plus a centered pipe table
pub struct MarkdownRenderer;

/// reStructuredText title plus a `list-table` directive
pub struct RstRenderer;

impl TableRenderer for MarkdownRenderer {
  fn extension(&self) -> &'static str {
    "md"
  }

  fn render(&self, table: &Table) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", table.title);
    out.push('\n');

    let line = |cells: &[String]| {
      let escaped: Vec<String> = cells
        .iter()
        .map(|c| c.replace('|', "\\|").replace('\n', " "))
        .collect();
      format!("| {} |\n", escaped.join(" | "))
    };

    out.push_str(&line(&table.columns));
    let align: Vec<String> = table.columns.iter().map(|_| ":---:".to_string()).collect();
    out.push_str(&line(&align));
    for row in &table.rows {
      out.push_str(&line(&padded(row, table.columns.len())));
    }

    out
  }
}

impl TableRenderer for RstRenderer {
  fn extension(&self) -> &'static str {
    "rst"
  }

  fn render(&self, table: &Table) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", table.title);
    let _ = writeln!(out, "{}", "=".repeat(table.title.chars().count()));
    out.push('\n');
    out.push_str(".. list-table::\n");
    out.push_str("   :header-rows: 1\n");
    out.push('\n');

    let mut row_block = |cells: &[String]| {
      for (i, cell) in cells.iter().enumerate() {
        let bullet = if i == 0 { "   * -" } else { "     -" };
        let cell = cell.replace('\n', " ");
        if cell.is_empty() {
          let _ = writeln!(out, "{}", bullet);
        } else {
          let _ = writeln!(out, "{} {}", bullet, cell);
        }
      }
    };

    row_block(&table.columns);
    for row in &table.rows {
      row_block(&padded(row, table.columns.len()));
    }

    out
  }
}

/// Rows shorter than the header get blank trailing cells
fn padded(row: &[String], width: usize) -> Vec<String> {
  let mut cells = row.to_vec();
  cells.resize(width.max(row.len()), String::new());
  cells
}

/// Output dialect selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
  #[default]
  Markdown,
  Rst,
}

impl OutputFormat {
  pub fn renderer(self) -> Box<dyn TableRenderer> {
    match self {
      OutputFormat::Markdown => Box::new(MarkdownRenderer),
      OutputFormat::Rst => Box::new(RstRenderer),
    }
  }
}

impl FromStr for OutputFormat {
  type Err = CorralError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "md" | "markdown" => Ok(OutputFormat::Markdown),
      "rst" => Ok(OutputFormat::Rst),
      other => Err(CorralError::with_help(
        format!("Unknown summary format '{}'", other),
        "Use --format md or --format rst",
      )),
    }
  }
}
