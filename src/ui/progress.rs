//! Progress indicator for herd assembly
//!
//! Uses `linya` for a single, allocation-free bar drawn on stderr

use linya::{Bar, Progress};

/// One bar ticking once per fetched repository
pub struct HerdProgress {
  progress: Progress,
  bar: Bar,
}

impl HerdProgress {
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
