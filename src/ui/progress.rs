//! Progress indicators for long-running operations
//!
//! Uses `linya`, which draws to stderr and stays quiet when stderr is not a
//! terminal, so CI logs are not flooded with redraws.

use linya::{Bar, Progress};

/// Progress bar over the artifacts of one run
pub struct ArtifactProgress {
  progress: Progress,
  bar: Bar,
}

impl ArtifactProgress {
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
