//! Progress indicators for slow checks
//!
//! Uses `linya`, which draws on stderr so the checklist on stdout stays clean

use linya::{Bar, Progress};

/// Progress bar for loading a batch of files
pub struct FileProgress {
  progress: Progress,
  bar: Bar,
}

impl FileProgress {
  /// Create a new progress bar over `total` files
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Only worth drawing for more than one file
  pub fn for_batch(total: usize, label: impl Into<String>) -> Option<Self> {
    (total > 1).then(|| Self::new(total, label))
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
