//! Check runner for executing a checklist
//!
//! Steps run strictly in order. The first failing step is reported and ends the
//! run; nothing after it is invoked or printed.

use super::step::{CheckResult, CheckStep};
use crate::core::error::{CheckError, DoctorResult};
use std::io::Write;
use std::time::{Duration, Instant};

const RULE: &str = "==================================================";

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
  NotStarted,
  Running,
  Completed,
  Failed,
}

/// Returned when every step succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
  pub completed: usize,
  pub elapsed: Duration,
}

/// Runs an ordered checklist, fail-fast
pub struct CheckRunner<'a> {
  steps: Vec<CheckStep<'a>>,
  title: Option<String>,
  banner: String,
  guidance: Vec<String>,
  state: RunState,
}

impl<'a> CheckRunner<'a> {
  /// Create a runner over `steps`; order is preserved
  pub fn new(steps: Vec<CheckStep<'a>>) -> Self {
    Self {
      steps,
      title: None,
      banner: "All checks passed!".to_string(),
      guidance: Vec::new(),
      state: RunState::NotStarted,
    }
  }

  /// Heading printed before the first step
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  /// Line printed once every step has passed
  pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
    self.banner = banner.into();
    self
  }

  /// "Next steps" printed after the banner
  pub fn with_guidance(mut self, guidance: Vec<String>) -> Self {
    self.guidance = guidance;
    self
  }

  #[allow(dead_code)] // Read by tests; the binary only needs the returned result
  pub fn state(&self) -> RunState {
    self.state
  }

  /// Run every step in order, writing progress lines to `out`.
  ///
  /// Returns `CheckError::StepFailed` for the first failing step after its
  /// failure report has been written.
  pub fn run(&mut self, out: &mut impl Write) -> DoctorResult<RunSummary> {
    self.state = RunState::NotStarted;
    self.validate()?;

    let started = Instant::now();
    self.state = RunState::Running;

    if let Some(ref title) = self.title {
      writeln!(out, "🔍 {}", title)?;
      writeln!(out, "{}", RULE)?;
    }

    for (offset, step) in self.steps.iter().enumerate() {
      let index = offset + 1;
      writeln!(out, "{}. {}...", index, step.label())?;
      out.flush()?;

      tracing::debug!(index, label = step.label(), "running check");
      match CheckResult::from_step(index, step) {
        CheckResult::Success { step_index, summary } => {
          tracing::debug!(index = step_index, "check passed");
          writeln!(out, "   ✅ {}", summary.as_deref().unwrap_or("OK"))?;
        }
        CheckResult::Failure { step_index, cause } => {
          self.state = RunState::Failed;
          tracing::debug!(index = step_index, label = step.label(), %cause, "check failed");
          writeln!(out, "   ❌ {} failed: {}", step.label(), cause)?;
          if let Some(hint) = step.hint() {
            writeln!(out, "   💡 Tip: {}", hint)?;
          }
          out.flush()?;
          return Err(
            CheckError::StepFailed {
              index: step_index,
              label: step.label().to_string(),
              cause,
            }
            .into(),
          );
        }
      }
    }

    writeln!(out, "{}", RULE)?;
    writeln!(out, "🎉 {}", self.banner)?;
    if !self.guidance.is_empty() {
      writeln!(out, "📋 Next steps:")?;
      for (offset, line) in self.guidance.iter().enumerate() {
        writeln!(out, "   {}. {}", offset + 1, line)?;
      }
    }
    out.flush()?;

    self.state = RunState::Completed;
    Ok(RunSummary {
      completed: self.steps.len(),
      elapsed: started.elapsed(),
    })
  }

  fn validate(&self) -> Result<(), CheckError> {
    if self.steps.is_empty() {
      return Err(CheckError::NoChecks);
    }
    match self.steps.iter().position(|s| s.label().trim().is_empty()) {
      Some(offset) => Err(CheckError::BlankLabel { index: offset + 1 }),
      None => Ok(()),
    }
  }
}
