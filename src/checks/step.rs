//! Check step abstraction for setup verification
//!
//! A `CheckStep` is a label plus a zero-argument action. Actions that need a value
//! produced by an earlier step capture a `Handoff` instead of reading ambient state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// What a successful action reports back (e.g. "Loaded 12 PDF pages")
pub type Summary = Option<String>;

type Action<'a> = Box<dyn Fn() -> anyhow::Result<Summary> + 'a>;

/// One entry in a checklist
pub struct CheckStep<'a> {
  label: String,
  hint: Option<String>,
  action: Action<'a>,
}

impl<'a> CheckStep<'a> {
  /// Create a step from a label and the action that performs the check
  pub fn new(label: impl Into<String>, action: impl Fn() -> anyhow::Result<Summary> + 'a) -> Self {
    Self {
      label: label.into(),
      hint: None,
      action: Box::new(action),
    }
  }

  /// Guidance shown only when this step fails
  pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
    self.hint = Some(hint.into());
    self
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn hint(&self) -> Option<&str> {
    self.hint.as_deref()
  }

  pub(crate) fn invoke(&self) -> anyhow::Result<Summary> {
    (self.action)()
  }
}

impl fmt::Debug for CheckStep<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CheckStep")
      .field("label", &self.label)
      .field("hint", &self.hint)
      .finish_non_exhaustive()
  }
}

/// Outcome of running one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
  Success { step_index: usize, summary: Summary },
  Failure { step_index: usize, cause: String },
}

impl CheckResult {
  /// Run a step's action and tag the outcome. The cause keeps the full error chain.
  pub fn from_step(step_index: usize, step: &CheckStep<'_>) -> Self {
    match step.invoke() {
      Ok(summary) => CheckResult::Success { step_index, summary },
      Err(err) => CheckResult::Failure {
        step_index,
        cause: format!("{:#}", err),
      },
    }
  }
}

/// Single-slot value passed from one step to a later one.
///
/// Clones share the slot: the producing step keeps one clone, the consuming
/// step another.
pub struct Handoff<T> {
  name: &'static str,
  slot: Rc<RefCell<Option<T>>>,
}

impl<T> Handoff<T> {
  pub fn new(name: &'static str) -> Self {
    Self {
      name,
      slot: Rc::new(RefCell::new(None)),
    }
  }

  /// Store the value, replacing whatever an earlier run left behind
  pub fn put(&self, value: T) {
    *self.slot.borrow_mut() = Some(value);
  }

  /// Borrow the value for the duration of `f`
  pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> anyhow::Result<R> {
    let slot = self.slot.borrow();
    match slot.as_ref() {
      Some(value) => Ok(f(value)),
      None => anyhow::bail!("{} is not available; an earlier check did not produce it", self.name),
    }
  }
}

impl<T: Clone> Handoff<T> {
  pub fn get(&self) -> anyhow::Result<T> {
    self.with(T::clone)
  }
}

impl<T> Clone for Handoff<T> {
  fn clone(&self) -> Self {
    Self {
      name: self.name,
      slot: Rc::clone(&self.slot),
    }
  }
}
