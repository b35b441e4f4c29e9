//! Error types for rag-doctor with contextual messages and exit codes
//!
//! Step failures are reported by the check runner itself; every other error
//! is printed once by `print_error` together with a help line when one exists.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for rag-doctor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// A check failed or the checklist was invalid
  CheckFailed = 1,
  /// Configuration file missing, unreadable or invalid
  Config = 2,
  /// System error (I/O)
  System = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for rag-doctor
#[derive(Debug)]
pub enum DoctorError {
  /// Checklist errors (invalid input or a failed step)
  Check(CheckError),

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// I/O error with a description of what was being attempted
  IoContext { message: String, source: io::Error },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl DoctorError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    DoctorError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      DoctorError::Message { message, context, help } => DoctorError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      DoctorError::Io(source) => DoctorError::IoContext {
        message: ctx_str,
        source,
      },
      DoctorError::IoContext { message, source } => DoctorError::IoContext {
        message: format!("{}\n{}", ctx_str, message),
        source,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      DoctorError::Check(_) => ExitCode::CheckFailed,
      DoctorError::Config(_) => ExitCode::Config,
      DoctorError::Io(_) | DoctorError::IoContext { .. } => ExitCode::System,
      DoctorError::Message { .. } => ExitCode::Config,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      DoctorError::Check(e) => e.help_message(),
      DoctorError::Config(e) => e.help_message(),
      DoctorError::Message { help, .. } => help.clone(),
      DoctorError::Io(_) | DoctorError::IoContext { .. } => None,
    }
  }

  /// Whether the failure was already written to the output stream by the runner
  pub fn already_reported(&self) -> bool {
    matches!(self, DoctorError::Check(CheckError::StepFailed { .. }))
  }
}

impl fmt::Display for DoctorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DoctorError::Check(e) => write!(f, "{}", e),
      DoctorError::Config(e) => write!(f, "{}", e),
      DoctorError::Io(e) => write!(f, "I/O error: {}", e),
      DoctorError::IoContext { message, source } => write!(f, "{}\nI/O error: {}", message, source),
      DoctorError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for DoctorError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DoctorError::Io(e) | DoctorError::IoContext { source: e, .. } => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for DoctorError {
  fn from(err: io::Error) -> Self {
    DoctorError::Io(err)
  }
}

impl From<CheckError> for DoctorError {
  fn from(err: CheckError) -> Self {
    DoctorError::Check(err)
  }
}

impl From<ConfigError> for DoctorError {
  fn from(err: ConfigError) -> Self {
    DoctorError::Config(err)
  }
}

impl From<String> for DoctorError {
  fn from(msg: String) -> Self {
    DoctorError::message(msg)
  }
}

impl From<&str> for DoctorError {
  fn from(msg: &str) -> Self {
    DoctorError::message(msg)
  }
}

impl From<toml_edit::de::Error> for DoctorError {
  fn from(err: toml_edit::de::Error) -> Self {
    DoctorError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for DoctorError {
  fn from(err: toml_edit::ser::Error) -> Self {
    DoctorError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<anyhow::Error> for DoctorError {
  fn from(err: anyhow::Error) -> Self {
    DoctorError::message(format!("{:#}", err))
  }
}

/// Checklist errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
  /// The checklist was empty
  NoChecks,

  /// A step had an empty label (1-based index)
  BlankLabel { index: usize },

  /// A step's action failed; the run stopped there
  StepFailed { index: usize, label: String, cause: String },
}

impl CheckError {
  fn help_message(&self) -> Option<String> {
    match self {
      CheckError::NoChecks => Some("Register at least one check before running the checklist.".to_string()),
      CheckError::BlankLabel { .. } => Some("Every check needs a non-empty label.".to_string()),
      CheckError::StepFailed { .. } => None,
    }
  }
}

impl fmt::Display for CheckError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CheckError::NoChecks => write!(f, "no checks to run"),
      CheckError::BlankLabel { index } => write!(f, "check #{} has an empty label", index),
      CheckError::StepFailed { index, label, cause } => {
        write!(f, "check #{} ({}) failed: {}", index, label, cause)
      }
    }
  }
}

impl std::error::Error for CheckError {}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit config path does not exist
  NotFound { path: PathBuf },

  /// A field holds a value outside its allowed range
  Invalid { field: String, reason: String },

  /// `init` refused to overwrite an existing file
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Run `rag-doctor init` to create a configuration file, or drop --config to use defaults.".to_string())
      }
      ConfigError::Invalid { field, .. } => Some(format!("Fix `{}` in rag-doctor.toml.", field)),
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite it.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Configuration file not found: {}", path.display()),
      ConfigError::Invalid { field, reason } => write!(f, "Invalid config value for {}: {}", field, reason),
      ConfigError::AlreadyExists { path } => write!(f, "Configuration file already exists: {}", path.display()),
    }
  }
}

/// Result type alias for rag-doctor
pub type DoctorResult<T> = Result<T, DoctorError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> DoctorResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> DoctorResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<DoctorError>,
{
  fn context(self, ctx: impl Into<String>) -> DoctorResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> DoctorResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &DoctorError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
