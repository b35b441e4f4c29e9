//! Run context - build once in main, pass to every command
//!
//! Holds the working root, the loaded configuration and the optional explicit
//! env file. Checklists borrow from it, so the context outlives every step.

use crate::core::config::DoctorConfig;
use crate::core::error::DoctorResult;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DoctorContext {
  /// Directory relative paths are resolved against (the working directory)
  pub root: PathBuf,

  /// rag-doctor.toml, or defaults
  pub config: DoctorConfig,

  /// `--env-file`; `None` means search for `.env`
  pub env_file: Option<PathBuf>,
}

impl DoctorContext {
  pub fn new(root: PathBuf, config: DoctorConfig, env_file: Option<PathBuf>) -> Self {
    Self { root, config, env_file }
  }

  /// Load configuration from `config_path` (or the search order under `root`)
  pub fn build(root: &Path, config_path: Option<&Path>, env_file: Option<PathBuf>) -> DoctorResult<Self> {
    let config_path = config_path.map(|p| resolve_against(root, p));
    let config = DoctorConfig::load(config_path.as_deref(), root)?;
    let env_file = env_file.map(|p| resolve_against(root, &p));
    Ok(Self::new(root.to_path_buf(), config, env_file))
  }

  /// Resolve a possibly relative path against the root
  pub fn resolve(&self, path: &Path) -> PathBuf {
    resolve_against(&self.root, path)
  }
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    root.join(path)
  }
}
