//! API keys and `.env` loading

use anyhow::Context;
use std::fmt;
use std::path::{Path, PathBuf};

/// A named secret read from the environment. `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
  name: String,
  value: String,
}

impl ApiKey {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }

  /// Variable the key was read from
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn expose(&self) -> &str {
    &self.value
  }
}

impl fmt::Debug for ApiKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ApiKey({}=<redacted>)", self.name)
  }
}

/// Keys the end-to-end setup check needs
#[derive(Debug, Clone)]
pub struct Credentials {
  pub vector: ApiKey,
  pub llm: ApiKey,
}

impl Credentials {
  pub fn from_env(vector_var: &str, llm_var: &str) -> anyhow::Result<Self> {
    Self::from_lookup(vector_var, llm_var, env_lookup)
  }

  pub fn from_lookup(vector_var: &str, llm_var: &str, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
    let mut keys = require_keys(&[vector_var, llm_var], lookup)?.into_iter();
    match (keys.next(), keys.next()) {
      (Some(vector), Some(llm)) => Ok(Self { vector, llm }),
      _ => anyhow::bail!("expected two API keys"),
    }
  }

  /// Variable names, for summaries
  pub fn names(&self) -> String {
    format!("{}, {}", self.vector.name(), self.llm.name())
  }
}

/// Read every variable in `names`; empty values count as missing and all
/// missing names are reported in one error.
pub fn require_keys(names: &[&str], lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Vec<ApiKey>> {
  let mut found = Vec::with_capacity(names.len());
  let mut missing = Vec::new();

  for &name in names {
    match lookup(name) {
      Some(value) if !value.trim().is_empty() => found.push(ApiKey::new(name, value.trim())),
      _ => missing.push(name),
    }
  }

  if !missing.is_empty() {
    anyhow::bail!("API keys not found: {} (checked environment and .env)", missing.join(", "));
  }
  Ok(found)
}

/// `require_keys` against the process environment
pub fn require_env_keys(names: &[&str]) -> anyhow::Result<Vec<ApiKey>> {
  require_keys(names, env_lookup)
}

/// Read an optional variable (e.g. a hub token); blank counts as unset
pub fn optional(name: &str) -> Option<String> {
  env_lookup(name).filter(|v| !v.trim().is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
  std::env::var(name).ok()
}

/// Load a `.env` file into the process environment.
///
/// With an explicit path the file must exist. Otherwise `.env` is searched from
/// the working directory upwards and a missing file is fine. Variables already
/// set in the environment are never overwritten.
pub fn load_env_file(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
  match explicit {
    Some(path) => {
      dotenvy::from_path(path).with_context(|| format!("Failed to load env file {}", path.display()))?;
      tracing::debug!(path = %path.display(), "loaded env file");
      Ok(Some(path.to_path_buf()))
    }
    None => match dotenvy::dotenv() {
      Ok(path) => {
        tracing::debug!(path = %path.display(), "loaded .env");
        Ok(Some(path))
      }
      Err(err) if err.not_found() => {
        tracing::debug!("no .env file found");
        Ok(None)
      }
      Err(err) => Err(err).context("Failed to load .env"),
    },
  }
}
