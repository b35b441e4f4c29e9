use crate::core::error::{ConfigError, DoctorError, DoctorResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name written by `rag-doctor init`
pub const CONFIG_FILE_NAME: &str = "rag-doctor.toml";

/// Configuration for rag-doctor
/// Searched in order: rag-doctor.toml, .rag-doctor.toml, .config/rag-doctor.toml
///
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorConfig {
  pub documents: DocumentsConfig,
  pub embeddings: EmbeddingsConfig,
  pub vector: VectorConfig,
  pub llm: LlmConfig,
  pub http: HttpConfig,
  pub guidance: GuidanceConfig,
}

/// Where the knowledge-base PDFs live and how they are chunked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
  /// Directory scanned (non-recursively) for `*.pdf` files
  pub dir: PathBuf,
  /// Maximum characters per chunk
  pub chunk_size: usize,
  /// Characters shared between adjacent chunks
  pub chunk_overlap: usize,
}

impl Default for DocumentsConfig {
  fn default() -> Self {
    Self {
      dir: PathBuf::from("Data"),
      chunk_size: 500,
      chunk_overlap: 20,
    }
  }
}

/// Sentence-embedding model resolved from the Hugging Face hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingsConfig {
  pub model: String,
  pub hub_url: String,
  /// Optional token variable for gated models
  pub token_env: String,
}

impl Default for EmbeddingsConfig {
  fn default() -> Self {
    Self {
      model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
      hub_url: "https://huggingface.co".to_string(),
      token_env: "HF_TOKEN".to_string(),
    }
  }
}

/// Hosted vector index (Pinecone)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
  pub index: String,
  pub api_url: String,
  pub api_key_env: String,
}

impl Default for VectorConfig {
  fn default() -> Self {
    Self {
      index: "medicalbot".to_string(),
      api_url: "https://api.pinecone.io".to_string(),
      api_key_env: "PINECONE_API_KEY".to_string(),
    }
  }
}

/// Language model used by the chatbot (Gemini)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
  pub model: String,
  pub temperature: f64,
  /// Prompt sent by the connectivity check
  pub prompt: String,
  pub api_url: String,
  pub api_key_env: String,
  /// How much of the reply the check echoes back
  pub preview_chars: usize,
}

impl Default for LlmConfig {
  fn default() -> Self {
    Self {
      model: "gemini-1.5-flash".to_string(),
      temperature: 0.4,
      prompt: "Hello, this is a test.".to_string(),
      api_url: "https://generativelanguage.googleapis.com".to_string(),
      api_key_env: "GOOGLE_API_KEY".to_string(),
      preview_chars: 50,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
  pub timeout_secs: u64,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self { timeout_secs: 30 }
  }
}

/// Text printed after a fully successful setup check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
  pub next_steps: Vec<String>,
}

impl Default for GuidanceConfig {
  fn default() -> Self {
    Self {
      next_steps: vec![
        "Build the vector index from your documents (e.g. store_index.py)".to_string(),
        "Start the chatbot web application (e.g. app.py)".to_string(),
        "Open http://localhost:8080 to use the chatbot".to_string(),
      ],
    }
  }
}

impl DoctorConfig {
  /// Find config file in search order: rag-doctor.toml, .rag-doctor.toml, .config/rag-doctor.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join(CONFIG_FILE_NAME),
      path.join(".rag-doctor.toml"),
      path.join(".config").join(CONFIG_FILE_NAME),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from an explicit path, or search `root`; defaults when nothing is found
  pub fn load(explicit: Option<&Path>, root: &Path) -> DoctorResult<Self> {
    let config_path = match explicit {
      Some(path) if !path.exists() => {
        return Err(DoctorError::Config(ConfigError::NotFound {
          path: path.to_path_buf(),
        }));
      }
      Some(path) => path.to_path_buf(),
      None => match Self::find_config_path(root) {
        Some(path) => path,
        None => {
          tracing::debug!(root = %root.display(), "no config file found, using defaults");
          return Ok(Self::default());
        }
      },
    };

    tracing::debug!(path = %config_path.display(), "loading config");
    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    Ok(config)
  }

  /// Parse and validate TOML content
  pub fn parse(content: &str) -> DoctorResult<Self> {
    let config: DoctorConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate value ranges
  pub fn validate(&self) -> DoctorResult<()> {
    let docs = &self.documents;
    if docs.chunk_size == 0 {
      return Err(invalid("documents.chunk_size", "must be greater than 0"));
    }
    if docs.chunk_overlap >= docs.chunk_size {
      return Err(invalid(
        "documents.chunk_overlap",
        format!(
          "overlap {} must be smaller than chunk_size {}",
          docs.chunk_overlap, docs.chunk_size
        ),
      ));
    }

    if !(0.0..=2.0).contains(&self.llm.temperature) {
      return Err(invalid(
        "llm.temperature",
        format!("{} is outside 0.0..=2.0", self.llm.temperature),
      ));
    }

    if self.http.timeout_secs == 0 {
      return Err(invalid("http.timeout_secs", "must be greater than 0"));
    }

    for (field, value) in [
      ("vector.index", &self.vector.index),
      ("vector.api_key_env", &self.vector.api_key_env),
      ("llm.model", &self.llm.model),
      ("llm.api_key_env", &self.llm.api_key_env),
      ("embeddings.model", &self.embeddings.model),
    ] {
      if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
      }
    }

    Ok(())
  }

  /// Save config to `path` (normally `rag-doctor.toml` in the working directory)
  pub fn save(&self, path: &Path, force: bool) -> DoctorResult<PathBuf> {
    let config_path = path.to_path_buf();
    if config_path.exists() && !force {
      return Err(DoctorError::Config(ConfigError::AlreadyExists { path: config_path }));
    }
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> DoctorError {
  DoctorError::Config(ConfigError::Invalid {
    field: field.to_string(),
    reason: reason.into(),
  })
}
