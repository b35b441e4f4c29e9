//! Sentence-embedding model resolution against the Hugging Face hub
//!
//! The chatbot downloads its embedding model from the hub at startup. This check
//! fetches the model's `config.json` the same way, which proves the model id is
//! right, the hub is reachable and (for gated models) the token works. The
//! embedding dimension is read from the config so it can be compared with the
//! vector index.

use super::http::ensure_success;
use anyhow::Context;
use reqwest::blocking::Client;
use serde::Deserialize;

/// What the hub reports about the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingModel {
  pub name: String,
  pub dimension: usize,
  pub architecture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelConfig {
  hidden_size: Option<usize>,
  dim: Option<usize>,
  d_model: Option<usize>,
  #[serde(default)]
  architectures: Vec<String>,
}

/// `GET {hub_url}/{model}/resolve/main/config.json`
pub fn resolve_model(client: &Client, hub_url: &str, model: &str, token: Option<&str>) -> anyhow::Result<EmbeddingModel> {
  let url = format!("{}/{}/resolve/main/config.json", hub_url.trim_end_matches('/'), model);
  tracing::debug!(%url, authenticated = token.is_some(), "resolving embedding model");

  let mut request = client.get(&url);
  if let Some(token) = token {
    request = request.bearer_auth(token);
  }

  let response = request
    .send()
    .with_context(|| format!("Failed to reach model hub at {}", hub_url))?;
  let body = ensure_success(response, "Model hub")?
    .text()
    .context("Failed to read model config")?;

  parse_model_config(model, &body)
}

/// Read the embedding dimension out of a transformer `config.json`
pub fn parse_model_config(model: &str, body: &str) -> anyhow::Result<EmbeddingModel> {
  let config: ModelConfig =
    serde_json::from_str(body).with_context(|| format!("Model config for {} is not valid JSON", model))?;

  let dimension = config
    .hidden_size
    .or(config.dim)
    .or(config.d_model)
    .with_context(|| format!("Model config for {} has no hidden_size", model))?;

  Ok(EmbeddingModel {
    name: model.to_string(),
    dimension,
    architecture: config.architectures.into_iter().next(),
  })
}
