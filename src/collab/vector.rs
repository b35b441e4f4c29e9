//! Pinecone control-plane client (index listing)

use super::credentials::ApiKey;
use super::http::ensure_success;
use anyhow::Context;
use reqwest::blocking::Client;
use serde::Deserialize;

const API_VERSION: &str = "2024-07";

/// One entry of `GET /indexes`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexDescription {
  pub name: String,
  #[serde(default)]
  pub dimension: Option<u32>,
  #[serde(default)]
  pub metric: Option<String>,
  #[serde(default)]
  pub status: Option<IndexStatus>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexStatus {
  #[serde(default)]
  pub ready: bool,
  #[serde(default)]
  pub state: Option<String>,
}

impl IndexDescription {
  /// Short human description, e.g. `dimension 384, cosine, ready`
  pub fn describe(&self) -> String {
    let mut parts = Vec::new();
    if let Some(dimension) = self.dimension {
      parts.push(format!("dimension {}", dimension));
    }
    if let Some(ref metric) = self.metric {
      parts.push(metric.clone());
    }
    if let Some(ref status) = self.status {
      let state = if status.ready {
        "ready".to_string()
      } else {
        status.state.clone().unwrap_or_else(|| "not ready".to_string())
      };
      parts.push(state);
    }
    parts.join(", ")
  }
}

#[derive(Debug, Deserialize)]
struct IndexList {
  #[serde(default)]
  indexes: Vec<IndexDescription>,
}

pub struct PineconeClient {
  client: Client,
  api_url: String,
  api_key: ApiKey,
}

impl PineconeClient {
  pub fn new(client: Client, api_url: impl Into<String>, api_key: ApiKey) -> Self {
    Self {
      client,
      api_url: api_url.into(),
      api_key,
    }
  }

  /// `GET {api_url}/indexes`
  pub fn list_indexes(&self) -> anyhow::Result<Vec<IndexDescription>> {
    let url = format!("{}/indexes", self.api_url.trim_end_matches('/'));
    tracing::debug!(%url, "listing vector indexes");

    let response = self
      .client
      .get(&url)
      .header("Api-Key", self.api_key.expose())
      .header("X-Pinecone-API-Version", API_VERSION)
      .send()
      .with_context(|| format!("Failed to reach vector database at {}", self.api_url))?;
    let body = ensure_success(response, "Vector database")?
      .text()
      .context("Failed to read index list")?;

    parse_index_list(&body)
  }
}

pub fn parse_index_list(body: &str) -> anyhow::Result<Vec<IndexDescription>> {
  let list: IndexList = serde_json::from_str(body).context("Unexpected index list response")?;
  Ok(list.indexes)
}

pub fn find_index<'i>(indexes: &'i [IndexDescription], name: &str) -> Option<&'i IndexDescription> {
  indexes.iter().find(|index| index.name == name)
}

/// Fail when `name` is listed with a dimension other than the embedding model's.
/// An index that is missing or reports no dimension passes; its existence is
/// the index checklist's concern.
pub fn check_dimension(indexes: &[IndexDescription], name: &str, embedding_dimension: usize) -> anyhow::Result<()> {
  let Some(dimension) = find_index(indexes, name).and_then(|index| index.dimension) else {
    return Ok(());
  };
  if dimension as usize != embedding_dimension {
    anyhow::bail!(
      "'{}' index has dimension {} but the embedding model produces {}",
      name,
      dimension,
      embedding_dimension
    );
  }
  Ok(())
}

pub fn index_names(indexes: &[IndexDescription]) -> Vec<&str> {
  indexes.iter().map(|index| index.name.as_str()).collect()
}
