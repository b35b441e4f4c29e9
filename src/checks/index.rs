//! Vector index existence checklist

use super::step::{CheckStep, Handoff};
use crate::collab::credentials::{self, ApiKey};
use crate::collab::http;
use crate::collab::vector::{self, IndexDescription, PineconeClient};
use crate::core::context::DoctorContext;
use crate::utils::bracket_list;
use std::time::Duration;

pub const TITLE: &str = "Checking vector index";
pub const BANNER: &str = "Your vector index setup is ready!";

pub fn missing_index_hint(index: &str) -> String {
  format!(
    "Create the '{}' index with your indexing job (for example store_index.py) and rerun this check",
    index
  )
}

/// Key, listing, lookup
pub fn index_checks<'a>(ctx: &'a DoctorContext, index: &'a str) -> Vec<CheckStep<'a>> {
  let config = &ctx.config;
  let env_file = ctx.env_file.as_deref();

  let key: Handoff<ApiKey> = Handoff::new("vector database API key");
  let listed: Handoff<Vec<IndexDescription>> = Handoff::new("index list");

  let env = {
    let key = key.clone();
    CheckStep::new("Checking vector database API key", move || {
      credentials::load_env_file(env_file)?;
      let found = credentials::require_env_keys(&[config.vector.api_key_env.as_str()])?;
      let summary = format!("{} found", config.vector.api_key_env);
      key.put(found.into_iter().next().ok_or_else(|| anyhow::anyhow!("no API key loaded"))?);
      Ok(Some(summary))
    })
  };

  let list = {
    let listed = listed.clone();
    CheckStep::new("Listing vector indexes", move || {
      let client = http::build_client(Duration::from_secs(config.http.timeout_secs))?;
      let pinecone = PineconeClient::new(client, &config.vector.api_url, key.get()?);
      let indexes = pinecone.list_indexes()?;
      let summary = format!("Available indexes: {}", bracket_list(&vector::index_names(&indexes)));
      listed.put(indexes);
      Ok(Some(summary))
    })
  };

  let lookup = CheckStep::new(format!("Looking up index '{}'", index), move || {
    listed.with(|indexes| match vector::find_index(indexes, index) {
      Some(found) => {
        let details = found.describe();
        if details.is_empty() {
          Ok(Some(format!("'{}' index exists", index)))
        } else {
          Ok(Some(format!("'{}' index exists ({})", index, details)))
        }
      }
      None => anyhow::bail!(
        "'{}' index not found (available: {})",
        index,
        bracket_list(&vector::index_names(indexes))
      ),
    })?
  })
  .with_hint(missing_index_hint(index));

  vec![env, list, lookup]
}
