//! End-to-end setup checklist for the chatbot
//!
//! Each step feeds the next through a `Handoff`: the HTTP client and API keys
//! are produced once and reused by the network checks, loaded pages feed the
//! chunking check.

use super::step::{CheckStep, Handoff};
use crate::collab::chunking::TextSplitter;
use crate::collab::credentials::{self, Credentials};
use crate::collab::documents::{self, Page};
use crate::collab::embeddings::{self, EmbeddingModel};
use crate::collab::http;
use crate::collab::llm::GeminiClient;
use crate::collab::vector::{self, PineconeClient};
use crate::core::context::DoctorContext;
use crate::utils::{bracket_list, plural, preview};
use reqwest::blocking::Client;
use std::time::Duration;

pub const TITLE: &str = "Testing RAG chatbot setup";
pub const BANNER: &str = "All checks passed! Your chatbot setup is ready.";
pub const LLM_HINT: &str = "Check that your Google API key is valid and has Gemini access enabled";

/// Build the seven setup checks, in run order
pub fn setup_checks(ctx: &DoctorContext) -> Vec<CheckStep<'_>> {
  let config = &ctx.config;
  let env_file = ctx.env_file.as_deref();

  let client: Handoff<Client> = Handoff::new("HTTP client");
  let creds: Handoff<Credentials> = Handoff::new("API credentials");
  let pages: Handoff<Vec<Page>> = Handoff::new("loaded pages");
  let model: Handoff<EmbeddingModel> = Handoff::new("embedding model");

  let init = {
    let client = client.clone();
    let secs = config.http.timeout_secs;
    CheckStep::new("Initializing clients", move || {
      client.put(http::build_client(Duration::from_secs(secs))?);
      Ok(Some(format!("HTTP client ready (timeout {}s)", secs)))
    })
  };

  let env = {
    let creds = creds.clone();
    CheckStep::new("Checking environment variables", move || {
      credentials::load_env_file(env_file)?;
      let loaded = Credentials::from_env(&config.vector.api_key_env, &config.llm.api_key_env)?;
      let summary = format!("API keys loaded ({})", loaded.names());
      creds.put(loaded);
      Ok(Some(summary))
    })
  };

  let load = {
    let pages = pages.clone();
    let dir = ctx.resolve(&config.documents.dir);
    CheckStep::new("Loading PDF documents", move || {
      let loaded = documents::load_directory(&dir)?;
      let summary = format!(
        "Loaded {} from {}",
        plural(loaded.pages.len(), "PDF page"),
        plural(loaded.files, "file")
      );
      pages.put(loaded.pages);
      Ok(Some(summary))
    })
  };

  let chunk = CheckStep::new("Splitting text into chunks", move || {
    let splitter = TextSplitter::new(config.documents.chunk_size, config.documents.chunk_overlap)?;
    let chunks = pages.with(|p| splitter.split_pages(p))?;
    Ok(Some(format!("Created {}", plural(chunks.len(), "text chunk"))))
  });

  let embed = {
    let client = client.clone();
    let model = model.clone();
    CheckStep::new("Loading embedding model", move || {
      let token = credentials::optional(&config.embeddings.token_env);
      let resolved = client.with(|c| {
        embeddings::resolve_model(
          c,
          &config.embeddings.hub_url,
          &config.embeddings.model,
          token.as_deref(),
        )
      })??;
      let summary = match resolved.architecture {
        Some(ref arch) => format!(
          "Embedding model {} ready ({}, {} dimensions)",
          resolved.name, arch, resolved.dimension
        ),
        None => format!("Embedding model {} ready ({} dimensions)", resolved.name, resolved.dimension),
      };
      model.put(resolved);
      Ok(Some(summary))
    })
  };

  let connect = {
    let client = client.clone();
    let creds = creds.clone();
    CheckStep::new("Connecting to vector database", move || {
      let key = creds.with(|c| c.vector.clone())?;
      let pinecone = PineconeClient::new(client.get()?, &config.vector.api_url, key);
      let indexes = pinecone.list_indexes()?;
      let dimension = model.with(|m| m.dimension)?;
      vector::check_dimension(&indexes, &config.vector.index, dimension)?;
      Ok(Some(format!(
        "Connected; available indexes: {}",
        bracket_list(&vector::index_names(&indexes))
      )))
    })
  };

  let generate = CheckStep::new("Calling language model", move || {
    let key = creds.with(|c| c.llm.clone())?;
    let gemini = GeminiClient::new(client.get()?, &config.llm.api_url, key, &config.llm.model)
      .with_temperature(config.llm.temperature);
    let reply = gemini.generate(&config.llm.prompt)?;
    Ok(Some(format!(
      "Model {} responded: {}",
      config.llm.model,
      preview(&reply, config.llm.preview_chars)
    )))
  })
  .with_hint(LLM_HINT);

  vec![init, env, load, chunk, embed, connect, generate]
}
