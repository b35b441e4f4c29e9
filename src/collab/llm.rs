//! Google Gemini client (single-turn `generateContent`)

use super::credentials::ApiKey;
use super::http::ensure_success;
use anyhow::Context;
use reqwest::blocking::Client;
use serde::Deserialize;

pub struct GeminiClient {
  client: Client,
  api_url: String,
  api_key: ApiKey,
  model: String,
  temperature: f64,
}

impl GeminiClient {
  pub fn new(client: Client, api_url: impl Into<String>, api_key: ApiKey, model: impl Into<String>) -> Self {
    Self {
      client,
      api_url: api_url.into(),
      api_key,
      model: model.into(),
      temperature: 0.4,
    }
  }

  pub fn with_temperature(mut self, temperature: f64) -> Self {
    self.temperature = temperature;
    self
  }

  /// Send one user message and return the reply text
  pub fn generate(&self, prompt: &str) -> anyhow::Result<String> {
    let url = format!(
      "{}/v1beta/models/{}:generateContent",
      self.api_url.trim_end_matches('/'),
      self.model
    );
    let body = serde_json::json!({
      "contents": [{
        "role": "user",
        "parts": [{ "text": prompt }],
      }],
      "generationConfig": { "temperature": self.temperature },
    });

    tracing::debug!(model = %self.model, temperature = self.temperature, "sending LLM request");
    let response = self
      .client
      .post(&url)
      .header("x-goog-api-key", self.api_key.expose())
      .json(&body)
      .send()
      .with_context(|| format!("Failed to reach language model API at {}", self.api_url))?;
    let text = ensure_success(response, "Language model")?
      .text()
      .context("Failed to read language model response")?;

    let reply = parse_generate_response(&text)?;
    tracing::debug!(reply_len = reply.len(), "LLM reply received");
    Ok(reply)
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  #[serde(default)]
  prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
  #[serde(default)]
  content: Option<Content>,
  #[serde(default)]
  finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
  #[serde(default)]
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
  #[serde(default)]
  block_reason: Option<String>,
}

/// Join the text parts of the first candidate
pub fn parse_generate_response(body: &str) -> anyhow::Result<String> {
  let response: GenerateResponse = serde_json::from_str(body).context("Unexpected language model response")?;

  let Some(candidate) = response.candidates.into_iter().next() else {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
      anyhow::bail!("prompt was blocked by the model ({})", reason);
    }
    anyhow::bail!("model returned no candidates");
  };

  let text: String = candidate
    .content
    .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
    .unwrap_or_default();

  if text.trim().is_empty() {
    let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
    anyhow::bail!("model returned an empty reply (finish reason: {})", reason);
  }
  Ok(text)
}
