//! Shared blocking HTTP plumbing for the hosted collaborators

use anyhow::Context;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Build the client every network check shares
pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
  Client::builder()
    .timeout(timeout)
    .user_agent(concat!("rag-doctor/", env!("CARGO_PKG_VERSION")))
    .build()
    .context("Failed to build HTTP client")
}

/// Pass 2xx responses through; turn anything else into an error naming the service
pub fn ensure_success(response: Response, service: &str) -> anyhow::Result<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.text().unwrap_or_default();
  tracing::debug!(service, %status, body = %body, "request rejected");
  anyhow::bail!("{} returned {}: {}", service, status, api_error_message(&body))
}

/// Pull the human-readable message out of a provider error body.
///
/// Handles `{"error": {"message": ..}}` (Google, Pinecone), `{"error": ".."}`
/// (Hugging Face) and `{"message": ..}`; anything else is echoed, shortened.
pub fn api_error_message(body: &str) -> String {
  let trimmed = body.trim();
  if trimmed.is_empty() {
    return "(empty response body)".to_string();
  }

  if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
    let message = value
      .pointer("/error/message")
      .or_else(|| value.get("error"))
      .or_else(|| value.get("message"))
      .and_then(|m| m.as_str());
    if let Some(message) = message {
      return message.to_string();
    }
  }

  crate::utils::preview(trimmed, 200)
}
