//! Completion client boundary.
//!
//! Defines the [`CompletionClient`] capability trait — one opaque prompt
//! string in, optional completion text out — and [`GeminiClient`], the
//! default implementation over the Gemini `generateContent` HTTP API.
//!
//! The boundary is deliberately narrow: a single attempt per turn, no
//! retries, no streaming, no partial tokens. `Ok(None)` models a request
//! that succeeded but produced no text; the orchestrator substitutes its
//! fixed fallback reply for that case.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

/// Environment variable holding the model API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Failure at the completion boundary.
///
/// Callers fold every variant into one fixed user-facing message; the
/// variants exist so the diagnostic log stays actionable.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingCredential,
    #[error("request to model endpoint failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model endpoint returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// The external hosted-model call: `prompt string -> completion string`,
/// fallible. Injected into the turn orchestrator so the chat state
/// machine is testable with scripted fakes.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt and return the completion text, if any.
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError>;
}

/// Completion client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    /// Build a client from the application config.
    ///
    /// Fails with [`CompletionError::MissingCredential`] when
    /// `GEMINI_API_KEY` is unset — the application treats that as a fatal
    /// startup error, since nothing works without it.
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| CompletionError::MissingCredential)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response.json().await?;
        Ok(candidate_text(&json))
    }
}

/// Pull the completion text out of a `generateContent` response.
///
/// Joins the text parts of the first candidate; returns `None` when the
/// response carries no usable text (e.g. a safety block).
fn candidate_text(json: &serde_json::Value) -> Option<String> {
    let parts = json
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
