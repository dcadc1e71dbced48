/// LLM Client — the single point of entry for all Ollama calls in this service.
///
/// ARCHITECTURAL RULE: No other module may call the model backend directly.
/// All model interactions MUST go through this module.
///
/// Every call is a single attempt against `POST {base_url}/api/generate`
/// with `stream: false`. There is no retry loop: the backend is a local
/// Ollama instance, and a failed or slow generation should surface to the
/// caller as one collapsed error rather than multiply the wait.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

/// Timeout for the connection-test probe. The probe prompt is a one-word
/// answer; anything slower than this means the backend is not usable.
const CONNECTION_TEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the free-form question endpoint.
const SIMPLE_QUESTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Ollama returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<SamplingOptions>,
}

/// Sampling options forwarded to Ollama for the simple-question path.
#[derive(Debug, Clone, Copy, Serialize)]
struct SamplingOptions {
    temperature: f32,
    max_tokens: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Response envelope from `/api/generate`. Ollama sends more fields
/// (timings, context); only the completion text matters here.
#[derive(Debug, Deserialize)]
struct GenerateEnvelope {
    #[serde(default)]
    response: Option<String>,
}

/// The single Ollama client shared by all handlers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.ollama_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.ollama_base_url.trim_end_matches('/').to_string(),
            model: config.ollama_model.clone(),
        }
    }

    /// Sends the program-generation prompt and returns the raw completion
    /// text. Uses the client-level timeout: local models can take minutes
    /// on the full prompt. An empty completion is an upstream failure, not
    /// something the parsing pipeline should be asked to absorb.
    pub async fn generate_program(&self, prompt: &str) -> Result<String, LlmError> {
        let envelope = self.call(prompt, None, None).await?;
        match envelope.response {
            Some(text) if !text.is_empty() => {
                debug!("Ollama returned {} chars of completion text", text.len());
                Ok(text)
            }
            _ => Err(LlmError::EmptyResponse),
        }
    }

    /// Short-timeout probe used by the connection-test endpoint.
    pub async fn test_connection(&self, prompt: &str) -> Result<String, LlmError> {
        let envelope = self
            .call(prompt, Some(CONNECTION_TEST_TIMEOUT), None)
            .await?;
        Ok(envelope
            .response
            .unwrap_or_else(|| "Pas de réponse".to_string()))
    }

    /// Forwards a free-form question with bounded sampling options.
    /// A missing `response` field means the envelope itself is invalid.
    pub async fn ask(&self, question: &str) -> Result<String, LlmError> {
        let envelope = self
            .call(
                question,
                Some(SIMPLE_QUESTION_TIMEOUT),
                Some(SamplingOptions::default()),
            )
            .await?;
        envelope.response.ok_or(LlmError::EmptyResponse)
    }

    async fn call(
        &self,
        prompt: &str,
        timeout: Option<Duration>,
        options: Option<SamplingOptions>,
    ) -> Result<GenerateEnvelope, LlmError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        let mut request = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Ollama returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: GenerateEnvelope = response.json().await?;
        Ok(envelope)
    }
}
