//! Ollama Provider Implementation
//!
//! Text generation through a local Ollama server.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Separate system and user prompts, generation budget via `num_predict`
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use autoaumento_domain::traits::TextGenerator;
//! use autoaumento_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), autoaumento_llm::LlmError> {
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.2");
//! let answers = provider
//!     .generate("Answer yes or no.", "Is water wet?", 3, 5)
//!     .await?;
//! assert_eq!(answers.len(), 3);
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use async_trait::async_trait;
use autoaumento_domain::traits::TextGenerator;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
    retry_delay: Duration,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: usize,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// HTTP client with the default request timeout
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

/// POST `body` as JSON to `url`, retrying with exponential backoff
///
/// 404 means the model is missing and is not retried; neither is an
/// unparseable success body.
pub(crate) async fn post_json<B, R>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
    model: &str,
    max_retries: u32,
    retry_delay: Duration,
) -> Result<R, LlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        match client.post(url).json(body).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response.json::<R>().await.map_err(|e| {
                        LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                    });
                } else if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(LlmError::ModelNotAvailable(model.to_string()));
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(LlmError::Communication(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_retries {
            let delay = backoff_delay(retry_delay, attempts);
            debug!("Attempt {} to {} failed, retrying in {:?}", attempts, url, delay);
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error
        .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}

/// 1x, 2x, 4x, ... `base` for the given 1-based attempt, saturating at `Duration::MAX`
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32
        .checked_pow(attempt.saturating_sub(1))
        .unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.2", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: http_client(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the base delay of the exponential backoff
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate one completion
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Response format is invalid
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_new_tokens: usize,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = GenerateRequest {
            model: &self.model,
            system: system_prompt,
            prompt: user_prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_new_tokens,
            },
        };

        let response: GenerateResponse = post_json(
            &self.client,
            &url,
            &body,
            &self.model,
            self.max_retries,
            self.retry_delay,
        )
        .await?;
        Ok(response.response.trim().to_string())
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    type Error = LlmError;

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        num_responses: usize,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Self::Error> {
        debug!(
            "Requesting {} completion(s) from '{}' (max {} tokens)",
            num_responses, self.model, max_new_tokens
        );

        let mut responses = Vec::with_capacity(num_responses);
        for _ in 0..num_responses {
            responses.push(
                self.complete(system_prompt, user_prompt, max_new_tokens)
                    .await?,
            );
        }
        Ok(responses)
    }
}
