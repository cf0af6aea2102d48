//! Chat-completions client.

use crate::error::{CommentaryError, Result};
use crate::prompt::build_prompt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default completion endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default sampling temperature (near-deterministic).
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Configuration for the commentary client.
///
/// Constructed once at process start and passed by reference to whatever
/// issues the request; there is no ambient client or credential state.
#[derive(Clone)]
pub struct CommentaryConfig {
    /// API credential. Absence fails at call time, not at construction.
    pub api_key: Option<String>,

    /// Completion endpoint base URL (no trailing slash).
    pub base_url: String,

    /// Model identifier sent with the request.
    pub model: String,

    /// Sampling temperature sent with the request.
    pub temperature: f64,
}

impl std::fmt::Debug for CommentaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentaryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl CommentaryConfig {
    /// Read the credential from the process environment.
    ///
    /// A missing variable is not an error here; the request fails with
    /// `CommentaryError::MissingApiKey` when issued.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_VAR).ok(),
            ..Self::default()
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL (used by tests and alternative
    /// providers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Commentary client issuing a single awaited completion request per call.
#[derive(Debug, Clone)]
pub struct CommentaryClient {
    config: CommentaryConfig,
    client: Client,
}

impl CommentaryClient {
    /// Create a client from a configuration.
    pub fn new(config: CommentaryConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Request commentary for a rendered summary table.
    ///
    /// Returns the first choice's content verbatim; the four-section
    /// structure requested by the prompt is not validated. Any service
    /// failure propagates to the caller; there is no retry and no fallback
    /// text.
    pub async fn generate(&self, summary_text: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CommentaryError::MissingApiKey)?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(summary_text),
            }],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CommentaryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CommentaryError::EmptyResponse)?;

        Ok(choice.message.content)
    }
}
