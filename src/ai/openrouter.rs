//! OpenRouter implementation of the AI trait.
//!
//! A reference implementation posting chat completions to OpenRouter's
//! OpenAI-compatible API. Temperature is pinned to zero and a JSON
//! response format is requested; the reply is still parsed tolerantly
//! downstream because neither is a guarantee.
//!
//! # Example
//!
//! ```rust,ignore
//! use shipdoc::ai::OpenRouter;
//!
//! let ai = OpenRouter::new("sk-or-...").with_model("openai/gpt-4o");
//! let pipeline = Pipeline::new(decoder, ai);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};
use crate::security::SecretString;
use crate::traits::ai::AI;
use crate::types::config::PipelineConfig;
use crate::types::content::ExtractionRequest;

/// Environment variable holding the OpenRouter API key.
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenRouter-backed AI implementation.
#[derive(Clone)]
pub struct OpenRouter {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl OpenRouter {
    /// Create a new client with the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key),
            model: PipelineConfig::default().model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment: `OPENROUTER_API_KEY` (required) and
    /// `OPENROUTER_MODEL` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .map_err(|_| ExtractionError::Config(format!("{API_KEY_ENV_VAR} not set").into()))?;
        Ok(Self::new(api_key).with_model(PipelineConfig::from_env().model))
    }

    /// Create from an API key plus the pipeline's configuration.
    pub fn from_config(api_key: impl Into<String>, config: &PipelineConfig) -> Self {
        Self::new(api_key).with_model(config.model.clone())
    }

    /// Set the model identifier (default: `openai/gpt-4o`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or a compatible gateway).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The current model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AI for OpenRouter {
    async fn call(&self, request: &ExtractionRequest) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_payload.clone(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::AI(e.to_string().into()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExtractionError::AI(
                format!("OpenRouter API error: {}", error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::AI(e.to_string().into()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ExtractionError::AI("No response from OpenRouter".into()))
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
