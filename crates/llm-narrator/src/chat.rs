//! OpenAI-compatible chat-completions client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::NarrationError;
use crate::{Narrator, Result};

/// Request timeout. Diagram completions are large; the upstream call is
/// still bounded so a hung endpoint cannot pin a request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 8000;

/// Narrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// OpenAI-compatible API base URL (ending before `/chat/completions`)
    pub base_url: String,
    /// API key; some local endpoints accept any value
    pub api_key: String,
    /// Model name
    pub model: String,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        NarratorConfig {
            base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: std::env::var("LLM_API_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| "dummy-key".to_string()),
            model: std::env::var("LLM_MODEL_NAME").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
        }
    }
}

impl NarratorConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific endpoint and model
    pub fn new(base_url: &str, model: &str) -> Self {
        NarratorConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: "dummy-key".to_string(),
            model: model.to_string(),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = api_key.to_string();
        self
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Chat-completions implementation of [`Narrator`].
pub struct ChatNarrator {
    config: NarratorConfig,
    client: reqwest::Client,
}

impl ChatNarrator {
    /// Create a new narrator
    pub fn new(config: NarratorConfig) -> Self {
        info!(
            "ChatNarrator initialized with URL: {}, Model: {}",
            config.base_url, config.model
        );

        let client = reqwest::Client::builder()
            .user_agent("repogram/0.1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        ChatNarrator { config, client }
    }

    /// Create a narrator from environment variables
    pub fn from_env() -> Self {
        Self::new(NarratorConfig::from_env())
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl Narrator for ChatNarrator {
    async fn narrate(&self, system: &str, user: &str) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        info!(
            "Sending request to completions endpoint. Prompt length: {} chars",
            user.len()
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(system, user))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(NarrationError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(NarrationError::EmptyCompletion);
        }

        debug!("Received completion. Length: {} chars", content.len());
        Ok(content)
    }
}
