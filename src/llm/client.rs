//! Chat completion client for OpenAI-compatible backends.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{NewsdeskError, Result};

/// Temperature used when the caller does not pass one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Request body keys owned by the client.
const RESERVED_PARAMS: [&str; 2] = ["model", "messages"];

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Something that can complete a chat.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send `messages` with the extra request `params` and return the reply text.
    async fn complete(&self, messages: &[ChatMessage], params: &Map<String, Value>)
        -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// [`ChatCompletion`] over the `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    client: Client,
    endpoint: String,
    api_key: String,
    provider: String,
    model: String,
}

impl OpenAiCompatibleClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NewsdeskError::Llm(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            provider: config.provider.clone(),
            model: config.model.clone(),
        })
    }

    /// `provider:model`, as it appears in logs.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.provider, self.model)
    }

    /// Build the JSON request body.
    ///
    /// `params` are forwarded as-is; they may not replace `model` or `messages`.
    fn request_body(
        &self,
        messages: &[ChatMessage],
        params: &Map<String, Value>,
    ) -> Result<Value> {
        let mut body = Map::new();
        body.insert("model".to_string(), Value::String(self.model.clone()));
        body.insert(
            "messages".to_string(),
            serde_json::to_value(messages)
                .map_err(|e| NewsdeskError::Llm(format!("failed to encode messages: {}", e)))?,
        );

        for (key, value) in params {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                return Err(NewsdeskError::Llm(format!(
                    "parameter '{}' cannot be overridden",
                    key
                )));
            }
            body.insert(key.clone(), value.clone());
        }

        body.entry("temperature")
            .or_insert_with(|| Value::from(DEFAULT_TEMPERATURE));

        Ok(Value::Object(body))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiCompatibleClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &Map<String, Value>,
    ) -> Result<String> {
        let body = self.request_body(messages, params)?;

        let mut request = self.client.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NewsdeskError::Llm(format!("request to {} failed: {}", self.identifier(), e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(NewsdeskError::Llm(format!("HTTP error: {} {}", status, text)));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| NewsdeskError::Llm(format!("invalid completion response: {}", e)))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| NewsdeskError::Llm("completion contained no message".to_string()))?;

        tracing::info!(model = %self.identifier(), "LLM message received: {}", text);

        Ok(text)
    }
}
