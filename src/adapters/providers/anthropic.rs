//! Anthropic messages API provider.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CompletionRequest, ProviderConfig, ProviderKind};
use crate::domain::ports::CompletionProvider;

const API_VERSION: &str = "2023-06-01";

/// Message role in Anthropic API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Content block in a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: Vec<ContentBlock>,
}

/// Request to the Anthropic Messages API.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Anthropic provider.
pub struct AnthropicProvider {
    config: ProviderConfig,
    api_key: Option<String>,
    client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    pub fn new(config: ProviderConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::provider(ProviderKind::Anthropic.as_str(), format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            api_key: None,
            client,
        })
    }

    /// Use an explicit API key instead of the configured environment variable.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(self.config.api_key_env()).ok())
            .filter(|k| !k.trim().is_empty())
    }

    fn build_request(&self, request: &CompletionRequest) -> MessagesRequest {
        let system = if request.system_prompt.is_empty() {
            None
        } else {
            Some(request.system_prompt.clone())
        };

        MessagesRequest {
            model: self.config.model(),
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![Message {
                role: MessageRole::User,
                content: vec![ContentBlock::Text {
                    text: request.document.clone(),
                }],
            }],
        }
    }

    /// Join the text blocks of a response.
    fn extract_text(response: &MessagesResponse) -> String {
        response
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        ProviderKind::Anthropic.as_str()
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> DomainResult<String> {
        let name = self.name();
        let api_key = self
            .api_key()
            .ok_or_else(|| DomainError::provider(name, format!("{} not set", self.config.api_key_env())))?;

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url()))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", &api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.build_request(request))
            .send()
            .await
            .map_err(|e| DomainError::provider(name, format!("API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(name, format!("API error {status}: {body}")));
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider(name, format!("Failed to parse response: {e}")))?;

        let text = Self::extract_text(&result);
        if text.trim().is_empty() {
            return Err(DomainError::EmptyResult {
                provider: name.to_string(),
            });
        }

        tracing::debug!(provider = name, id = %result.id, stop_reason = ?result.stop_reason, chars = text.len(), "completion received");
        Ok(text)
    }
}
