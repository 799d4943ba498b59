//! OpenAI chat completions provider.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CompletionRequest, ProviderConfig, ProviderKind};
use crate::domain::ports::CompletionProvider;

/// Placeholder text some clients substitute for a missing message body.
/// A reply equal to it is treated as empty.
pub const NO_CONTENT_SENTINEL: &str = "No response from model.";

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
        }
    }
}

/// Request to the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// OpenAI provider.
pub struct OpenAiProvider {
    config: ProviderConfig,
    api_key: Option<String>,
    client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider.
    pub fn new(config: ProviderConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::provider(ProviderKind::OpenAi.as_str(), format!("Failed to create HTTP client: {e}")))?;

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

    fn build_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model(),
            messages: vec![
                ChatMessage::new("system", &request.system_prompt),
                ChatMessage::new("user", &request.document),
            ],
            max_tokens: self.config.max_tokens,
        }
    }

    /// Text of the first choice, if it carries real content.
    fn extract_text(response: &ChatResponse) -> Option<&str> {
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|text| !text.trim().is_empty() && *text != NO_CONTENT_SENTINEL)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        ProviderKind::OpenAi.as_str()
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
            .post(format!("{}/v1/chat/completions", self.config.base_url()))
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&api_key)
            .json(&self.build_request(request))
            .send()
            .await
            .map_err(|e| DomainError::provider(name, format!("API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(name, format!("API error {status}: {body}")));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider(name, format!("Failed to parse response: {e}")))?;

        let text = Self::extract_text(&result).ok_or_else(|| DomainError::EmptyResult {
            provider: name.to_string(),
        })?;

        tracing::debug!(
            provider = name,
            id = %result.id,
            finish_reason = ?result.choices.first().and_then(|c| c.finish_reason.as_deref()),
            chars = text.len(),
            "completion received"
        );
        Ok(text.to_string())
    }
}
