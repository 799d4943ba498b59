//! Completion provider domain models.

use serde::{Deserialize, Serialize};

/// Type of completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI chat completions API
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// Scripted provider for tests and offline runs
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Mock => "mock",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "open_ai" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "mock" | "test" => Some(Self::Mock),
            _ => None,
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Mock => "",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Anthropic => "https://api.anthropic.com",
            Self::Mock => "",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4-turbo-2024-04-09",
            Self::Anthropic => "claude-3-5-sonnet-latest",
            Self::Mock => "mock",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completion call: the compiled document plus the persona's system prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub document: String,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            document: document.into(),
        }
    }
}

/// Text returned by the provider that answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Name of the provider that produced the text.
    pub provider: String,
    pub text: String,
}
