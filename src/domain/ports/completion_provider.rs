//! Completion provider port - interface for LLM backends.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::CompletionRequest;

/// Trait for LLM provider implementations.
///
/// Implementations return the extracted assistant text. Network, auth and
/// decoding failures map to `DomainError::Provider`; a reply with no usable
/// text maps to `DomainError::EmptyResult`. The completion service relies on
/// that split to decide whether to fall back.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name used in logs and failure messages.
    fn name(&self) -> &str;

    /// Whether the provider has what it needs (credentials, endpoint) to be called.
    fn is_configured(&self) -> bool;

    /// Run one completion.
    async fn complete(&self, request: &CompletionRequest) -> DomainResult<String>;
}
