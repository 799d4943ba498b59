//! Provider registry and factory.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ProviderConfig, ProviderKind};
use crate::domain::ports::CompletionProvider;

use super::anthropic::AnthropicProvider;
use super::mock::MockProvider;
use super::openai::OpenAiProvider;

/// Builds the ordered provider chain from configuration.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Create a provider by configuration entry.
    pub fn create(config: &ProviderConfig) -> DomainResult<Arc<dyn CompletionProvider>> {
        let provider: Arc<dyn CompletionProvider> = match config.kind {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config.clone())?),
            ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(config.clone())?),
            ProviderKind::Mock => Arc::new(MockProvider::default()),
        };
        Ok(provider)
    }

    /// Create every configured provider, preserving order.
    pub fn build_chain(configs: &[ProviderConfig]) -> DomainResult<Vec<Arc<dyn CompletionProvider>>> {
        let chain = configs
            .iter()
            .map(Self::create)
            .collect::<DomainResult<Vec<_>>>()?;

        for provider in &chain {
            if !provider.is_configured() {
                tracing::warn!(provider = provider.name(), "provider has no credentials; calls to it will fail");
            }
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chain_preserves_order() {
        let chain = ProviderRegistry::build_chain(&[
            ProviderConfig::new(ProviderKind::Anthropic),
            ProviderConfig::new(ProviderKind::Mock),
            ProviderConfig::new(ProviderKind::OpenAi),
        ])
        .unwrap();

        let names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["anthropic", "mock", "openai"]);
    }
}
