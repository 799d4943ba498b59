//! Completion service - ordered fallback across providers.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult, ProviderFailure};
use crate::domain::models::{CompletionRequest, CompletionResponse};
use crate::domain::ports::CompletionProvider;

/// Runs a request against each provider in order until one returns text.
///
/// Failures are collected as values instead of being unwound, so a chain
/// of any length can be exercised with scripted providers.
#[derive(Clone)]
pub struct CompletionService {
    providers: Vec<Arc<dyn CompletionProvider>>,
}

impl CompletionService {
    pub fn new(providers: Vec<Arc<dyn CompletionProvider>>) -> Self {
        Self { providers }
    }

    /// Names of the providers in attempt order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub async fn complete(&self, request: &CompletionRequest) -> DomainResult<CompletionResponse> {
        if self.providers.is_empty() {
            return Err(DomainError::NoProviders);
        }

        let mut failures: Vec<(ProviderFailure, DomainError)> = Vec::new();

        for provider in &self.providers {
            match provider.complete(request).await {
                Ok(text) => {
                    if !failures.is_empty() {
                        tracing::info!(
                            provider = provider.name(),
                            failed = failures.len(),
                            "fallback provider succeeded"
                        );
                    }
                    return Ok(CompletionResponse {
                        provider: provider.name().to_string(),
                        text,
                    });
                }
                Err(err) => {
                    tracing::warn!(provider = provider.name(), error = %err, "provider failed");
                    if !err.is_recoverable_by_fallback() {
                        return Err(err);
                    }
                    let failure = ProviderFailure {
                        provider: provider.name().to_string(),
                        reason: err.to_string(),
                    };
                    failures.push((failure, err));
                }
            }
        }

        tracing::error!(attempted = failures.len(), "all providers failed");
        if failures.len() == 1 {
            if let Some((_, err)) = failures.pop() {
                return Err(err);
            }
        }
        Err(DomainError::AllProvidersFailed(
            failures.into_iter().map(|(failure, _)| failure).collect(),
        ))
    }
}
