//! Mock provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::CompletionRequest;
use crate::domain::ports::CompletionProvider;

/// Scripted outcome of a mock completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Return this text.
    Text(String),
    /// Fail with a provider error carrying this message.
    Fail(String),
    /// Return no usable text.
    Empty,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::Text("1. - [ ] Mock plan step".to_string())
    }
}

/// Mock provider that replays a fixed response and records its calls.
pub struct MockProvider {
    name: String,
    response: MockResponse,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>, response: MockResponse) -> Self {
        Self {
            name: name.into(),
            response,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn succeeding(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, MockResponse::Text(text.into()))
    }

    pub fn failing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, MockResponse::Fail(reason.into()))
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, MockResponse::Empty)
    }

    /// Number of completions attempted against this provider.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("mock", MockResponse::default())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, request: &CompletionRequest) -> DomainResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.response {
            MockResponse::Text(text) => Ok(text.clone()),
            MockResponse::Fail(reason) => Err(DomainError::provider(&self.name, reason)),
            MockResponse::Empty => Err(DomainError::EmptyResult {
                provider: self.name.clone(),
            }),
        }
    }
}
