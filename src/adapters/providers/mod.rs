//! Completion provider implementations.

pub mod anthropic;
pub mod mock;
pub mod openai;
pub mod registry;

pub use anthropic::AnthropicProvider;
pub use mock::{MockProvider, MockResponse};
pub use openai::OpenAiProvider;
pub use registry::ProviderRegistry;
