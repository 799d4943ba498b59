//! Domain errors for the cursor-tools pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an error originated from.
///
/// Used as the prefix of every failure payload so a caller can tell a bad
/// argument apart from a provider outage or a full disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    Resources,
    Completion,
    Persistence,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Resources => "resources",
            Self::Completion => "completion",
            Self::Persistence => "persistence",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider's failure inside a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: String,
    pub reason: String,
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider, self.reason)
    }
}

fn format_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur anywhere in the tool pipeline.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid arguments: {0}")]
    Validation(String),

    #[error("Unknown agent '{name}'. Valid agents: {}", .valid.join(", "))]
    UnknownPersona { name: String, valid: Vec<String> },

    #[error("Failed to read {what}: {message}")]
    ResourceUnavailable { what: String, message: String },

    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },

    #[error("{provider} returned no usable text")]
    EmptyResult { provider: String },

    #[error("All providers failed: {}", format_failures(.0))]
    AllProvidersFailed(Vec<ProviderFailure>),

    #[error("No completion providers configured")]
    NoProviders,

    #[error("Failed to write {}: {message}", .path.display())]
    Persistence { path: PathBuf, message: String },
}

impl DomainError {
    /// Stage of the pipeline this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Validation(_) | Self::UnknownPersona { .. } => Stage::Validation,
            Self::ResourceUnavailable { .. } => Stage::Resources,
            Self::Provider { .. }
            | Self::EmptyResult { .. }
            | Self::AllProvidersFailed(_)
            | Self::NoProviders => Stage::Completion,
            Self::Persistence { .. } => Stage::Persistence,
        }
    }

    /// Whether a fallback provider should be tried after this error.
    pub fn is_recoverable_by_fallback(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::EmptyResult { .. })
    }

    pub fn resource(what: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::ResourceUnavailable {
            what: what.into(),
            message: message.to_string(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Persistence {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Validation(err.to_string())
    }
}
