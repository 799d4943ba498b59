//! Task persistence port - writes generated plans to disk.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Trait for task document layouts.
#[async_trait]
pub trait TaskPersistence: Send + Sync {
    /// Layout name used in logs.
    fn layout(&self) -> &'static str;

    /// Save a persona's plan and return the path it was written to.
    async fn save(&self, persona: &str, text: &str) -> DomainResult<PathBuf>;
}
