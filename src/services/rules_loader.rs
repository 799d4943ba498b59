//! Rules document resolution.
//!
//! Candidates, first match wins:
//! 1. `<root>/.cursor/rules.md`, if readable and non-empty
//! 2. the caller's explicit path, resolved against `<root>`
//! 3. the configured default path, or the packaged rules document
//!
//! An unreadable candidate falls through to the next one. Only a failure of
//! the last candidate is an error.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::assets;

/// Resolves and reads the rules document for a project.
#[derive(Debug, Clone, Default)]
pub struct RulesLoader {
    default_path: Option<PathBuf>,
}

impl RulesLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a file on disk instead of the packaged default.
    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    pub async fn load(&self, root: &Path, explicit: Option<&Path>) -> DomainResult<String> {
        let cursor_dir = root.join(".cursor");
        if let Err(e) = fs::create_dir_all(&cursor_dir).await {
            tracing::warn!(path = %cursor_dir.display(), error = %e, "could not create .cursor directory");
        }

        let project_rules = cursor_dir.join("rules.md");
        match fs::read_to_string(&project_rules).await {
            Ok(content) if !content.trim().is_empty() => {
                tracing::debug!(path = %project_rules.display(), "using project rules");
                return Ok(content);
            }
            Ok(_) => tracing::debug!(path = %project_rules.display(), "project rules file is empty"),
            Err(e) => tracing::debug!(path = %project_rules.display(), error = %e, "no project rules"),
        }

        if let Some(explicit) = explicit {
            let path = root.join(explicit);
            match fs::read_to_string(&path).await {
                Ok(content) => {
                    tracing::debug!(path = %path.display(), "using explicit rules");
                    return Ok(content);
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "explicit rules unreadable, using default"),
            }
        }

        self.load_default().await
    }

    async fn load_default(&self) -> DomainResult<String> {
        match &self.default_path {
            Some(path) => fs::read_to_string(path)
                .await
                .map_err(|e| DomainError::resource("rules", format!("{}: {e}", path.display()))),
            None => assets::default_rules()
                .map(str::to_string)
                .ok_or_else(|| DomainError::resource("rules", "packaged rules.md is missing")),
        }
    }
}
