//! Task persistence implementations.

pub mod directory;
pub mod shared_file;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::TaskLayout;
use crate::domain::ports::TaskPersistence;

pub use directory::DirectoryTaskStore;
pub use shared_file::SharedFileTaskStore;

/// File name of the single-file task document.
pub const LEGACY_TASKS_FILE: &str = "tasks.md";

/// `<work_dir>/.cursor`
pub fn cursor_dir(work_dir: &Path) -> PathBuf {
    work_dir.join(".cursor")
}

/// Create the task store for a layout.
pub fn task_store_for(layout: TaskLayout, work_dir: impl Into<PathBuf>) -> Arc<dyn TaskPersistence> {
    match layout {
        TaskLayout::Directory => Arc::new(DirectoryTaskStore::new(work_dir)),
        TaskLayout::SharedFile => Arc::new(SharedFileTaskStore::new(work_dir)),
    }
}

/// Persona names become file names; only allow plain identifiers.
fn ensure_safe_name(persona: &str) -> DomainResult<()> {
    let valid = !persona.is_empty()
        && persona
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "agent name '{persona}' cannot be used as a file name"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_store_for_layout() {
        assert_eq!(task_store_for(TaskLayout::Directory, "/tmp").layout(), "directory");
        assert_eq!(task_store_for(TaskLayout::SharedFile, "/tmp").layout(), "shared_file");
    }

    #[test]
    fn test_ensure_safe_name() {
        assert!(ensure_safe_name("architect").is_ok());
        assert!(ensure_safe_name("code-reviewer_2").is_ok());
        assert!(ensure_safe_name("").is_err());
        assert!(ensure_safe_name("a/b").is_err());
        assert!(ensure_safe_name("..").is_err());
    }
}
