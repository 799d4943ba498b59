//! Per-persona task documents under `.cursor/tasks/`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::TaskPersistence;

use super::{cursor_dir, ensure_safe_name, LEGACY_TASKS_FILE};

/// Writes `<work_dir>/.cursor/tasks/<persona>.md`, overwriting earlier plans,
/// and leaves a redirect in the legacy `.cursor/tasks.md`.
#[derive(Debug, Clone)]
pub struct DirectoryTaskStore {
    work_dir: PathBuf,
}

impl DirectoryTaskStore {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn tasks_dir(&self) -> PathBuf {
        cursor_dir(&self.work_dir).join("tasks")
    }

    pub fn path_for(&self, persona: &str) -> PathBuf {
        self.tasks_dir().join(format!("{persona}.md"))
    }

    fn legacy_path(&self) -> PathBuf {
        cursor_dir(&self.work_dir).join(LEGACY_TASKS_FILE)
    }
}

/// Notice left in the legacy single-file location.
pub fn redirect_notice(persona: &str) -> String {
    format!(
        "# Tasks\n\n\
         Task documents are now written per agent under `.cursor/tasks/`.\n\n\
         The latest plan was generated by the {persona} agent: [tasks/{persona}.md](tasks/{persona}.md)\n"
    )
}

async fn write(path: &Path, content: &str) -> DomainResult<()> {
    fs::write(path, content)
        .await
        .map_err(|e| DomainError::persistence(path, e))
}

#[async_trait]
impl TaskPersistence for DirectoryTaskStore {
    fn layout(&self) -> &'static str {
        "directory"
    }

    async fn save(&self, persona: &str, text: &str) -> DomainResult<PathBuf> {
        ensure_safe_name(persona)?;

        let tasks_dir = self.tasks_dir();
        fs::create_dir_all(&tasks_dir)
            .await
            .map_err(|e| DomainError::persistence(&tasks_dir, e))?;

        let path = self.path_for(persona);
        write(&path, text).await?;
        write(&self.legacy_path(), &redirect_notice(persona)).await?;

        tracing::info!(persona, path = %path.display(), "task document written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_overwrites_per_persona_file() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryTaskStore::new(dir.path());

        let first = store.save("architect", "X").await.unwrap();
        let second = store.save("architect", "X").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, dir.path().join(".cursor/tasks/architect.md"));
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "X");
    }

    #[tokio::test]
    async fn test_save_writes_redirect_notice() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryTaskStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join(".cursor")).unwrap();
        std::fs::write(dir.path().join(".cursor/tasks.md"), "stale single-file plan").unwrap();

        store.save("architect", "X").await.unwrap();

        let legacy = std::fs::read_to_string(dir.path().join(".cursor/tasks.md")).unwrap();
        assert!(legacy.contains("tasks/architect.md"));
        assert!(!legacy.contains("stale single-file plan"));
    }

    #[tokio::test]
    async fn test_personas_do_not_clobber_each_other() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryTaskStore::new(dir.path());

        store.save("architect", "X").await.unwrap();
        store.save("designer", "Y").await.unwrap();

        assert_eq!(std::fs::read_to_string(store.path_for("architect")).unwrap(), "X");
        assert_eq!(std::fs::read_to_string(store.path_for("designer")).unwrap(), "Y");
        let legacy = std::fs::read_to_string(dir.path().join(".cursor/tasks.md")).unwrap();
        assert!(legacy.contains("tasks/designer.md"));
    }

    #[tokio::test]
    async fn test_rejects_path_like_persona() {
        let dir = TempDir::new().unwrap();
        let err = DirectoryTaskStore::new(dir.path())
            .save("../escape", "X")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
