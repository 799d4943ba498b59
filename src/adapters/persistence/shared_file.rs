//! Single shared `.cursor/tasks.md` with one section per persona.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::persona::display_name;
use crate::domain::ports::TaskPersistence;

use super::{cursor_dir, ensure_safe_name, LEGACY_TASKS_FILE};

/// Separator placed between persona sections.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Appends each plan to `<work_dir>/.cursor/tasks.md` under a `# <Persona> Tasks` header.
#[derive(Debug, Clone)]
pub struct SharedFileTaskStore {
    work_dir: PathBuf,
}

impl SharedFileTaskStore {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        cursor_dir(&self.work_dir).join(LEGACY_TASKS_FILE)
    }
}

fn section(persona: &str, text: &str) -> String {
    format!("# {} Tasks\n\n{}\n", display_name(persona), text.trim_end())
}

#[async_trait]
impl TaskPersistence for SharedFileTaskStore {
    fn layout(&self) -> &'static str {
        "shared_file"
    }

    async fn save(&self, persona: &str, text: &str) -> DomainResult<PathBuf> {
        ensure_safe_name(persona)?;

        let dir = cursor_dir(&self.work_dir);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::persistence(&dir, e))?;

        let path = self.path();
        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::persistence(&path, e))?;

        if exists {
            let mut file = fs::OpenOptions::new()
                .append(true)
                .open(&path)
                .await
                .map_err(|e| DomainError::persistence(&path, e))?;
            let entry = format!("{SECTION_SEPARATOR}{}", section(persona, text));
            file.write_all(entry.as_bytes())
                .await
                .map_err(|e| DomainError::persistence(&path, e))?;
            file.flush()
                .await
                .map_err(|e| DomainError::persistence(&path, e))?;
        } else {
            fs::write(&path, section(persona, text))
                .await
                .map_err(|e| DomainError::persistence(&path, e))?;
        }

        tracing::info!(persona, path = %path.display(), appended = exists, "task document written");
        Ok(path)
    }
}
