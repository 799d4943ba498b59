//! `.cursor` scaffolding from the packaged template.

use std::path::{Path, PathBuf};

use include_dir::{Dir, DirEntry};
use tokio::fs;

use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::assets::CURSOR_TEMPLATE;

/// File holding the optional project description.
pub const PROJECT_DESCRIPTION_FILE: &str = "project.md";

/// Copies a template tree into `<destination>/.cursor`.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldService {
    template: &'static Dir<'static>,
}

impl Default for ScaffoldService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldService {
    /// Scaffolder using the packaged `cursor-template/`.
    pub fn new() -> Self {
        Self {
            template: &CURSOR_TEMPLATE,
        }
    }

    /// Copy the template, overwriting files of the same name, and return the
    /// created `.cursor` directory.
    pub async fn init(&self, destination: &Path, description: Option<&str>) -> DomainResult<PathBuf> {
        let target = destination.join(".cursor");
        fs::create_dir_all(&target)
            .await
            .map_err(|e| DomainError::persistence(&target, e))?;

        let copied = copy_dir(self.template, &target).await?;

        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            let path = target.join(PROJECT_DESCRIPTION_FILE);
            fs::write(&path, format!("# Project\n\n{}\n", description.trim()))
                .await
                .map_err(|e| DomainError::persistence(&path, e))?;
        }

        tracing::info!(path = %target.display(), files = copied, "cursor template initialized");
        Ok(target)
    }
}

/// Entry paths in an include_dir tree are relative to the tree root.
async fn copy_dir(dir: &Dir<'_>, target: &Path) -> DomainResult<usize> {
    let mut copied = 0;
    let mut pending: Vec<&Dir<'_>> = vec![dir];

    while let Some(current) = pending.pop() {
        for entry in current.entries() {
            let dest = target.join(entry.path());
            match entry {
                DirEntry::Dir(sub) => {
                    fs::create_dir_all(&dest)
                        .await
                        .map_err(|e| DomainError::persistence(&dest, e))?;
                    pending.push(sub);
                }
                DirEntry::File(file) => {
                    if let Some(parent) = dest.parent() {
                        fs::create_dir_all(parent)
                            .await
                            .map_err(|e| DomainError::persistence(parent, e))?;
                    }
                    fs::write(&dest, file.contents())
                        .await
                        .map_err(|e| DomainError::persistence(&dest, e))?;
                    copied += 1;
                }
            }
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_copies_template() {
        let dir = TempDir::new().unwrap();

        let target = ScaffoldService::new().init(dir.path(), None).await.unwrap();

        assert_eq!(target, dir.path().join(".cursor"));
        assert!(target.join("rules.md").is_file());
        assert!(target.join("tasks/README.md").is_file());
        assert!(!target.join(PROJECT_DESCRIPTION_FILE).exists());
    }

    #[tokio::test]
    async fn test_init_overwrites_and_writes_description() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".cursor")).unwrap();
        std::fs::write(dir.path().join(".cursor/rules.md"), "old").unwrap();
        std::fs::write(dir.path().join(".cursor/keep.md"), "mine").unwrap();

        let target = ScaffoldService::new()
            .init(dir.path(), Some("  A todo app  "))
            .await
            .unwrap();

        assert_ne!(std::fs::read_to_string(target.join("rules.md")).unwrap(), "old");
        assert_eq!(std::fs::read_to_string(target.join("keep.md")).unwrap(), "mine");
        assert_eq!(
            std::fs::read_to_string(target.join(PROJECT_DESCRIPTION_FILE)).unwrap(),
            "# Project\n\nA todo app\n"
        );
    }
}
