//! Snapshot provider port - serializes source files into one text document.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Opening delimiter around the file contents of a snapshot.
pub const FILES_OPEN: &str = "<files>";
/// Closing delimiter around the file contents of a snapshot.
pub const FILES_CLOSE: &str = "</files>";

/// Which files a snapshot covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotScope {
    /// The whole tree under the root, honoring ignore rules.
    WholeTree,
    /// Exactly these paths, relative to the root.
    Files(Vec<String>),
}

impl SnapshotScope {
    /// Scope for an optional file list as received from a caller.
    pub fn from_files(files: Option<Vec<String>>) -> Self {
        match files {
            Some(files) => Self::Files(files),
            None => Self::WholeTree,
        }
    }
}

/// Trait for codebase snapshot implementations.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Produce one document enclosing the requested files.
    ///
    /// An explicitly listed path that cannot be read fails the whole snapshot
    /// with an error naming that path.
    async fn snapshot(&self, root: &Path, scope: &SnapshotScope) -> DomainResult<String>;
}

/// Inner content of the files delimiter, or the raw output when absent.
pub fn extract_files_section(output: &str) -> &str {
    let Some(start) = output.find(FILES_OPEN) else {
        return output;
    };
    let inner_start = start + FILES_OPEN.len();
    match output.rfind(FILES_CLOSE) {
        Some(end) if end >= inner_start => output[inner_start..end].trim(),
        _ => output,
    }
}
