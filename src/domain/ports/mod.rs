//! Port trait definitions (Hexagonal Architecture)
//!
//! - CompletionProvider: one LLM backend
//! - SnapshotProvider: serializes source files into one document
//! - TaskPersistence: writes task documents to disk

pub mod completion_provider;
pub mod snapshot;
pub mod task_persistence;

pub use completion_provider::CompletionProvider;
pub use snapshot::{SnapshotProvider, SnapshotScope};
pub use task_persistence::TaskPersistence;
