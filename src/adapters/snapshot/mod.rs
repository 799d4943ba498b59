//! Codebase snapshot implementations.

pub mod fs_snapshot;

pub use fs_snapshot::{FsSnapshotProvider, DEFAULT_IGNORES};
