//! Adapters implementing the domain ports.

pub mod mcp;
pub mod persistence;
pub mod providers;
pub mod snapshot;
