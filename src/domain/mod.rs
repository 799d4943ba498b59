//! Domain layer for cursor-tools
//!
//! Personas, compiled documents, configuration, the error taxonomy, and the
//! port traits the adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, ProviderFailure, Stage};
