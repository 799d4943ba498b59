//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing-subscriber)
//! - Assets compiled into the binary

pub mod assets;
pub mod config;
pub mod logging;
