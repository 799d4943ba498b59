//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber. Console output
//! always goes to stderr; stdout carries the protocol stream.

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
