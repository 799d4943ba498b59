//! cursor-tools - task context compiler and agent plan generator
//!
//! Accepts MCP tool calls over stdio, compiles a task description, a
//! codebase snapshot and project rules into one document, asks an LLM
//! persona for an implementation plan, and writes the plan under `.cursor/`.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): personas, compiled templates, errors and port traits
//! - **Adapters** (`adapters`): LLM providers, filesystem snapshot, task persistence, MCP stdio server
//! - **Service Layer** (`services`): rules loading, template compilation, provider fallback, the agent task pipeline
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, packaged assets
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::mcp::StdioServer;
pub use domain::models::{
    CompiledTemplate, CompletionRequest, Config, Persona, PersonaRegistry, ProviderConfig,
    ProviderKind, TaskLayout,
};
pub use domain::{DomainError, DomainResult, Stage};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AgentTaskService, CompileRequest, CompletionService, TemplateCompiler};
