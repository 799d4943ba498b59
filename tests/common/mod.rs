//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use cursor_tools::adapters::mcp::StdioServer;
use cursor_tools::adapters::persistence::task_store_for;
use cursor_tools::adapters::snapshot::FsSnapshotProvider;
use cursor_tools::domain::models::{PersonaRegistry, TaskLayout};
use cursor_tools::domain::ports::CompletionProvider;
use cursor_tools::services::{
    AgentTaskService, CompletionService, RulesLoader, ScaffoldService, TemplateCompiler,
};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(path, content).expect("Failed to write fixture");
}

/// A small project tree with source files, a gitignored file and project rules.
pub fn sample_project() -> TempDir {
    let dir = temp_dir();
    write_file(dir.path(), "src/main.rs", "fn main() {\n    println!(\"hello\");\n}\n");
    write_file(dir.path(), "src/theme.rs", "pub struct Theme;\n");
    write_file(dir.path(), ".gitignore", "secrets.env\n");
    write_file(dir.path(), "secrets.env", "API_KEY=nope\n");
    write_file(dir.path(), ".cursor/rules.md", "  Use Rust 2021.  \n  Keep functions small.\n");
    dir
}

/// Agent task pipeline over the real filesystem adapters with the given providers.
pub fn agent_service(
    root: &Path,
    providers: Vec<Arc<dyn CompletionProvider>>,
    layout: TaskLayout,
) -> AgentTaskService {
    let compiler = TemplateCompiler::new(
        Arc::new(FsSnapshotProvider::new()),
        RulesLoader::new(),
        Arc::new(PersonaRegistry::builtin()),
        root,
    );
    AgentTaskService::new(
        compiler,
        CompletionService::new(providers),
        task_store_for(layout, root),
    )
}

/// Stdio server over [`agent_service`].
pub fn stdio_server(root: &Path, providers: Vec<Arc<dyn CompletionProvider>>) -> Arc<StdioServer> {
    Arc::new(StdioServer::new(
        agent_service(root, providers, TaskLayout::Directory),
        ScaffoldService::new(),
    ))
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// JSON-RPC `tools/call` request line.
pub fn tool_call(id: u64, name: &str, arguments: serde_json::Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
    .to_string()
}
