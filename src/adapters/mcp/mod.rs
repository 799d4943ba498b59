//! MCP (Model Context Protocol) stdio adapter.
//!
//! Exposes `agent_task` and `init_cursor` as tools over newline-delimited
//! JSON-RPC on stdin/stdout.

pub mod stdio_server;
pub mod tools;

pub use stdio_server::StdioServer;
pub use tools::{AgentTaskArgs, InitCursorArgs, ToolCall, ToolError};
