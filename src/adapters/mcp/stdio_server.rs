//! MCP stdio server implementing JSON-RPC 2.0 over stdin/stdout.
//!
//! Protocol: newline-delimited JSON-RPC 2.0 on stdin/stdout.
//! Logging goes to stderr (stdout is reserved for protocol messages).
//!
//! Each inbound line is handled on its own task; a single writer task owns
//! the output stream so responses never interleave.

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::services::template_compiler::CompileRequest;
use crate::services::{AgentTaskService, ScaffoldService};

use super::tools::{self, InitCursorArgs, ToolCall, ToolError};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "cursor-tools";

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INTERNAL_ERROR: i32 = -32603;

/// MCP stdio server exposing the agent task pipeline as tools.
pub struct StdioServer {
    agent_tasks: AgentTaskService,
    scaffold: ScaffoldService,
}

impl StdioServer {
    pub fn new(agent_tasks: AgentTaskService, scaffold: ScaffoldService) -> Self {
        Self {
            agent_tasks,
            scaffold,
        }
    }

    /// Run the stdio server loop, reading JSON-RPC from stdin and writing responses to stdout.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve until `reader` reaches EOF and every in-flight call has answered.
    ///
    /// Only an I/O error on `reader` ends the loop early; a line that is not
    /// UTF-8 is answered with a parse error like any other malformed line.
    pub async fn serve<R, W>(self: Arc<Self>, mut reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        tracing::info!("stdio server started");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding non-UTF-8 input line");
                    let response = error_response(Value::Null, PARSE_ERROR, &format!("Parse error: {e}"));
                    if tx.send(response).is_err() {
                        tracing::warn!("response dropped: writer closed");
                    }
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            let server = Arc::clone(&self);
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    if tx.send(response).is_err() {
                        tracing::warn!("response dropped: writer closed");
                    }
                }
            });
        }

        // The writer finishes once every handler has dropped its sender.
        drop(tx);
        writer_task.await??;

        tracing::info!("stdio server stopped");
        Ok(())
    }

    /// Handle one JSON-RPC line. Notifications produce no response.
    pub async fn handle_message(&self, line: &str) -> Option<String> {
        let request: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                return Some(error_response(Value::Null, PARSE_ERROR, &format!("Parse error: {e}")));
            }
        };

        let id = request.get("id").cloned();
        let method = request
            .get("method")
            .and_then(|m| m.as_str())
            .unwrap_or("")
            .to_string();
        let params = request.get("params").cloned().unwrap_or_else(|| json!({}));

        let dispatched = AssertUnwindSafe(self.dispatch(&method, id.clone(), params))
            .catch_unwind()
            .await;

        match dispatched {
            Ok(response) => response,
            Err(_) => {
                tracing::error!(method = %method, "handler panicked");
                id.map(|id| error_response(id, INTERNAL_ERROR, "Internal error"))
            }
        }
    }

    async fn dispatch(&self, method: &str, id: Option<Value>, params: Value) -> Option<String> {
        if method.starts_with("notifications/") {
            tracing::debug!(method, "notification received");
            return None;
        }
        let id = id.unwrap_or(Value::Null);

        let response = match method {
            "initialize" => self.handle_initialize(id),
            "ping" => success_response(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, &params).await,
            _ => error_response(id, METHOD_NOT_FOUND, &format!("Method not found: {method}")),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Value) -> String {
        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        });
        success_response(id, result)
    }

    fn handle_tools_list(&self, id: Value) -> String {
        let registry = self.agent_tasks.compiler().registry();
        success_response(id, tools::tool_definitions(registry))
    }

    async fn handle_tools_call(&self, id: Value, params: &Value) -> String {
        let tool_name = params
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or("")
            .to_string();
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let span = tracing::info_span!(
            "tool_call",
            tool = %tool_name,
            invocation_id = %Uuid::new_v4()
        );

        let result = AssertUnwindSafe(self.call_tool(&tool_name, arguments))
            .catch_unwind()
            .instrument(span)
            .await
            .unwrap_or_else(|_| {
                tracing::error!(tool = %tool_name, "tool call panicked");
                Err(format!("{}: internal error", tools::failure_prefix(&tool_name)))
            });

        let result = match result {
            Ok(text) => json!({
                "content": [{
                    "type": "text",
                    "text": text
                }]
            }),
            Err(text) => json!({
                "content": [{
                    "type": "text",
                    "text": text
                }],
                "isError": true
            }),
        };
        success_response(id, result)
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, String> {
        let registry = self.agent_tasks.compiler().registry();
        let call = ToolCall::parse(name, arguments, registry).map_err(|e| match e {
            unknown @ ToolError::UnknownTool(_) => {
                tracing::warn!(error = %unknown, "rejected tool call");
                unknown.to_string()
            }
            ToolError::Domain(err) => {
                tracing::warn!(error = %err, "invalid tool arguments");
                tools::failure_text(name, &err)
            }
        })?;

        let tool = call.name();
        let outcome = match call {
            ToolCall::AgentTask(args) => {
                let mut request = CompileRequest::new(args.task.clone(), args.persona());
                request.files = args.code;
                request.extra_rules = args.rules.unwrap_or_default();
                if let Some(path) = args.rules_path {
                    request = request.with_rules_path(path);
                }
                self.agent_tasks.run(request).await.map(|o| o.message())
            }
            ToolCall::InitCursor(args) => self.init_cursor(&args).await,
        };

        outcome.map_err(|err| {
            tracing::error!(stage = %err.stage(), error = %err, "tool call failed");
            tools::failure_text(tool, &err)
        })
    }

    async fn init_cursor(&self, args: &InitCursorArgs) -> crate::domain::DomainResult<String> {
        let destination = self.resolve_destination(&args.destination_path);
        let target = self
            .scaffold
            .init(&destination, args.project_description.as_deref())
            .await?;
        Ok(format!(
            "Successfully initialized cursor-template at {}",
            target.display()
        ))
    }

    /// Relative destinations resolve against the work dir.
    fn resolve_destination(&self, destination: &str) -> PathBuf {
        let path = Path::new(destination);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.agent_tasks.compiler().work_dir().join(path)
        }
    }
}

async fn write_responses<W>(mut rx: mpsc::UnboundedReceiver<String>, mut writer: W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut response_bytes = response.into_bytes();
        response_bytes.push(b'\n');
        writer.write_all(&response_bytes).await?;
        writer.flush().await?;
    }
    Ok(())
}

// ========================================================================
// JSON-RPC helpers
// ========================================================================

fn success_response(id: Value, result: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
    .to_string()
}

fn error_response(id: Value, code: i32, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
    .to_string()
}
