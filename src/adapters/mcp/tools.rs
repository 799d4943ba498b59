//! Tool catalogue and argument parsing for the stdio server.

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::PersonaRegistry;

pub const AGENT_TASK: &str = "agent_task";
/// Names earlier clients used for `agent_task`.
pub const AGENT_TASK_ALIASES: &[&str] = &["architect", "agent"];
pub const INIT_CURSOR: &str = "init_cursor";

/// Persona used when a call names none.
pub const DEFAULT_PERSONA: &str = "architect";

/// Why a `tools/call` could not be turned into a [`ToolCall`].
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Arguments of `agent_task`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentTaskArgs {
    pub task: String,
    #[serde(default)]
    pub code: Option<Vec<String>>,
    #[serde(default)]
    pub rules: Option<Vec<String>>,
    #[serde(default)]
    pub agent: Option<String>,
    /// Rules document, relative to the work dir. A non-empty
    /// `.cursor/rules.md` still takes precedence.
    #[serde(default, rename = "rulesPath")]
    pub rules_path: Option<String>,
}

impl AgentTaskArgs {
    pub fn persona(&self) -> &str {
        self.agent.as_deref().unwrap_or(DEFAULT_PERSONA)
    }
}

/// Arguments of `init_cursor`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitCursorArgs {
    pub destination_path: String,
    #[serde(default)]
    pub project_description: Option<String>,
}

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    AgentTask(AgentTaskArgs),
    InitCursor(InitCursorArgs),
}

impl ToolCall {
    /// Validate `arguments` against the named tool's schema.
    ///
    /// The persona is checked here so an unknown name never reaches the
    /// pipeline.
    pub fn parse(name: &str, arguments: Value, registry: &PersonaRegistry) -> Result<Self, ToolError> {
        let arguments = match arguments {
            Value::Null => json!({}),
            other => other,
        };

        if name == AGENT_TASK || AGENT_TASK_ALIASES.contains(&name) {
            let args: AgentTaskArgs = parse_args(arguments)?;
            if args.task.trim().is_empty() {
                return Err(DomainError::Validation("task must not be empty".to_string()).into());
            }
            registry.get(args.persona())?;
            Ok(Self::AgentTask(args))
        } else if name == INIT_CURSOR {
            let args: InitCursorArgs = parse_args(arguments)?;
            if args.destination_path.trim().is_empty() {
                return Err(
                    DomainError::Validation("destinationPath must not be empty".to_string()).into(),
                );
            }
            Ok(Self::InitCursor(args))
        } else {
            Err(ToolError::UnknownTool(name.to_string()))
        }
    }

    /// Canonical tool name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AgentTask(_) => AGENT_TASK,
            Self::InitCursor(_) => INIT_CURSOR,
        }
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(arguments: Value) -> DomainResult<T> {
    Ok(serde_json::from_value(arguments)?)
}

/// Prefix of a failed tool's text, by tool.
pub fn failure_prefix(tool: &str) -> &'static str {
    if tool == INIT_CURSOR {
        "Failed to initialize cursor-template"
    } else {
        "Failed to generate implementation steps"
    }
}

/// Failure payload text: `<prefix>: <stage>: <message>`.
pub fn failure_text(tool: &str, err: &DomainError) -> String {
    format!("{}: {}: {err}", failure_prefix(tool), err.stage())
}

/// `tools/list` result.
pub fn tool_definitions(registry: &PersonaRegistry) -> Value {
    json!({
        "tools": [
            {
                "name": AGENT_TASK,
                "description": "Analyzes a task description and codebase to generate detailed implementation steps, written to .cursor/tasks/<agent>.md.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "task": { "type": "string", "description": "Task description" },
                        "code": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Array of files to analyze, relative to the project root. Omit to snapshot the whole project."
                        },
                        "rules": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Additional rules appended to the project rules"
                        },
                        "rulesPath": {
                            "type": "string",
                            "description": "Rules markdown file, relative to the project root. Used when .cursor/rules.md is absent or empty"
                        },
                        "agent": {
                            "type": "string",
                            "enum": registry.names(),
                            "default": DEFAULT_PERSONA,
                            "description": "Agent type"
                        }
                    },
                    "required": ["task"]
                }
            },
            {
                "name": INIT_CURSOR,
                "description": "Initializes the cursor-template directory in a new project by copying template files",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "destinationPath": {
                            "type": "string",
                            "description": "Full path where the template should be copied"
                        },
                        "projectDescription": {
                            "type": "string",
                            "description": "Short description of the project, saved to .cursor/project.md"
                        }
                    },
                    "required": ["destinationPath"]
                }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PersonaRegistry {
        PersonaRegistry::builtin()
    }

    #[test]
    fn test_parse_agent_task_defaults() {
        let call = ToolCall::parse(AGENT_TASK, json!({ "task": "Add dark mode toggle" }), &registry()).unwrap();
        let ToolCall::AgentTask(args) = call else {
            panic!("expected agent_task");
        };
        assert_eq!(args.persona(), "architect");
        assert_eq!(args.code, None);
        assert_eq!(args.rules_path, None);
    }

    #[test]
    fn test_parse_rules_path() {
        let call = ToolCall::parse(
            AGENT_TASK,
            json!({ "task": "x", "rulesPath": "docs/rules.md" }),
            &registry(),
        )
        .unwrap();
        let ToolCall::AgentTask(args) = call else {
            panic!("expected agent_task");
        };
        assert_eq!(args.rules_path.as_deref(), Some("docs/rules.md"));
    }

    #[test]
    fn test_aliases_map_to_agent_task() {
        for alias in AGENT_TASK_ALIASES {
            let call = ToolCall::parse(alias, json!({ "task": "x" }), &registry()).unwrap();
            assert_eq!(call.name(), AGENT_TASK);
        }
    }

    #[test]
    fn test_missing_task_is_validation_error() {
        let err = ToolCall::parse(AGENT_TASK, Value::Null, &registry()).unwrap_err();
        let ToolError::Domain(err) = err else {
            panic!("expected domain error");
        };
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().contains("task"));
    }

    #[test]
    fn test_wrong_type_is_validation_error() {
        let err = ToolCall::parse(AGENT_TASK, json!({ "task": "x", "code": "src/a.rs" }), &registry())
            .unwrap_err();
        assert!(matches!(err, ToolError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn test_unknown_persona_lists_valid_names() {
        let err = ToolCall::parse(AGENT_TASK, json!({ "task": "x", "agent": "wizard" }), &registry())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("wizard"));
        assert!(message.contains("architect, designer, engineer, planner"));
    }

    #[test]
    fn test_parse_init_cursor() {
        let call = ToolCall::parse(
            INIT_CURSOR,
            json!({ "destinationPath": "/tmp/project", "projectDescription": "A todo app" }),
            &registry(),
        )
        .unwrap();
        assert_eq!(
            call,
            ToolCall::InitCursor(InitCursorArgs {
                destination_path: "/tmp/project".to_string(),
                project_description: Some("A todo app".to_string()),
            })
        );
    }

    #[test]
    fn test_unknown_tool() {
        let err = ToolCall::parse("screenshot", json!({}), &registry()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: screenshot");
    }

    #[test]
    fn test_failure_text_names_stage() {
        let err = DomainError::resource("rules", "not found");
        assert_eq!(
            failure_text(AGENT_TASK, &err),
            "Failed to generate implementation steps: resources: Failed to read rules: not found"
        );
        assert!(failure_text(INIT_CURSOR, &err).starts_with("Failed to initialize cursor-template: "));
    }

    #[test]
    fn test_tool_definitions_enumerate_personas() {
        let tools = tool_definitions(&registry());
        let names: Vec<&str> = tools["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec![AGENT_TASK, INIT_CURSOR]);
        assert_eq!(
            tools["tools"][0]["inputSchema"]["properties"]["agent"]["enum"],
            json!(["architect", "designer", "engineer", "planner"])
        );
    }
}
