//! Service layer: the agent task pipeline and its stages.

pub mod agent_task_service;
pub mod completion_service;
pub mod rules_loader;
pub mod scaffold_service;
pub mod template_compiler;

pub use agent_task_service::{AgentTaskOutcome, AgentTaskService};
pub use completion_service::CompletionService;
pub use rules_loader::RulesLoader;
pub use scaffold_service::ScaffoldService;
pub use template_compiler::{CompileRequest, TemplateCompiler};
