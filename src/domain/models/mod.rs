//! Domain models.

pub mod completion;
pub mod config;
pub mod persona;
pub mod personas;
pub mod template;

pub use completion::{CompletionRequest, CompletionResponse, ProviderKind};
pub use config::{
    Config, LoggingConfig, ProviderConfig, RulesConfig, SnapshotConfig, TaskLayout, TasksConfig,
};
pub use persona::{Persona, PersonaRegistry, TASK_PLACEHOLDER};
pub use template::{CompiledTemplate, SectionKind};
