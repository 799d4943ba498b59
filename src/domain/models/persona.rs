//! Persona domain model.
//!
//! A persona is a named agent role with fixed framing text. The registry is
//! built once at startup and handed to the compiler and the dispatcher by
//! reference; nothing mutates it afterwards.

use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};

/// Placeholder replaced by the raw task text in a persona's task template.
pub const TASK_PLACEHOLDER: &str = "{task}";

/// A named agent role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    /// Registry key, also the file stem of the persona's task document.
    pub name: String,
    /// Short framing instruction rendered in the PROMPT section.
    pub prompt: String,
    /// Output format directives rendered in the INSTRUCTIONS section.
    pub instructions: String,
    /// System role message sent to the provider.
    pub system_prompt: String,
    /// Structural wrapper the task text is substituted into.
    pub task_template: Option<String>,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        instructions: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            instructions: instructions.into(),
            system_prompt: system_prompt.into(),
            task_template: None,
        }
    }

    pub fn with_task_template(mut self, template: impl Into<String>) -> Self {
        self.task_template = Some(template.into());
        self
    }

    /// Render the task text for this persona.
    ///
    /// The placeholder is replaced exactly once; the substituted text is never
    /// rescanned. A template without a placeholder gets the task appended so
    /// the task text is never dropped.
    pub fn render_task(&self, task: &str) -> String {
        match &self.task_template {
            Some(template) if template.contains(TASK_PLACEHOLDER) => {
                template.replacen(TASK_PLACEHOLDER, task, 1)
            }
            Some(template) => format!("{template}\n{task}"),
            None => task.to_string(),
        }
    }

    /// Title-cased name used in task document headers (`architect` -> `Architect`).
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Title-case a persona name.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Immutable lookup table of personas, in declaration order.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Build a registry from an explicit persona table.
    ///
    /// Later entries with a duplicate name are ignored.
    pub fn new(personas: impl IntoIterator<Item = Persona>) -> Self {
        let mut unique: Vec<Persona> = Vec::new();
        for persona in personas {
            if !unique.iter().any(|p| p.name == persona.name) {
                unique.push(persona);
            }
        }
        Self { personas: unique }
    }

    /// Registry with the built-in personas.
    pub fn builtin() -> Self {
        Self::new(super::personas::builtin_personas())
    }

    /// Look up a persona by name.
    pub fn get(&self, name: &str) -> DomainResult<&Persona> {
        self.personas
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainError::UnknownPersona {
                name: name.to_string(),
                valid: self.names(),
            })
    }

    /// Valid persona names, in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.personas.iter().map(|p| p.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
