//! `personas` command: list the built-in agent personas.

use anyhow::Result;
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::PersonaRegistry;

const PROMPT_PREVIEW_CHARS: usize = 72;

#[derive(Debug, Serialize)]
pub struct PersonaOutput {
    pub name: String,
    pub prompt: String,
    pub has_task_template: bool,
}

#[derive(Debug, Serialize)]
pub struct PersonaListOutput {
    pub personas: Vec<PersonaOutput>,
}

impl PersonaListOutput {
    pub fn from_registry(registry: &PersonaRegistry) -> Self {
        Self {
            personas: registry
                .iter()
                .map(|p| PersonaOutput {
                    name: p.name.clone(),
                    prompt: p.prompt.clone(),
                    has_task_template: p.task_template.is_some(),
                })
                .collect(),
        }
    }
}

impl CommandOutput for PersonaListOutput {
    fn to_human(&self) -> String {
        if self.personas.is_empty() {
            return "No personas found.".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                ["NAME", "TEMPLATE", "PROMPT"]
                    .iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left)),
            );

        for persona in &self.personas {
            table.add_row(vec![
                Cell::new(&persona.name),
                Cell::new(if persona.has_task_template { "yes" } else { "-" }),
                Cell::new(truncate(persona.prompt.trim(), PROMPT_PREVIEW_CHARS)),
            ]);
        }

        let total = self.personas.len();
        let noun = if total == 1 { "persona" } else { "personas" };
        format!("{total} {noun}:\n{table}")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(registry: &PersonaRegistry, json_mode: bool) -> Result<()> {
    output(&PersonaListOutput::from_registry(registry), json_mode);
    Ok(())
}
