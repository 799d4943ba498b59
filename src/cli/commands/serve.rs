//! `serve` command: wire the pipeline from configuration and run the stdio server.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::mcp::StdioServer;
use crate::adapters::persistence::task_store_for;
use crate::adapters::providers::ProviderRegistry;
use crate::adapters::snapshot::FsSnapshotProvider;
use crate::domain::models::{Config, PersonaRegistry};
use crate::services::{
    AgentTaskService, CompletionService, RulesLoader, ScaffoldService, TemplateCompiler,
};

/// Build the server for a configuration.
pub fn build_server(config: &Config, registry: Arc<PersonaRegistry>) -> Result<StdioServer> {
    let work_dir = config
        .resolved_work_dir()
        .context("Failed to resolve working directory")?;

    let snapshot = FsSnapshotProvider::new().with_extra_ignores(config.snapshot.extra_ignores.clone());
    let rules = match &config.rules.default_path {
        Some(path) => RulesLoader::new().with_default_path(path),
        None => RulesLoader::new(),
    };
    let compiler = TemplateCompiler::new(Arc::new(snapshot), rules, registry, &work_dir);

    let providers = ProviderRegistry::build_chain(&config.providers)
        .context("Failed to build completion providers")?;
    let completion = CompletionService::new(providers);

    let store = task_store_for(config.tasks.layout, &work_dir);

    tracing::info!(
        work_dir = %work_dir.display(),
        providers = ?completion.provider_names(),
        layout = store.layout(),
        "pipeline configured"
    );

    let agent_tasks = AgentTaskService::new(compiler, completion, store);
    Ok(StdioServer::new(agent_tasks, ScaffoldService::new()))
}

pub async fn execute(config: &Config) -> Result<()> {
    let server = build_server(config, Arc::new(PersonaRegistry::builtin()))?;
    Arc::new(server).run().await
}
