//! Agent task pipeline: compile, complete, persist.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::CompletionRequest;
use crate::domain::ports::TaskPersistence;
use crate::services::completion_service::CompletionService;
use crate::services::template_compiler::{CompileRequest, TemplateCompiler};

/// Result of a successful agent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTaskOutcome {
    pub persona: String,
    /// Provider that produced the plan.
    pub provider: String,
    /// Where the plan was written.
    pub path: PathBuf,
}

impl AgentTaskOutcome {
    /// Text returned to the caller.
    pub fn message(&self) -> String {
        format!(
            "Generated {} implementation steps in {}",
            self.persona,
            self.path.display()
        )
    }
}

/// Turns a task description into a persisted implementation plan.
#[derive(Clone)]
pub struct AgentTaskService {
    compiler: TemplateCompiler,
    completion: CompletionService,
    store: Arc<dyn TaskPersistence>,
}

impl AgentTaskService {
    pub fn new(
        compiler: TemplateCompiler,
        completion: CompletionService,
        store: Arc<dyn TaskPersistence>,
    ) -> Self {
        Self {
            compiler,
            completion,
            store,
        }
    }

    pub fn compiler(&self) -> &TemplateCompiler {
        &self.compiler
    }

    /// Run the pipeline. Each stage's error keeps its own [`Stage`](crate::domain::Stage).
    pub async fn run(&self, request: CompileRequest) -> DomainResult<AgentTaskOutcome> {
        if request.task.trim().is_empty() {
            return Err(DomainError::Validation("task must not be empty".to_string()));
        }

        let template = self.compiler.compile(&request).await?;
        let persona = self.compiler.registry().get(&template.persona)?;

        let completion = CompletionRequest::new(persona.system_prompt.clone(), template.content);
        let response = self.completion.complete(&completion).await?;

        let path = self.store.save(&persona.name, &response.text).await?;
        tracing::info!(
            persona = %persona.name,
            provider = %response.provider,
            layout = self.store.layout(),
            path = %path.display(),
            "agent task complete"
        );

        Ok(AgentTaskOutcome {
            persona: persona.name.clone(),
            provider: response.provider,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::{DirectoryTaskStore, SharedFileTaskStore};
    use crate::adapters::providers::MockProvider;
    use crate::adapters::snapshot::FsSnapshotProvider;
    use crate::domain::models::PersonaRegistry;
    use crate::services::rules_loader::RulesLoader;
    use tempfile::TempDir;

    fn service(
        dir: &TempDir,
        provider: Arc<MockProvider>,
        store: Arc<dyn TaskPersistence>,
    ) -> AgentTaskService {
        let compiler = TemplateCompiler::new(
            Arc::new(FsSnapshotProvider::new()),
            RulesLoader::new(),
            Arc::new(PersonaRegistry::builtin()),
            dir.path(),
        );
        AgentTaskService::new(compiler, CompletionService::new(vec![provider]), store)
    }

    #[tokio::test]
    async fn test_run_writes_plan_and_reports_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        let provider = Arc::new(MockProvider::succeeding("mock", "- [ ] step"));
        let service = service(&dir, provider.clone(), Arc::new(DirectoryTaskStore::new(dir.path())));

        let outcome = service
            .run(CompileRequest::new("Add dark mode toggle", "engineer"))
            .await
            .unwrap();

        assert_eq!(outcome.path, dir.path().join(".cursor/tasks/engineer.md"));
        assert_eq!(std::fs::read_to_string(&outcome.path).unwrap(), "- [ ] step");
        assert!(outcome.message().contains(".cursor/tasks/engineer.md"));

        let sent = provider.last_request().unwrap();
        assert!(sent.document.contains("fn main() {}"));
        assert!(sent.system_prompt.ends_with(crate::domain::models::personas::CLOSING_DIRECTIVE));
    }

    #[tokio::test]
    async fn test_blank_task_is_rejected_before_completion() {
        let dir = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::default());
        let service = service(&dir, provider.clone(), Arc::new(SharedFileTaskStore::new(dir.path())));

        let err = service.run(CompileRequest::new("   ", "architect")).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_listed_file_fails_in_resources_stage() {
        let dir = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::default());
        let service = service(&dir, provider.clone(), Arc::new(DirectoryTaskStore::new(dir.path())));

        let err = service
            .run(CompileRequest::new("task", "architect").with_files(vec!["missing.rs".into()]))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), crate::domain::Stage::Resources);
        assert!(err.to_string().contains("missing.rs"));
        assert_eq!(provider.calls(), 0);
    }
}
