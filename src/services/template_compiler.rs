//! Template compiler - assembles the document sent to a completion provider.
//!
//! Layout:
//!
//! ```text
//! <TEMPLATE>
//!   <CODEBASE>
//!     ...
//!   </CODEBASE>
//!
//!   <RULES>
//!     ...
//!   </RULES>
//!   ...
//! </TEMPLATE>
//! ```
//!
//! Sections appear in [`SectionKind::ORDER`]. Only the rules text is
//! normalized (each line trimmed and re-indented); everything else is
//! inserted as-is.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CompiledTemplate, Persona, PersonaRegistry, SectionKind};
use crate::domain::ports::snapshot::extract_files_section;
use crate::domain::ports::{SnapshotProvider, SnapshotScope};
use crate::services::rules_loader::RulesLoader;

const SECTION_INDENT: &str = "  ";
const CONTENT_INDENT: &str = "    ";

/// Inputs for one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileRequest {
    pub task: String,
    pub persona: String,
    /// Files to snapshot, relative to the work dir. `None` snapshots the whole tree.
    pub files: Option<Vec<String>>,
    /// Explicit rules document, relative to the work dir.
    pub rules_path: Option<PathBuf>,
    /// Additional rules appended after the rules document.
    pub extra_rules: Vec<String>,
}

impl CompileRequest {
    pub fn new(task: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            persona: persona.into(),
            ..Default::default()
        }
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn with_rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = Some(path.into());
        self
    }

    pub fn with_extra_rules(mut self, rules: Vec<String>) -> Self {
        self.extra_rules = rules;
        self
    }
}

/// Builds [`CompiledTemplate`]s from a snapshot, rules and a persona.
#[derive(Clone)]
pub struct TemplateCompiler {
    snapshot: Arc<dyn SnapshotProvider>,
    rules: RulesLoader,
    registry: Arc<PersonaRegistry>,
    work_dir: PathBuf,
}

impl TemplateCompiler {
    pub fn new(
        snapshot: Arc<dyn SnapshotProvider>,
        rules: RulesLoader,
        registry: Arc<PersonaRegistry>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            snapshot,
            rules,
            registry,
            work_dir: work_dir.into(),
        }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub fn work_dir(&self) -> &std::path::Path {
        &self.work_dir
    }

    /// Compile a request into a single document.
    ///
    /// The persona is resolved before any filesystem work so an unknown name
    /// fails without touching the tree.
    #[tracing::instrument(skip(self, request), fields(persona = %request.persona))]
    pub async fn compile(&self, request: &CompileRequest) -> DomainResult<CompiledTemplate> {
        let persona = self.registry.get(&request.persona)?;

        let scope = SnapshotScope::from_files(request.files.clone());
        let snapshot = self.snapshot.snapshot(&self.work_dir, &scope).await?;
        let codebase = extract_files_section(&snapshot);

        let rules = self
            .rules
            .load(&self.work_dir, request.rules_path.as_deref())
            .await?;

        let task = persona.render_task(&request.task);
        let content = render_document(persona, codebase, &rules, &request.extra_rules, &task);

        tracing::debug!(bytes = content.len(), "template compiled");
        Ok(CompiledTemplate::new(persona.name.clone(), content))
    }
}

/// Trim every rules line and re-indent continuation lines.
pub fn normalize_rules(rules: &str, extra: &[String]) -> String {
    rules
        .split('\n')
        .chain(extra.iter().flat_map(|rule| rule.split('\n')))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(&format!("\n{CONTENT_INDENT}"))
}

fn render_document(
    persona: &Persona,
    codebase: &str,
    rules: &str,
    extra_rules: &[String],
    task: &str,
) -> String {
    let rules = normalize_rules(rules, extra_rules);
    let sections = SectionKind::ORDER.map(|kind| {
        let body = match kind {
            SectionKind::Codebase => codebase,
            SectionKind::Rules => rules.as_str(),
            SectionKind::Task => task,
            SectionKind::Instructions => persona.instructions.as_str(),
            SectionKind::Prompt => persona.prompt.as_str(),
        };
        let tag = kind.tag();
        format!("{SECTION_INDENT}<{tag}>\n{CONTENT_INDENT}{body}\n{SECTION_INDENT}</{tag}>")
    });

    format!("<TEMPLATE>\n{}\n</TEMPLATE>", sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Snapshot double that records the scope it was asked for.
    struct FixedSnapshot {
        output: String,
        scopes: Mutex<Vec<SnapshotScope>>,
    }

    impl FixedSnapshot {
        fn new(output: &str) -> Self {
            Self {
                output: output.to_string(),
                scopes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SnapshotProvider for FixedSnapshot {
        async fn snapshot(&self, _root: &Path, scope: &SnapshotScope) -> DomainResult<String> {
            self.scopes.lock().unwrap().push(scope.clone());
            Ok(self.output.clone())
        }
    }

    fn compiler(dir: &TempDir, snapshot: Arc<FixedSnapshot>) -> TemplateCompiler {
        std::fs::create_dir_all(dir.path().join(".cursor")).unwrap();
        std::fs::write(dir.path().join(".cursor/rules.md"), "  rule one  \n\trule two").unwrap();
        TemplateCompiler::new(
            snapshot,
            RulesLoader::new(),
            Arc::new(PersonaRegistry::builtin()),
            dir.path(),
        )
    }

    #[tokio::test]
    async fn test_compile_sections_in_order() {
        let dir = TempDir::new().unwrap();
        let snapshot = Arc::new(FixedSnapshot::new(
            "<file_summary/>\n<files>\n<file path=\"a.rs\">fn a() {}</file>\n</files>",
        ));
        let compiler = compiler(&dir, snapshot.clone());

        let doc = compiler
            .compile(&CompileRequest::new("Add dark mode toggle", "architect"))
            .await
            .unwrap();

        let positions: Vec<usize> = SectionKind::ORDER
            .iter()
            .map(|kind| doc.content.find(&format!("<{}>", kind.tag())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(
            doc.section(SectionKind::Codebase),
            Some("<file path=\"a.rs\">fn a() {}</file>")
        );
        assert_eq!(doc.section(SectionKind::Rules), Some("rule one\n    rule two"));
        assert_eq!(doc.section(SectionKind::Task), Some("Add dark mode toggle"));
        assert!(doc.content.starts_with("<TEMPLATE>\n  <CODEBASE>\n    "));
        assert!(doc.content.ends_with("  </PROMPT>\n</TEMPLATE>"));
        assert_eq!(*snapshot.scopes.lock().unwrap(), vec![SnapshotScope::WholeTree]);
    }

    #[tokio::test]
    async fn test_compile_uses_raw_snapshot_without_delimiter() {
        let dir = TempDir::new().unwrap();
        let compiler = compiler(&dir, Arc::new(FixedSnapshot::new("raw listing")));

        let doc = compiler
            .compile(&CompileRequest::new("task", "engineer").with_files(vec!["src/a.rs".into()]))
            .await
            .unwrap();

        assert_eq!(doc.section(SectionKind::Codebase), Some("raw listing"));
    }

    #[tokio::test]
    async fn test_designer_task_is_wrapped_in_rubric() {
        let dir = TempDir::new().unwrap();
        let compiler = compiler(&dir, Arc::new(FixedSnapshot::new("")));

        let doc = compiler
            .compile(&CompileRequest::new("Redesign the settings page {task}", "designer"))
            .await
            .unwrap();

        let task = doc.section(SectionKind::Task).unwrap();
        assert!(task.starts_with("Redesign the settings page {task}"));
        assert!(task.contains("DESIGN_RUBRIC"));
    }

    #[tokio::test]
    async fn test_extra_rules_are_appended_and_trimmed() {
        let dir = TempDir::new().unwrap();
        let compiler = compiler(&dir, Arc::new(FixedSnapshot::new("")));

        let doc = compiler
            .compile(
                &CompileRequest::new("task", "architect")
                    .with_extra_rules(vec!["  no new deps ".to_string()]),
            )
            .await
            .unwrap();

        assert_eq!(
            doc.section(SectionKind::Rules),
            Some("rule one\n    rule two\n    no new deps")
        );
    }

    #[tokio::test]
    async fn test_unknown_persona_skips_snapshot() {
        let dir = TempDir::new().unwrap();
        let snapshot = Arc::new(FixedSnapshot::new(""));
        let compiler = compiler(&dir, snapshot.clone());

        let err = compiler
            .compile(&CompileRequest::new("task", "wizard"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::UnknownPersona { .. }));
        assert!(snapshot.scopes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_normalize_rules() {
        assert_eq!(normalize_rules(" a \n  b", &[]), "a\n    b");
        assert_eq!(normalize_rules("a", &["b\n c".to_string()]), "a\n    b\n    c");
    }

    proptest! {
        #[test]
        fn prop_compile_is_deterministic(
            task in "[a-zA-Z0-9 .,{}]{1,80}",
            code in "[a-zA-Z0-9 \n]{0,120}",
            persona in prop::sample::select(vec!["architect", "designer", "engineer", "planner"]),
        ) {
            let dir = TempDir::new().unwrap();
            let output = format!("<files>\n{code}\n</files>");
            let compiler = compiler(&dir, Arc::new(FixedSnapshot::new(&output)));
            let request = CompileRequest::new(task.clone(), persona);

            let first = tokio_test::block_on(compiler.compile(&request)).unwrap();
            let second = tokio_test::block_on(compiler.compile(&request)).unwrap();

            prop_assert_eq!(&first, &second);
            prop_assert!(first.content.contains(code.trim()));
            prop_assert!(first.content.contains(&task));
        }
    }
}
