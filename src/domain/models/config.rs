use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::completion::ProviderKind;

/// Main configuration structure for cursor-tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Project root for snapshots, rules and task output (defaults to cwd)
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Completion providers, tried in order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Task output configuration
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Rules document configuration
    #[serde(default)]
    pub rules: RulesConfig,

    /// Codebase snapshot configuration
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: None,
            logging: LoggingConfig::default(),
            providers: default_providers(),
            tasks: TasksConfig::default(),
            rules: RulesConfig::default(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl Config {
    /// Working directory, falling back to the process cwd.
    pub fn resolved_work_dir(&self) -> std::io::Result<PathBuf> {
        match &self.work_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(ProviderKind::OpenAi),
        ProviderConfig::new(ProviderKind::Anthropic),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// A single completion provider entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// Provider type
    pub kind: ProviderKind,

    /// Model name (provider default when unset)
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL (provider default when unset)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key (provider default when unset)
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Max tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_max_tokens() -> u32 {
    4096
}

const fn default_timeout_secs() -> u64 {
    300
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            model: None,
            base_url: None,
            api_key_env: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.kind.default_model().to_string())
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.kind.default_base_url().to_string())
    }

    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| self.kind.default_api_key_env().to_string())
    }
}

/// Where task documents are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskLayout {
    /// One file per persona under `.cursor/tasks/`, plus a redirect in `.cursor/tasks.md`
    #[default]
    Directory,
    /// Every persona appended to `.cursor/tasks.md`
    SharedFile,
}

/// Task output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TasksConfig {
    #[serde(default)]
    pub layout: TaskLayout,
}

/// Rules document configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RulesConfig {
    /// Replaces the packaged default rules document
    #[serde(default)]
    pub default_path: Option<PathBuf>,
}

/// Codebase snapshot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SnapshotConfig {
    /// Patterns excluded in addition to the built-in deny-list
    #[serde(default)]
    pub extra_ignores: Vec<String>,
}
