use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, relative to the working directory
pub const PROJECT_CONFIG_PATH: &str = ".cursor/tools.yaml";

/// Local overrides, relative to the working directory
pub const LOCAL_CONFIG_PATH: &str = ".cursor/tools.local.yaml";

/// Prefix for environment overrides (`CURSOR_TOOLS_LOGGING__LEVEL=debug`)
pub const ENV_PREFIX: &str = "CURSOR_TOOLS_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("At least one completion provider must be configured")]
    NoProviders,

    #[error("Provider {index} ({kind}): model name cannot be empty")]
    EmptyModel { index: usize, kind: String },

    #[error("Provider {index} ({kind}): max_tokens must be at least 1")]
    InvalidMaxTokens { index: usize, kind: String },

    #[error("Provider {index} ({kind}): timeout_secs must be at least 1")]
    InvalidTimeout { index: usize, kind: String },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .cursor/tools.yaml (project config)
    /// 3. .cursor/tools.local.yaml (local overrides, optional)
    /// 4. Environment variables (CURSOR_TOOLS_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(PROJECT_CONFIG_PATH))
            .merge(Yaml::file(LOCAL_CONFIG_PATH))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }

        for (index, provider) in config.providers.iter().enumerate() {
            let kind = provider.kind.to_string();
            if provider.model().trim().is_empty() {
                return Err(ConfigError::EmptyModel { index, kind });
            }
            if provider.max_tokens == 0 {
                return Err(ConfigError::InvalidMaxTokens { index, kind });
            }
            if provider.timeout_secs == 0 {
                return Err(ConfigError::InvalidTimeout { index, kind });
            }
        }

        for pattern in &config.snapshot.extra_ignores {
            if pattern.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "snapshot.extra_ignores cannot contain empty patterns".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ProviderConfig, ProviderKind, TaskLayout};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.tasks.layout, TaskLayout::Directory);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r"
logging:
  level: debug
tasks:
  layout: shared_file
providers:
  - kind: mock
snapshot:
  extra_ignores: [dist]
"
        )
        .unwrap();

        let config = temp_env::with_var_unset("CURSOR_TOOLS_LOGGING__LEVEL", || {
            ConfigLoader::load_from_file(file.path()).expect("config should load")
        });

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.tasks.layout, TaskLayout::SharedFile);
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].kind, ProviderKind::Mock);
        assert_eq!(config.snapshot.extra_ignores, vec!["dist".to_string()]);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: debug").unwrap();

        let config = temp_env::with_var("CURSOR_TOOLS_LOGGING__LEVEL", Some("warn"), || {
            ConfigLoader::load_from_file(file.path()).expect("config should load")
        });

        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_no_providers() {
        let mut config = Config::default();
        config.providers.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::NoProviders)
        ));
    }

    #[test]
    fn test_invalid_provider_entries() {
        let mut config = Config::default();
        config.providers = vec![ProviderConfig::new(ProviderKind::OpenAi).with_model("  ")];
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyModel { index: 0, .. })
        ));

        let mut provider = ProviderConfig::new(ProviderKind::Anthropic);
        provider.max_tokens = 0;
        config.providers = vec![provider];
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxTokens { .. })
        ));

        let mut provider = ProviderConfig::new(ProviderKind::Anthropic);
        provider.timeout_secs = 0;
        config.providers = vec![provider];
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }
}
