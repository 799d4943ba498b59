//! cursor-tools entry point.

use clap::Parser;

use cursor_tools::cli::{self, Cli, Commands};
use cursor_tools::domain::models::{Config, PersonaRegistry};
use cursor_tools::infrastructure::config::ConfigLoader;
use cursor_tools::infrastructure::logging::{LogConfig, LoggerImpl};

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(work_dir) = &cli.work_dir {
        config.work_dir = Some(work_dir.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = load_config(&cli);
    let log_config = config
        .as_ref()
        .map(|c| LogConfig::from(&c.logging))
        .unwrap_or_default();

    // Held until exit so buffered file logs are flushed.
    let _logger = match LoggerImpl::init(&log_config) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Failed to initialize logging: {err:#}");
            None
        }
    };

    let config = match config {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let result = match cli.command() {
        Commands::Serve => cli::commands::serve::execute(&config).await,
        Commands::Personas => cli::commands::personas::execute(&PersonaRegistry::builtin(), cli.json),
    };

    if let Err(err) = result {
        cli::handle_error(err, cli.json);
    }
}
