//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cursor-tools")]
#[command(about = "MCP stdio server that turns task descriptions into agent implementation plans", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of `.cursor/tools.yaml`
    #[arg(short, long, global = true, env = "CURSOR_TOOLS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root for snapshots, rules and task output
    #[arg(short = 'C', long, global = true)]
    pub work_dir: Option<PathBuf>,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP stdio server
    Serve,

    /// List the available agent personas
    Personas,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::parse_from(["cursor-tools"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["cursor-tools", "personas", "--json", "-C", "/tmp/project"]);
        assert_eq!(cli.command(), Commands::Personas);
        assert!(cli.json);
        assert_eq!(cli.work_dir, Some(PathBuf::from("/tmp/project")));
    }
}
