//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Tabula using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Tabula - Clinical cohort aggregation tool
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(version, about, long_about = None)]
#[command(author = "Tabula Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tabula.toml", env = "TABULA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TABULA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate per-cohort clinical records into one TSV table
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["tabula", "export"]);
        assert_eq!(cli.config, "tabula.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["tabula", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["tabula", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["tabula", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["tabula", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "tabula", "export", "--filter", "TARGET", "--output", "out.tsv", "--yes",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.filter, Some("TARGET".to_string()));
                assert_eq!(args.output, Some("out.tsv".to_string()));
                assert!(args.yes);
            }
            _ => panic!("Expected export command"),
        }
    }
}
