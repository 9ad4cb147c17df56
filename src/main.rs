// Tabula - Clinical Cohort Aggregation Tool
// Copyright (c) 2026 Tabula Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use tabula::cli::{Cli, Commands};
use tabula::config::{load_config, LoggingConfig};
use tabula::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Pull the logging setup from the config file when one is readable;
    // a missing or broken file falls back to console-only defaults and is
    // reported properly by the command itself.
    let (config_log_level, logging_config) = match &cli.command {
        Commands::Init(_) => ("info".to_string(), LoggingConfig::default()),
        _ => match load_config(&cli.config) {
            Ok(c) => (c.application.log_level.clone(), c.logging),
            Err(_) => ("info".to_string(), LoggingConfig::default()),
        },
    };

    let log_level = cli.log_level.clone().unwrap_or(config_log_level);
    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Tabula - Clinical Cohort Aggregation Tool"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
