//! Export command implementation
//!
//! This module implements the `export` command: list the cohorts, fetch
//! each one, reconcile the schemas, and write the unified TSV table.

use crate::config::load_config;
use crate::core::harvest::HarvestCoordinator;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - list the cohorts that would be fetched, fetch nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Override the program filter for the cohort catalog
    #[arg(long)]
    pub filter: Option<String>,

    /// Override cohort ID(s) to fetch, bypassing the catalog (comma-separated)
    #[arg(long)]
    pub cohort: Option<String>,

    /// Override the output file path
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(filter) = &self.filter {
            tracing::info!(filter = %filter, "Overriding program filter from CLI");
            config.repository.query.program = filter.clone();
        }

        if let Some(cohorts) = &self.cohort {
            let ids: Vec<String> = cohorts.split(',').map(|s| s.trim().to_string()).collect();
            tracing::info!(cohort_ids = ?ids, "Overriding cohort IDs from CLI");
            config.repository.query.cohort_ids = ids;
        }

        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding output path from CLI");
            config.export.output_path = output.clone();
        }

        // Validate configuration after overrides
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        // Create harvest coordinator
        let coordinator = match HarvestCoordinator::new(config.clone()) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create harvest coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        // Dry run mode: show what would be fetched and stop
        if self.dry_run {
            tracing::info!("Dry run mode enabled - no data will be fetched");
            println!("🔍 DRY RUN MODE - No data will be fetched or written");
            println!();

            let cohorts = match coordinator.cohorts_to_fetch().await {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to list cohorts");
                    eprintln!("Failed to list cohorts: {e}");
                    return Ok(4);
                }
            };

            println!("Would fetch {} cohort(s):", cohorts.len());
            for cohort in &cohorts {
                println!("  - {cohort}");
            }
            println!();
            println!("Output would be written to: {}", config.export.output_path);
            return Ok(0);
        }

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!("  Repository: {}", config.repository.base_url);
            println!(
                "  Cohorts: {}",
                if config.repository.query.cohort_ids.is_empty() {
                    format!("catalog (program = {})", config.repository.query.program)
                } else {
                    format!("{:?}", config.repository.query.cohort_ids)
                }
            );
            println!("  Tag column: {}", config.export.tag_column);
            println!("  Output: {}", config.export.output_path);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        // Execute harvest
        tracing::info!("Executing harvest");
        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute().await {
            Err(e) if e.is_catalog_unavailable() => {
                tracing::error!(error = %e, "Cohort catalog unavailable");
                eprintln!("Cohort catalog unavailable: {e}");
                return Ok(4); // Connection error exit code
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
            Ok(s) => s,
        };

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Cohorts Listed: {}", summary.cohorts_listed);
        println!("  Cohorts Fetched: {}", summary.cohorts_fetched);
        println!("  Records: {}", summary.total_records);
        println!("  Columns: {}", summary.total_columns);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Output: {}", config.export.output_path);

        // Skipped cohorts are advisory; the run still succeeded
        if let Some(notice) = summary.skipped_notice() {
            println!();
            println!("⚠️  {notice}");
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs {
            yes: false,
            dry_run: false,
            filter: None,
            cohort: None,
            output: None,
        };
        assert!(!args.yes);
        assert!(!args.dry_run);
    }
}
