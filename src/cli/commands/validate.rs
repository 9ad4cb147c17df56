//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Tabula configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing, so a successful load is a
        // valid configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Repository: {}", config.repository.base_url);
        println!(
            "  Token: {}",
            if config.repository.token.is_some() {
                "configured"
            } else {
                "none (open-access only)"
            }
        );
        if config.repository.query.cohort_ids.is_empty() {
            println!("  Program Filter: {}", config.repository.query.program);
        } else {
            println!("  Cohort IDs: {:?}", config.repository.query.cohort_ids);
        }
        println!("  Page Size: {}", config.repository.query.page_size);
        println!("  Tag Column: {}", config.export.tag_column);
        println!("  Output: {}", config.export.output_path);
        println!();
        Ok(0)
    }
}
