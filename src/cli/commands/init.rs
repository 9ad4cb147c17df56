//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "tabula.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Tabula configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::starter_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. For controlled-access data, set TABULA_REPOSITORY_TOKEN");
                println!("     (or uncomment the token line and use a .env file)");
                println!("  3. Validate configuration: tabula validate-config");
                println!("  4. Preview the run: tabula export --dry-run");
                println!("  5. Run the export: tabula export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Starter configuration content
    fn starter_config() -> &'static str {
        r#"# Tabula Configuration File
# Aggregates per-cohort clinical records into one TSV table.

[application]
log_level = "info"

# environment = "development"  # development | staging | production

[repository]
base_url = "https://api.gdc.cancer.gov"
# Access token for controlled-access archives (optional)
# token = "${TABULA_REPOSITORY_TOKEN}"
tls_verify = true
timeout_seconds = 60

[repository.query]
# Restrict the cohort catalog to one program
program = "TCGA"
# Or fetch an explicit cohort list instead of querying the catalog:
# cohort_ids = ["TCGA-STAD", "TCGA-LGG"]
page_size = 500

[export]
output_path = "clinical.tsv"
# Name of the appended cohort provenance column
tag_column = "disease"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }
}
