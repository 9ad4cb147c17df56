//! Configuration schema types
//!
//! This module defines the configuration structure for Tabula.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Tabula configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabulaConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Remote repository configuration
    pub repository: RepositoryConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TabulaConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.repository.validate(&self.environment)?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Remote repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Base URL of the repository's REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token for controlled-access archives (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification (setting to `false`)
    /// exposes the application to man-in-the-middle attacks and should ONLY
    /// be used in development/testing environments. In production this MUST
    /// be `true` (enforced by validation).
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Query configuration
    #[serde(default)]
    pub query: QueryConfig,
}

impl RepositoryConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("repository.base_url cannot be empty".to_string());
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("repository.base_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("repository.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("repository.timeout_seconds must be > 0".to_string());
        }

        // TLS verification is mandatory in production environments
        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                For development/testing environments, set 'environment = \"development\"' or \
                'environment = \"staging\"'."
                    .to_string(),
            );
        }

        self.query.validate()?;
        Ok(())
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            tls_verify: true,
            timeout_seconds: default_timeout_seconds(),
            query: QueryConfig::default(),
        }
    }
}

/// Query configuration for the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Program filter restricting the catalog query (e.g. "TCGA")
    #[serde(default)]
    pub program: String,

    /// Explicit cohort IDs to fetch (empty = list from the catalog)
    #[serde(default)]
    pub cohort_ids: Vec<String>,

    /// Page size for catalog and case queries
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl QueryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.program.is_empty() && self.cohort_ids.is_empty() {
            return Err(
                "repository.query.program cannot be empty unless cohort_ids are given".to_string(),
            );
        }

        if !(1..=10_000).contains(&self.page_size) {
            return Err(format!(
                "repository.query.page_size must be between 1 and 10000, got {}",
                self.page_size
            ));
        }

        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            cohort_ids: vec![],
            page_size: default_page_size(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Path of the output TSV file
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Name of the appended cohort provenance column
    #[serde(default = "default_tag_column")]
    pub tag_column: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_path.is_empty() {
            return Err("export.output_path cannot be empty".to_string());
        }

        if self.tag_column.is_empty() {
            return Err("export.tag_column cannot be empty".to_string());
        }

        if self.tag_column.contains(['\t', '\n', '\r']) {
            return Err("export.tag_column must not contain control characters".to_string());
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            tag_column: default_tag_column(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.gdc.cancer.gov".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> usize {
    500
}

fn default_output_path() -> String {
    "clinical.tsv".to_string()
}

fn default_tag_column() -> String {
    "disease".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
