//! Configuration management
//!
//! This module provides configuration loading, validation, and secure
//! credential handling for Tabula. Configuration lives in a TOML file
//! (`tabula.toml` by default) with two override layers on top:
//!
//! 1. `${VAR}` placeholders inside the file are substituted from the
//!    environment at load time (comments are left alone);
//! 2. `TABULA_*` environment variables override individual keys after
//!    parsing, e.g. `TABULA_EXPORT_OUTPUT_PATH`.
//!
//! # Example
//!
//! ```no_run
//! use tabula::config::load_config;
//!
//! let config = load_config("tabula.toml").expect("Failed to load config");
//! println!("repository: {}", config.repository.base_url);
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types for convenience
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, Environment, ExportConfig, LoggingConfig, QueryConfig, RepositoryConfig,
    TabulaConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
