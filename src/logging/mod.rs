//! Logging and observability
//!
//! This module provides structured logging with:
//! - Configurable log levels
//! - Console output, plus an optional JSON file sink with rotation
//!
//! # Example
//!
//! ```no_run
//! use tabula::config::LoggingConfig;
//! use tabula::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::warn!(cohort = "TCGA-STAD", "Failed to fetch cohort, skipping");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
