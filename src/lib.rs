// Tabula - Clinical Cohort Aggregation Tool
// Copyright (c) 2026 Tabula Contributors
// Licensed under the MIT License

//! # Tabula - Clinical Cohort Aggregation
//!
//! Tabula is an ETL tool built in Rust that aggregates per-cohort clinical
//! records from a GDC-compatible biomedical repository into one unified
//! tab-separated table.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Listing** the cohort catalog under a program filter
//! - **Fetching** each cohort's clinical records, skipping cohorts that fail
//! - **Reconciling** heterogeneous per-cohort schemas onto one column superset
//! - **Writing** the merged result as a flat TSV file
//!
//! ## Architecture
//!
//! Tabula follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (fetch orchestration, schema reconciliation,
//!   run reporting)
//! - [`adapters`] - External integrations (GDC REST API, TSV output)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tabula::config::load_config;
//! use tabula::core::harvest::HarvestCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("tabula.toml")?;
//!
//!     // Create harvest coordinator
//!     let coordinator = HarvestCoordinator::new(config)?;
//!
//!     // Execute the run
//!     let summary = coordinator.execute().await?;
//!
//!     println!("Aggregated {} records", summary.total_records);
//!     if let Some(notice) = summary.skipped_notice() {
//!         println!("{notice}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! A cohort whose fetch fails is logged, recorded in the run summary, and
//! skipped; the run continues with the remaining cohorts. Only a catalog
//! outage (nothing to fetch) or an output write failure aborts the run.
//!
//! ## Schema Reconciliation
//!
//! Cohort schemas vary, so the pipeline folds every fetched table's columns
//! into an ordered superset and realigns each table onto it before
//! concatenation, padding absent columns with empty fields:
//!
//! ```rust
//! use tabula::core::harvest::merge_tables;
//! use tabula::domain::{CohortId, ColumnSet, RecordTable};
//!
//! let mut table = RecordTable::new();
//! table.push_record([("id", Some("1".to_string()))]);
//! table.tag("disease", &CohortId::new("TCGA-STAD").unwrap());
//!
//! let mut superset = ColumnSet::new();
//! superset.observe(&table);
//! superset.insert("stage"); // seen in another cohort
//!
//! let merged = merge_tables(&[(CohortId::new("TCGA-STAD").unwrap(), table)], &superset);
//! assert_eq!(merged.get(0, "stage"), None);
//! ```
//!
//! ## Error Handling
//!
//! Tabula uses the [`domain::TabulaError`] type for all errors:
//!
//! ```rust,no_run
//! use tabula::domain::TabulaError;
//!
//! fn example() -> Result<(), TabulaError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = tabula::config::load_config("tabula.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Tabula uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting harvest");
//! warn!(cohort = "TCGA-STAD", "Failed to fetch cohort, skipping");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
