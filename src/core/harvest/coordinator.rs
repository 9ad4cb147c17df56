//! Harvest coordinator - main orchestrator for the aggregation run
//!
//! This module wires the whole pipeline together: resolve the cohort list
//! (explicit override or catalog), fetch every cohort with failure
//! isolation, reconcile the schemas, write the output file, and produce
//! the run summary.

use crate::adapters::gdc::GdcRepository;
use crate::adapters::repository::ClinicalRepository;
use crate::adapters::tsv::write_table;
use crate::config::TabulaConfig;
use crate::core::harvest::merge::merge_tables;
use crate::core::harvest::orchestrator::fetch_all;
use crate::core::harvest::summary::HarvestSummary;
use crate::domain::ids::CohortId;
use crate::domain::Result;
use std::sync::Arc;
use std::time::Instant;

/// Harvest coordinator
pub struct HarvestCoordinator {
    config: TabulaConfig,
    repository: Arc<dyn ClinicalRepository>,
}

impl HarvestCoordinator {
    /// Create a coordinator backed by the configured GDC repository
    pub fn new(config: TabulaConfig) -> Result<Self> {
        let repository = Arc::new(GdcRepository::new(&config.repository)?);
        Ok(Self::with_repository(config, repository))
    }

    /// Create a coordinator with an explicit repository implementation.
    ///
    /// This is the seam tests use to run the pipeline against an in-memory
    /// double instead of a live archive.
    pub fn with_repository(config: TabulaConfig, repository: Arc<dyn ClinicalRepository>) -> Self {
        Self { config, repository }
    }

    /// Resolve the cohorts this run will attempt.
    ///
    /// An explicit `repository.query.cohort_ids` list bypasses the catalog;
    /// otherwise the catalog is queried with the configured program filter.
    /// Duplicate and malformed ids in the override are dropped with a
    /// warning so every cohort is attempted at most once.
    ///
    /// # Errors
    ///
    /// A catalog failure is fatal — with no cohort list there is nothing
    /// to run.
    pub async fn cohorts_to_fetch(&self) -> Result<Vec<CohortId>> {
        let query = &self.config.repository.query;

        if !query.cohort_ids.is_empty() {
            tracing::info!(count = query.cohort_ids.len(), "Using configured cohort IDs");

            let mut cohorts: Vec<CohortId> = Vec::new();
            for raw in &query.cohort_ids {
                match CohortId::new(raw.clone()) {
                    Ok(id) if cohorts.contains(&id) => {
                        tracing::warn!(cohort = %id, "Duplicate cohort ID in configuration, ignoring");
                    }
                    Ok(id) => cohorts.push(id),
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping invalid cohort ID in configuration");
                    }
                }
            }
            return Ok(cohorts);
        }

        self.repository.list_cohorts(&query.program).await
    }

    /// Execute the harvest
    ///
    /// This is the main entry point for the aggregation run. It:
    /// 1. Resolves the cohort list (fatal on catalog failure)
    /// 2. Fetches each cohort sequentially, skipping failures
    /// 3. Reconciles all tables onto the column superset and concatenates
    /// 4. Writes the merged table to the configured output path (fatal on
    ///    write failure)
    /// 5. Returns the run summary, including the skipped-cohort log
    ///
    /// A run with skipped cohorts is still a successful run; only a catalog
    /// outage or a write failure surfaces as an error.
    pub async fn execute(&self) -> Result<HarvestSummary> {
        let start_time = Instant::now();

        tracing::info!(
            repository = self.repository.base_url(),
            output = %self.config.export.output_path,
            "Starting harvest"
        );

        let cohorts = self.cohorts_to_fetch().await?;
        if cohorts.is_empty() {
            tracing::warn!("No cohorts to fetch; output will be empty");
        }

        let harvest = fetch_all(
            self.repository.as_ref(),
            &cohorts,
            &self.config.export.tag_column,
        )
        .await;

        let merged = merge_tables(&harvest.tables, &harvest.superset);

        write_table(&merged, &self.config.export.output_path)?;

        let mut summary = HarvestSummary::new();
        summary.cohorts_listed = cohorts.len();
        summary.cohorts_fetched = harvest.tables.len();
        summary.skipped = harvest.failures;
        summary.total_records = merged.row_count();
        summary.total_columns = merged.column_count();

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }
}
