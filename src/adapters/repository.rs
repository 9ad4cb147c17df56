//! Clinical repository trait definition
//!
//! This module defines the `ClinicalRepository` trait that abstracts the
//! remote biomedical archive behind two operations: listing the cohort
//! catalog and fetching one cohort's clinical records. The harvest core only
//! talks to this trait, so tests can substitute an in-memory double and new
//! archive backends can be added without touching the pipeline.

use crate::domain::ids::CohortId;
use crate::domain::table::RecordTable;
use crate::domain::Result;
use async_trait::async_trait;

/// Trait for clinical data repository implementations
///
/// # Errors
///
/// `list_cohorts` failing means the whole run has nothing to do; callers
/// treat it as fatal. `fetch_clinical` failures are per-cohort and are
/// absorbed by the fetch orchestrator.
///
/// # Example
///
/// ```no_run
/// use tabula::adapters::gdc::GdcRepository;
/// use tabula::adapters::repository::ClinicalRepository;
/// use tabula::config::RepositoryConfig;
///
/// # async fn example() -> tabula::domain::Result<()> {
/// let repository = GdcRepository::new(&RepositoryConfig::default())?;
///
/// let cohorts = repository.list_cohorts("TCGA").await?;
/// for cohort in &cohorts {
///     let table = repository.fetch_clinical(cohort).await?;
///     println!("{}: {} records", cohort, table.row_count());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ClinicalRepository: Send + Sync {
    /// List the cohort identifiers available under the given program filter.
    ///
    /// Consumed once at startup. Any failure here maps to
    /// [`RepositoryError::CatalogUnavailable`](crate::domain::RepositoryError::CatalogUnavailable).
    async fn list_cohorts(&self, filter: &str) -> Result<Vec<CohortId>>;

    /// Fetch the clinical record table for one cohort.
    ///
    /// The returned table's schema is whatever the archive holds for that
    /// cohort; it is not validated against other cohorts. An empty table is
    /// a valid result, not an error.
    async fn fetch_clinical(&self, id: &CohortId) -> Result<RecordTable>;

    /// Base URL of the repository
    fn base_url(&self) -> &str;
}
