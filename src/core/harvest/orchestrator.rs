//! Fetch orchestration with per-cohort failure isolation
//!
//! The orchestrator turns a list of cohort ids into tagged record tables.
//! Each cohort is fetched exactly once, sequentially, in the order given;
//! a failed fetch is logged, recorded, and skipped without aborting the
//! run. The result is an immutable [`HarvestSet`] snapshot — tables in
//! fetch order, the accumulated column superset, and the failure log —
//! which downstream stages consume read-only.

use crate::adapters::repository::ClinicalRepository;
use crate::domain::ids::CohortId;
use crate::domain::table::{ColumnSet, RecordTable};

/// Snapshot of one fetch pass
#[derive(Debug, Default)]
pub struct HarvestSet {
    /// Tagged tables keyed by cohort, in fetch order
    pub tables: Vec<(CohortId, RecordTable)>,

    /// Union of column names across all fetched tables, first-seen order
    pub superset: ColumnSet,

    /// Cohorts whose fetch failed, in attempt order
    pub failures: Vec<CohortId>,
}

impl HarvestSet {
    /// Total number of records across all fetched tables
    pub fn record_count(&self) -> usize {
        self.tables.iter().map(|(_, t)| t.row_count()).sum()
    }
}

/// Fetches every cohort once, isolating failures.
///
/// On success the table is tagged with the cohort id under `tag_column`
/// and its columns are folded into the running superset. On failure the
/// cohort lands in the failure log and the loop moves on — no error
/// crosses this boundary. An empty table counts as a success.
pub async fn fetch_all(
    repository: &dyn ClinicalRepository,
    cohort_ids: &[CohortId],
    tag_column: &str,
) -> HarvestSet {
    let mut harvest = HarvestSet::default();

    for id in cohort_ids {
        match repository.fetch_clinical(id).await {
            Ok(mut table) => {
                let collided = table.tag(tag_column, id);
                if collided {
                    tracing::warn!(
                        cohort = %id,
                        column = tag_column,
                        "Cohort schema already carries the tag column; cells overwritten with the cohort id"
                    );
                }
                harvest.superset.observe(&table);

                tracing::info!(
                    cohort = %id,
                    records = table.row_count(),
                    columns = table.column_count(),
                    "Fetched cohort"
                );
                harvest.tables.push((id.clone(), table));
            }
            Err(e) => {
                tracing::warn!(
                    cohort = %id,
                    error = %e,
                    "Failed to fetch cohort, skipping"
                );
                harvest.failures.push(id.clone());
            }
        }
    }

    harvest
}
