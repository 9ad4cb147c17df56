//! Harvest summary and reporting
//!
//! This module defines structures for tracking and reporting run results,
//! including the skipped-cohort notice surfaced to the console.

use crate::domain::ids::CohortId;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of a harvest run
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Number of cohorts the catalog (or the configured override) listed
    pub cohorts_listed: usize,

    /// Number of cohorts fetched successfully
    pub cohorts_fetched: usize,

    /// Cohorts whose fetch failed, in attempt order
    pub skipped: Vec<CohortId>,

    /// Rows in the merged output table
    pub total_records: usize,

    /// Columns in the merged output table
    pub total_columns: usize,

    /// Duration of the run
    pub duration: Duration,
}

impl HarvestSummary {
    /// Create a new empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            cohorts_listed: 0,
            cohorts_fetched: 0,
            skipped: Vec::new(),
            total_records: 0,
            total_columns: 0,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether every listed cohort was fetched
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Human-readable notice naming the skipped cohorts.
    ///
    /// Returns `None` when nothing was skipped; the notice is advisory and
    /// does not change the process exit code.
    pub fn skipped_notice(&self) -> Option<String> {
        if self.skipped.is_empty() {
            return None;
        }

        let names: Vec<&str> = self.skipped.iter().map(|c| c.as_str()).collect();
        Some(format!(
            "{} cohort(s) could not be fetched and were skipped: {}",
            names.len(),
            names.join(", ")
        ))
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            cohorts_listed = self.cohorts_listed,
            cohorts_fetched = self.cohorts_fetched,
            cohorts_skipped = self.skipped.len(),
            total_records = self.total_records,
            total_columns = self.total_columns,
            duration_secs = self.duration.as_secs(),
            "Harvest completed"
        );

        if !self.skipped.is_empty() {
            let skipped: Vec<&str> = self.skipped.iter().map(|c| c.as_str()).collect();
            tracing::warn!(skipped = ?skipped, "Harvest completed with skipped cohorts");
        }
    }
}

impl Default for HarvestSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cohort(id: &str) -> CohortId {
        CohortId::new(id).unwrap()
    }

    #[test]
    fn test_summary_creation() {
        let summary = HarvestSummary::new();

        assert_eq!(summary.cohorts_listed, 0);
        assert_eq!(summary.cohorts_fetched, 0);
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.is_complete());
    }

    #[test]
    fn test_summary_with_duration() {
        let summary = HarvestSummary::new().with_duration(Duration::from_secs(120));
        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_skipped_notice_silent_when_complete() {
        let summary = HarvestSummary::new();
        assert_eq!(summary.skipped_notice(), None);
    }

    #[test]
    fn test_skipped_notice_names_cohorts() {
        let mut summary = HarvestSummary::new();
        summary.skipped = vec![cohort("TCGA-STAD"), cohort("TCGA-LGG")];

        let notice = summary.skipped_notice().unwrap();
        assert!(notice.contains("2 cohort(s)"));
        assert!(notice.contains("TCGA-STAD"));
        assert!(notice.contains("TCGA-LGG"));
        assert!(!summary.is_complete());
    }
}
