//! Schema-union reconciliation and concatenation
//!
//! Pure functions of the harvest snapshot: every table is realigned onto
//! the finalized column superset and the results are concatenated in
//! cohort fetch order. No table is mutated; running the merge twice over
//! the same inputs yields identical output.

use crate::domain::ids::CohortId;
use crate::domain::table::{ColumnSet, RecordTable};

/// Realigns every table to `superset` and concatenates them row-wise.
///
/// The output has exactly one column per superset entry, in superset
/// order, and one row per input record, tables in the order given and
/// per-table row order preserved. Columns a table lacks are filled with
/// the null marker. An empty `tables` slice yields an empty table with
/// the superset's columns.
pub fn merge_tables(tables: &[(CohortId, RecordTable)], superset: &ColumnSet) -> RecordTable {
    let mut merged = RecordTable::with_columns(superset.names());

    for (cohort, table) in tables {
        let aligned = table.realign(superset);
        tracing::debug!(
            cohort = %cohort,
            records = aligned.row_count(),
            "Reconciled cohort table"
        );
        merged.extend_rows(aligned);
    }

    merged
}
