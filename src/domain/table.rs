//! In-memory record tables and ordered column sets
//!
//! This module provides the two data structures the harvest pipeline is built
//! around: [`RecordTable`], a column-ordered table of optional string cells as
//! returned by the repository for one cohort, and [`ColumnSet`], the ordered
//! union of column names observed across cohorts.
//!
//! A missing cell is `None`. The empty-field rendering only happens at the
//! TSV boundary, so the null marker can never collide with real data.

use crate::domain::ids::CohortId;
use std::collections::HashMap;

/// An ordered, duplicate-free set of column names.
///
/// Column order is first-seen order: folding tables into the set appends each
/// table's unseen columns in that table's own order. The set only grows. This
/// ordering is a contract — the output file's header follows it, and it is
/// stable for a given cohort ordering.
///
/// # Examples
///
/// ```
/// use tabula::domain::table::ColumnSet;
///
/// let mut set = ColumnSet::new();
/// set.insert("id");
/// set.insert("age");
/// set.insert("id"); // already present, keeps its position
/// assert_eq!(set.names(), &["id".to_string(), "age".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    /// Creates an empty column set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a column name, keeping first-seen order.
    ///
    /// Returns `true` if the name was not present before.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.names.len());
        self.names.push(name.to_string());
        true
    }

    /// Folds a table's columns into the set, in the table's own column order.
    pub fn observe(&mut self, table: &RecordTable) {
        for name in table.columns() {
            self.insert(name);
        }
    }

    /// Whether the set contains `name`
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The column names in set order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns in the set
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A table of clinical records: ordered columns, rows of optional cells.
///
/// Every row holds exactly one cell per column. Column names are unique;
/// the table maintains both invariants through its mutating methods, padding
/// existing rows with `None` whenever a record introduces a new column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl RecordTable {
    /// Creates an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given columns.
    ///
    /// Duplicate names keep their first position.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for name in columns {
            table.ensure_column(name.as_ref());
        }
        table
    }

    /// Returns the index of `name`, appending it as a new column if absent.
    ///
    /// Appending pads every existing row with `None` so the row/column
    /// invariant holds at all times.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.columns.len();
        self.columns.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        for row in &mut self.rows {
            row.push(None);
        }
        idx
    }

    /// Appends one record given as `(column, value)` pairs.
    ///
    /// Unknown columns are appended to the schema in the order they appear in
    /// the record; columns the record doesn't mention are `None`. When a
    /// record names the same column twice, the last value wins.
    pub fn push_record<I, S>(&mut self, record: I)
    where
        I: IntoIterator<Item = (S, Option<String>)>,
        S: AsRef<str>,
    {
        let mut row = vec![None; self.columns.len()];
        for (name, value) in record {
            let idx = self.ensure_column(name.as_ref());
            if row.len() < self.columns.len() {
                row.resize(self.columns.len(), None);
            }
            row[idx] = value;
        }
        self.rows.push(row);
    }

    /// Appends a pre-aligned row.
    ///
    /// The row must hold exactly one cell per column.
    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Moves all rows of `other` onto the end of this table.
    ///
    /// Both tables must share the same column sequence, which is the case for
    /// any pair of tables realigned to the same [`ColumnSet`].
    pub fn extend_rows(&mut self, other: RecordTable) {
        debug_assert_eq!(self.columns, other.columns);
        self.rows.extend(other.rows);
    }

    /// Appends a constant-valued provenance column holding the cohort id.
    ///
    /// The column lands after the table's own columns. If the table already
    /// has a column of that name, its cells are overwritten in place instead
    /// and `true` is returned so the caller can surface the collision.
    pub fn tag(&mut self, column: &str, cohort: &CohortId) -> bool {
        let existing = self.index.contains_key(column);
        let idx = self.ensure_column(column);
        for row in &mut self.rows {
            row[idx] = Some(cohort.as_str().to_string());
        }
        existing
    }

    /// Produces a new table with columns exactly matching `target`.
    ///
    /// Cells are copied from the source column where present and `None` where
    /// the source table lacks the column. Source columns absent from `target`
    /// are dropped. Pure: `self` is left untouched.
    pub fn realign(&self, target: &ColumnSet) -> RecordTable {
        let mapping: Vec<Option<usize>> = target
            .names()
            .iter()
            .map(|name| self.index.get(name.as_str()).copied())
            .collect();

        let mut aligned = RecordTable::with_columns(target.names());
        for row in &self.rows {
            let cells = mapping
                .iter()
                .map(|source| source.and_then(|i| row[i].clone()))
                .collect();
            aligned.rows.push(cells);
        }
        aligned
    }

    /// The table's column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The table's rows in insertion order
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cell lookup by row index and column name; `None` for a missing cell
    /// or an unknown column.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = *self.index.get(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}
