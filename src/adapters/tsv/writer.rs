//! Tab-separated output writer

use crate::domain::table::RecordTable;
use crate::domain::{Result, TabulaError};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a record table to a TSV file at `path`.
///
/// The first line holds the column names in table order; every following
/// line holds one record. Missing cells render as empty fields. Parent
/// directories are created if needed. A table with zero rows still produces
/// a file (header-only, or zero-byte when the table has no columns either).
///
/// # Errors
///
/// Any I/O failure maps to [`TabulaError::Write`]; no cleanup of a partially
/// written file is attempted.
pub fn write_table(table: &RecordTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                TabulaError::Write(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        TabulaError::Write(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    write_rows(table, &mut writer)
        .map_err(|e| TabulaError::Write(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Wrote output table"
    );

    Ok(())
}

fn write_rows<W: Write>(table: &RecordTable, writer: &mut W) -> std::io::Result<()> {
    if table.column_count() == 0 {
        return writer.flush();
    }

    write_line(writer, table.columns().iter().map(|c| c.as_str()))?;

    for row in table.rows() {
        write_line(writer, row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }

    writer.flush()
}

fn write_line<'a, W: Write>(
    writer: &mut W,
    fields: impl Iterator<Item = &'a str>,
) -> std::io::Result<()> {
    let mut first = true;
    for field in fields {
        if !first {
            writer.write_all(b"\t")?;
        }
        first = false;
        write_sanitized(writer, field)?;
    }
    writer.write_all(b"\n")
}

/// Writes a field with the delimiter set replaced by spaces.
///
/// The format carries no quoting dialect, so a tab, newline, or carriage
/// return inside a value would break the row/column grid for every consumer.
fn write_sanitized<W: Write>(writer: &mut W, field: &str) -> std::io::Result<()> {
    if !field.contains(['\t', '\n', '\r']) {
        return writer.write_all(field.as_bytes());
    }

    let sanitized: String = field
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect();
    writer.write_all(sanitized.as_bytes())
}
