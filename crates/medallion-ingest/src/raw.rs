//! Typed bronze frames from source extracts.
//!
//! Mirrors a bulk insert into a constraint-free raw table: every declared
//! column must be present, empty cells load as null, text is kept verbatim,
//! and a value that does not fit its column type fails the whole table.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::debug;

use medallion_model::{ColumnType, TableKind};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::dates::{format_date, format_datetime, parse_iso_date, parse_iso_datetime};
use crate::error::IngestError;
use crate::polars_utils::{ColumnValues, build_frame};

/// Read an extract and convert it to the bronze frame of `kind`.
///
/// # Errors
///
/// Propagates read failures and conversion failures from [`table_to_frame`].
pub fn read_raw_table(kind: TableKind, path: &Path) -> Result<DataFrame, IngestError> {
    let table = read_csv_table(path)?;
    debug!(
        table = kind.table_name(),
        path = %path.display(),
        rows = table.rows.len(),
        "read source extract"
    );
    table_to_frame(kind, &table)
}

/// Convert a parsed extract to the typed bronze frame of `kind`.
///
/// Extra source columns are ignored. Row numbers in errors are 1-based data
/// rows (the header is not counted).
///
/// # Errors
///
/// Returns [`IngestError::MissingColumn`] when a declared column is absent and
/// [`IngestError::TypeConversion`] when a cell does not fit its type.
pub fn table_to_frame(kind: TableKind, table: &CsvTable) -> Result<DataFrame, IngestError> {
    let mut columns = Vec::with_capacity(kind.raw_columns().len());
    for column in kind.raw_columns() {
        let idx = table
            .column_index(column.name)
            .ok_or_else(|| IngestError::MissingColumn {
                table: kind.table_name().to_string(),
                column: column.name.to_string(),
            })?;
        let cells = table
            .rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""));
        let values = convert_cells(kind, column.name, column.column_type, cells)?;
        columns.push((column.name, values));
    }
    Ok(build_frame(columns)?)
}

fn convert_cells<'a>(
    kind: TableKind,
    column: &str,
    column_type: ColumnType,
    cells: impl Iterator<Item = &'a str>,
) -> Result<ColumnValues, IngestError> {
    let conversion_error = |row: usize, value: &str, expected: &'static str| {
        IngestError::TypeConversion {
            table: kind.table_name().to_string(),
            column: column.to_string(),
            row: row + 1,
            value: value.to_string(),
            expected,
        }
    };
    match column_type {
        ColumnType::Int => {
            let mut values = Vec::new();
            for (row, cell) in cells.enumerate() {
                let trimmed = cell.trim();
                if trimmed.is_empty() {
                    values.push(None);
                    continue;
                }
                let parsed = trimmed
                    .parse::<i64>()
                    .map_err(|_| conversion_error(row, cell, "integer"))?;
                values.push(Some(parsed));
            }
            Ok(ColumnValues::Int(values))
        }
        ColumnType::Text => Ok(ColumnValues::Text(
            cells
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect(),
        )),
        ColumnType::Date => {
            let mut values = Vec::new();
            for (row, cell) in cells.enumerate() {
                if cell.trim().is_empty() {
                    values.push(None);
                    continue;
                }
                let date = parse_iso_date(cell).ok_or_else(|| conversion_error(row, cell, "date"))?;
                values.push(Some(format_date(date)));
            }
            Ok(ColumnValues::Text(values))
        }
        ColumnType::DateTime => {
            let mut values = Vec::new();
            for (row, cell) in cells.enumerate() {
                if cell.trim().is_empty() {
                    values.push(None);
                    continue;
                }
                let datetime = parse_iso_datetime(cell)
                    .ok_or_else(|| conversion_error(row, cell, "datetime"))?;
                values.push(Some(format_datetime(datetime)));
            }
            Ok(ColumnValues::Text(values))
        }
    }
}
