//! Polars AnyValue utility functions.
//!
//! Tables are read and written column-at-a-time: rules pull a column into a
//! `Vec<Option<_>>`, compute the new values row by row, and build the output
//! frame from [`ColumnValues`].

use chrono::NaiveDate;
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use medallion_model::{ColumnDef, ColumnType};

use crate::dates::format_date;

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts AnyValue to String, keeping whitespace; None only for Null.
pub fn any_to_opt_string(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        other => Some(any_to_string(other)),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Converts an AnyValue to i64, returning None for non-integer or null values.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// Extract a column as optional strings (whitespace preserved).
///
/// # Errors
///
/// Returns a Polars error if the column does not exist.
pub fn text_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    (0..df.height())
        .map(|idx| column.get(idx).map(any_to_opt_string))
        .collect()
}

/// Extract a column as optional integers.
///
/// # Errors
///
/// Returns a Polars error if the column does not exist.
pub fn int_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?;
    (0..df.height())
        .map(|idx| column.get(idx).map(any_to_i64))
        .collect()
}

/// Extract an ISO date column as optional dates. Unparseable text reads as None.
///
/// # Errors
///
/// Returns a Polars error if the column does not exist.
pub fn date_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<NaiveDate>>> {
    Ok(text_values(df, name)?
        .into_iter()
        .map(|value| value.as_deref().and_then(crate::dates::parse_iso_date))
        .collect())
}

/// Values of one output column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    /// Dates are stored as `YYYY-MM-DD` text.
    pub fn dates(values: Vec<Option<NaiveDate>>) -> Self {
        Self::Text(values.into_iter().map(|d| d.map(format_date)).collect())
    }

    /// A column of `len` copies of the same text value.
    pub fn repeat_text(value: &str, len: usize) -> Self {
        Self::Text(vec![Some(value.to_string()); len])
    }

    /// An empty column of the given storage type.
    pub fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int => Self::Int(Vec::new()),
            ColumnType::Text | ColumnType::Date | ColumnType::DateTime => Self::Text(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_column(self, name: &str) -> Column {
        match self {
            Self::Int(values) => Series::new(name.into(), values).into_column(),
            Self::Text(values) => Series::new(name.into(), values).into_column(),
        }
    }
}

/// Build a frame from named column values, in order.
///
/// # Errors
///
/// Returns a Polars error if the columns have different lengths or
/// duplicate names.
pub fn build_frame(columns: Vec<(&str, ColumnValues)>) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| values.into_column(name))
        .collect();
    DataFrame::new(columns)
}

/// Build an empty frame with the given typed columns.
///
/// # Errors
///
/// Returns a Polars error if the definitions contain duplicate names.
pub fn empty_frame(columns: &[ColumnDef]) -> PolarsResult<DataFrame> {
    build_frame(
        columns
            .iter()
            .map(|column| (column.name, ColumnValues::empty(column.column_type)))
            .collect(),
    )
}
