//! Text hygiene and domain listings.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, PolarsResult};

use medallion_ingest::{ColumnValues, build_frame, text_values};

use crate::checks::filter_rows;

/// Rows with leading or trailing whitespace in `column`.
pub fn untrimmed_values(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let mask: Vec<bool> = text_values(df, column)?
        .iter()
        .map(|value| value.as_deref().is_some_and(|v| v.trim() != v))
        .collect();
    filter_rows(df, &mask)
}

/// Distinct values of `column`, sorted, null first.
pub fn distinct_values(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let distinct: BTreeSet<Option<String>> = text_values(df, column)?.into_iter().collect();
    build_frame(vec![(
        column,
        ColumnValues::Text(distinct.into_iter().collect()),
    )])
}
