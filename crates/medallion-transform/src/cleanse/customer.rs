//! Customer master cleansing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::{DataFrame, PolarsResult};
use tracing::debug;

use medallion_ingest::{ColumnValues, build_frame, date_values, int_values, text_values};
use medallion_model::TableKind;
use medallion_model::columns::{
    CST_CREATE_DATE, CST_FIRSTNAME, CST_GNDR, CST_ID, CST_KEY, CST_LASTNAME, CST_MARITAL_STATUS,
    DWH_CREATE_DATE,
};

use crate::cleanse::{audit_values, pick, trimmed};
use crate::context::LoadContext;
use crate::error::TransformError;
use crate::normalization::{gender_label, marital_status_label};

const TABLE: &str = TableKind::CrmCustInfo.table_name();

/// Deduplicate customers and standardize names and codes.
///
/// Rows without an identifier are dropped. For each identifier the row with
/// the latest creation date survives; a missing date ranks below any date and
/// equal dates keep the earliest raw row. Survivors keep their raw order.
///
/// # Errors
///
/// Returns [`TransformError::Frame`] if a raw column is missing.
pub fn cleanse_customers(raw: &DataFrame, ctx: &LoadContext) -> Result<DataFrame, TransformError> {
    customers(raw, ctx).map_err(TransformError::frame(TABLE))
}

fn customers(raw: &DataFrame, ctx: &LoadContext) -> PolarsResult<DataFrame> {
    let ids = int_values(raw, CST_ID)?;
    let created = date_values(raw, CST_CREATE_DATE)?;
    let survivors = latest_per_identifier(&ids, &created);

    let missing_ids = ids.iter().filter(|id| id.is_none()).count();
    let duplicates = ids.len() - missing_ids - survivors.len();
    debug!(
        table = TABLE,
        raw_rows = raw.height(),
        dropped_without_id = missing_ids,
        dropped_duplicates = duplicates,
        "deduplicated customers"
    );

    let keys = text_values(raw, CST_KEY)?;
    let first_names = text_values(raw, CST_FIRSTNAME)?;
    let last_names = text_values(raw, CST_LASTNAME)?;
    let marital = text_values(raw, CST_MARITAL_STATUS)?;
    let genders = text_values(raw, CST_GNDR)?;

    build_frame(vec![
        (CST_ID, ColumnValues::Int(pick(&ids, &survivors))),
        (CST_KEY, ColumnValues::Text(pick(&keys, &survivors))),
        (
            CST_FIRSTNAME,
            ColumnValues::Text(trimmed(pick(&first_names, &survivors))),
        ),
        (
            CST_LASTNAME,
            ColumnValues::Text(trimmed(pick(&last_names, &survivors))),
        ),
        (
            CST_MARITAL_STATUS,
            ColumnValues::Text(
                survivors
                    .iter()
                    .map(|&idx| Some(marital_status_label(marital[idx].as_deref()).to_string()))
                    .collect(),
            ),
        ),
        (
            CST_GNDR,
            ColumnValues::Text(
                survivors
                    .iter()
                    .map(|&idx| Some(gender_label(genders[idx].as_deref()).to_string()))
                    .collect(),
            ),
        ),
        (CST_CREATE_DATE, ColumnValues::dates(pick(&created, &survivors))),
        (DWH_CREATE_DATE, audit_values(ctx, survivors.len())),
    ])
}

/// Row indices of the surviving row per identifier, in raw order.
pub fn latest_per_identifier(ids: &[Option<i64>], created: &[Option<NaiveDate>]) -> Vec<usize> {
    let mut best: BTreeMap<i64, usize> = BTreeMap::new();
    for (idx, id) in ids.iter().enumerate() {
        let Some(id) = id else {
            continue;
        };
        let candidate = created.get(idx).copied().flatten();
        best.entry(*id)
            .and_modify(|current| {
                let current_date = created.get(*current).copied().flatten();
                if candidate > current_date {
                    *current = idx;
                }
            })
            .or_insert(idx);
    }
    let mut survivors: Vec<usize> = best.into_values().collect();
    survivors.sort_unstable();
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn latest_creation_date_wins() {
        let ids = vec![Some(7), Some(7), Some(8)];
        let created = vec![date(2024, 1, 1), date(2024, 6, 1), date(2024, 2, 1)];
        assert_eq!(latest_per_identifier(&ids, &created), vec![1, 2]);
    }

    #[test]
    fn missing_identifier_is_dropped() {
        let ids = vec![None, Some(1)];
        let created = vec![date(2024, 1, 1), None];
        assert_eq!(latest_per_identifier(&ids, &created), vec![1]);
    }

    #[test]
    fn dated_row_beats_undated_row() {
        let ids = vec![Some(3), Some(3)];
        let created = vec![None, date(2020, 1, 1)];
        assert_eq!(latest_per_identifier(&ids, &created), vec![1]);
    }

    #[test]
    fn ties_keep_first_raw_row() {
        let ids = vec![Some(5), Some(5), Some(5)];
        let created = vec![date(2021, 3, 3), date(2021, 3, 3), date(2020, 1, 1)];
        assert_eq!(latest_per_identifier(&ids, &created), vec![0]);
    }
}
