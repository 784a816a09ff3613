//! Product master cleansing and validity period derivation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::{DataFrame, PolarsResult};
use tracing::debug;

use medallion_ingest::{ColumnValues, build_frame, date_values, int_values, text_values};
use medallion_model::TableKind;
use medallion_model::columns::{
    CAT_ID, DWH_CREATE_DATE, PRD_COST, PRD_END_DT, PRD_ID, PRD_KEY, PRD_LINE, PRD_NM,
    PRD_START_DT,
};

use crate::cleanse::audit_values;
use crate::context::LoadContext;
use crate::error::TransformError;
use crate::normalization::{category_code, product_key, product_line_label};

const TABLE: &str = TableKind::CrmPrdInfo.table_name();

/// Split product keys, default costs, expand product lines and derive end dates.
///
/// # Errors
///
/// Returns [`TransformError::Frame`] if a raw column is missing.
pub fn cleanse_products(raw: &DataFrame, ctx: &LoadContext) -> Result<DataFrame, TransformError> {
    products(raw, ctx).map_err(TransformError::frame(TABLE))
}

fn products(raw: &DataFrame, ctx: &LoadContext) -> PolarsResult<DataFrame> {
    let raw_keys = text_values(raw, PRD_KEY)?;
    let category_ids: Vec<Option<String>> = raw_keys
        .iter()
        .map(|key| key.as_deref().map(category_code))
        .collect();
    let keys: Vec<Option<String>> = raw_keys
        .iter()
        .map(|key| key.as_deref().map(product_key))
        .collect();

    let raw_costs = int_values(raw, PRD_COST)?;
    let clamped = raw_costs
        .iter()
        .filter(|cost| cost.is_none_or(|value| value < 0))
        .count();
    let costs: Vec<Option<i64>> = raw_costs
        .iter()
        .map(|cost| Some(cost.unwrap_or(0).max(0)))
        .collect();

    let lines: Vec<Option<String>> = text_values(raw, PRD_LINE)?
        .iter()
        .map(|line| Some(product_line_label(line.as_deref()).to_string()))
        .collect();

    let starts = date_values(raw, PRD_START_DT)?;
    let ends = derive_end_dates(&keys, &starts);

    debug!(
        table = TABLE,
        rows = raw.height(),
        defaulted_costs = clamped,
        "cleansed products"
    );

    build_frame(vec![
        (PRD_ID, ColumnValues::Int(int_values(raw, PRD_ID)?)),
        (CAT_ID, ColumnValues::Text(category_ids)),
        (PRD_KEY, ColumnValues::Text(keys)),
        (PRD_NM, ColumnValues::Text(text_values(raw, PRD_NM)?)),
        (PRD_COST, ColumnValues::Int(costs)),
        (PRD_LINE, ColumnValues::Text(lines)),
        (PRD_START_DT, ColumnValues::dates(starts)),
        (PRD_END_DT, ColumnValues::dates(ends)),
        (DWH_CREATE_DATE, audit_values(ctx, raw.height())),
    ])
}

/// End of each product version: the next later start date of the same key,
/// minus one day.
///
/// Versions of a key that share a start date share an end date, so no end
/// date falls before its own start. Versions at the latest start date and
/// rows without a start date get no end date.
pub fn derive_end_dates(
    keys: &[Option<String>],
    starts: &[Option<NaiveDate>],
) -> Vec<Option<NaiveDate>> {
    let mut groups: BTreeMap<Option<&str>, Vec<usize>> = BTreeMap::new();
    for (idx, key) in keys.iter().enumerate() {
        if starts.get(idx).copied().flatten().is_some() {
            groups.entry(key.as_deref()).or_default().push(idx);
        }
    }

    let mut ends = vec![None; keys.len()];
    for mut rows in groups.into_values() {
        rows.sort_by_key(|&idx| starts[idx]);
        let periods: Vec<&[usize]> = rows.chunk_by(|&a, &b| starts[a] == starts[b]).collect();
        for pair in periods.windows(2) {
            let end = starts[pair[1][0]].and_then(|date| date.pred_opt());
            for &current in pair[0] {
                ends[current] = end;
            }
        }
    }
    ends
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn key(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn end_date_is_day_before_next_start() {
        let keys = vec![key("FR-R92B-58"), key("FR-R92B-58"), key("FR-R92B-58")];
        let starts = vec![date(2013, 7, 1), date(2011, 7, 1), date(2012, 7, 1)];
        let ends = derive_end_dates(&keys, &starts);
        assert_eq!(ends, vec![None, date(2012, 6, 30), date(2013, 6, 30)]);
    }

    #[test]
    fn keys_are_independent() {
        let keys = vec![key("A"), key("B"), key("A")];
        let starts = vec![date(2020, 1, 1), date(2019, 1, 1), date(2021, 1, 1)];
        let ends = derive_end_dates(&keys, &starts);
        assert_eq!(ends, vec![date(2020, 12, 31), None, None]);
    }

    #[test]
    fn equal_start_dates_share_the_next_end() {
        let keys = vec![key("HL-U509-R"), key("HL-U509-R"), key("HL-U509-R")];
        let starts = vec![date(2012, 7, 1), date(2013, 7, 1), date(2012, 7, 1)];
        let ends = derive_end_dates(&keys, &starts);
        assert_eq!(ends, vec![date(2013, 6, 30), None, date(2013, 6, 30)]);
    }

    #[test]
    fn equal_latest_start_dates_stay_open() {
        let keys = vec![key("A"), key("A")];
        let starts = vec![date(2020, 1, 1), date(2020, 1, 1)];
        assert_eq!(derive_end_dates(&keys, &starts), vec![None, None]);
    }

    #[test]
    fn rows_without_start_do_not_participate() {
        let keys = vec![key("A"), key("A"), key("A")];
        let starts = vec![None, date(2020, 1, 1), date(2021, 1, 1)];
        let ends = derive_end_dates(&keys, &starts);
        assert_eq!(ends, vec![None, date(2020, 12, 31), None]);
    }
}
