//! Date ordering and plausibility.

use chrono::NaiveDate;
use polars::prelude::{DataFrame, PolarsResult};

use medallion_ingest::date_values;
use medallion_model::columns::{BDATE, PRD_END_DT, PRD_START_DT, SLS_DUE_DT, SLS_ORDER_DT, SLS_SHIP_DT};

use crate::checks::filter_rows;

/// Earliest birthdate considered plausible.
pub const MIN_BIRTHDATE: NaiveDate = match NaiveDate::from_ymd_opt(1924, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// Product versions that end before they start.
pub fn product_end_before_start(products: &DataFrame) -> PolarsResult<DataFrame> {
    let starts = date_values(products, PRD_START_DT)?;
    let ends = date_values(products, PRD_END_DT)?;
    let mask: Vec<bool> = starts
        .iter()
        .zip(&ends)
        .map(|(start, end)| matches!((start, end), (Some(s), Some(e)) if e < s))
        .collect();
    filter_rows(products, &mask)
}

/// Sales lines ordered after they shipped or fell due.
pub fn order_after_ship_or_due(sales: &DataFrame) -> PolarsResult<DataFrame> {
    let orders = date_values(sales, SLS_ORDER_DT)?;
    let ships = date_values(sales, SLS_SHIP_DT)?;
    let dues = date_values(sales, SLS_DUE_DT)?;
    let mask: Vec<bool> = orders
        .iter()
        .zip(ships.iter().zip(&dues))
        .map(|(order, (ship, due))| match order {
            Some(order) => ship.is_some_and(|s| *order > s) || due.is_some_and(|d| *order > d),
            None => false,
        })
        .collect();
    filter_rows(sales, &mask)
}

/// Birthdates before [`MIN_BIRTHDATE`] or after `as_of`.
pub fn birthdates_out_of_range(demographics: &DataFrame, as_of: NaiveDate) -> PolarsResult<DataFrame> {
    let mask: Vec<bool> = date_values(demographics, BDATE)?
        .iter()
        .map(|date| date.is_some_and(|d| d < MIN_BIRTHDATE || d > as_of))
        .collect();
    filter_rows(demographics, &mask)
}
