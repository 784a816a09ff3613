//! Sales arithmetic and cost sanity.

use polars::prelude::{DataFrame, PolarsResult};

use medallion_ingest::int_values;
use medallion_model::columns::{PRD_COST, SLS_PRICE, SLS_QUANTITY, SLS_SALES};

use crate::checks::filter_rows;

/// Lines where `sales != quantity × price`, or any of the three is null or
/// not strictly positive.
pub fn inconsistent_sales(sales: &DataFrame) -> PolarsResult<DataFrame> {
    let amounts = int_values(sales, SLS_SALES)?;
    let quantities = int_values(sales, SLS_QUANTITY)?;
    let prices = int_values(sales, SLS_PRICE)?;
    let mask: Vec<bool> = amounts
        .iter()
        .zip(quantities.iter().zip(&prices))
        .map(|(amount, (quantity, price))| match (amount, quantity, price) {
            (Some(s), Some(q), Some(p)) if *s > 0 && *q > 0 && *p > 0 => {
                q.checked_mul(*p) != Some(*s)
            }
            _ => true,
        })
        .collect();
    filter_rows(sales, &mask)
}

/// Products with a null or negative cost.
pub fn invalid_costs(products: &DataFrame) -> PolarsResult<DataFrame> {
    let mask: Vec<bool> = int_values(products, PRD_COST)?
        .iter()
        .map(|cost| cost.is_none_or(|c| c < 0))
        .collect();
    filter_rows(products, &mask)
}
