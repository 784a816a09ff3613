//! Sales line cleansing.

use polars::prelude::{DataFrame, PolarsResult};
use tracing::debug;

use medallion_ingest::{ColumnValues, build_frame, int_values, text_values};
use medallion_model::TableKind;
use medallion_model::columns::{
    DWH_CREATE_DATE, SLS_CUST_ID, SLS_DUE_DT, SLS_ORD_NUM, SLS_ORDER_DT, SLS_PRD_KEY, SLS_PRICE,
    SLS_QUANTITY, SLS_SALES, SLS_SHIP_DT,
};

use crate::cleanse::audit_values;
use crate::context::LoadContext;
use crate::error::TransformError;
use crate::normalization::{parse_compact_date, repair_sales_figures};

const TABLE: &str = TableKind::CrmSalesDetails.table_name();

/// Parse compact dates and repair sales amounts and prices.
///
/// # Errors
///
/// Returns [`TransformError::Frame`] if a raw column is missing.
pub fn cleanse_sales(raw: &DataFrame, ctx: &LoadContext) -> Result<DataFrame, TransformError> {
    sales(raw, ctx).map_err(TransformError::frame(TABLE))
}

fn sales(raw: &DataFrame, ctx: &LoadContext) -> PolarsResult<DataFrame> {
    let mut date_columns = Vec::with_capacity(3);
    let mut nulled_dates = 0usize;
    for name in [SLS_ORDER_DT, SLS_SHIP_DT, SLS_DUE_DT] {
        let raw_dates = int_values(raw, name)?;
        let parsed: Vec<_> = raw_dates.iter().map(|value| parse_compact_date(*value)).collect();
        nulled_dates += raw_dates
            .iter()
            .zip(&parsed)
            .filter(|(before, after)| before.is_some() && after.is_none())
            .count();
        date_columns.push((name, ColumnValues::dates(parsed)));
    }

    let amounts = int_values(raw, SLS_SALES)?;
    let quantities = int_values(raw, SLS_QUANTITY)?;
    let prices = int_values(raw, SLS_PRICE)?;
    let mut repaired_sales = Vec::with_capacity(raw.height());
    let mut repaired_prices = Vec::with_capacity(raw.height());
    let mut repaired = 0usize;
    for ((amount, quantity), price) in amounts.iter().zip(&quantities).zip(&prices) {
        let figures = repair_sales_figures(*amount, *quantity, *price);
        if figures.sales != *amount || figures.price != *price {
            repaired += 1;
        }
        repaired_sales.push(figures.sales);
        repaired_prices.push(figures.price);
    }

    debug!(
        table = TABLE,
        rows = raw.height(),
        nulled_dates,
        repaired_lines = repaired,
        "cleansed sales lines"
    );

    let mut columns = vec![
        (SLS_ORD_NUM, ColumnValues::Text(text_values(raw, SLS_ORD_NUM)?)),
        (SLS_PRD_KEY, ColumnValues::Text(text_values(raw, SLS_PRD_KEY)?)),
        (SLS_CUST_ID, ColumnValues::Int(int_values(raw, SLS_CUST_ID)?)),
    ];
    columns.extend(date_columns);
    columns.extend([
        (SLS_SALES, ColumnValues::Int(repaired_sales)),
        (SLS_QUANTITY, ColumnValues::Int(quantities)),
        (SLS_PRICE, ColumnValues::Int(repaired_prices)),
        (DWH_CREATE_DATE, audit_values(ctx, raw.height())),
    ]);
    build_frame(columns)
}
