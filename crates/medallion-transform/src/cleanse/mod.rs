//! Per-table cleansing: bronze snapshot in, silver snapshot out.
//!
//! Every rule is a pure function of the raw frame and the [`LoadContext`];
//! nothing depends on the previous silver state.

mod customer;
mod erp;
mod product;
mod sales;

pub use customer::{cleanse_customers, latest_per_identifier};
pub use erp::{cleanse_categories, cleanse_demographics, cleanse_locations};
pub use product::{cleanse_products, derive_end_dates};
pub use sales::cleanse_sales;

use polars::prelude::DataFrame;

use medallion_ingest::{ColumnValues, format_datetime};
use medallion_model::TableKind;

use crate::context::LoadContext;
use crate::error::TransformError;

/// Derive the silver frame of `kind` from its bronze frame.
///
/// # Errors
///
/// Returns [`TransformError`] if the raw frame lacks a required column.
pub fn cleanse_table(
    kind: TableKind,
    raw: &DataFrame,
    ctx: &LoadContext,
) -> Result<DataFrame, TransformError> {
    match kind {
        TableKind::CrmCustInfo => cleanse_customers(raw, ctx),
        TableKind::CrmPrdInfo => cleanse_products(raw, ctx),
        TableKind::CrmSalesDetails => cleanse_sales(raw, ctx),
        TableKind::ErpLocA101 => cleanse_locations(raw, ctx),
        TableKind::ErpCustAz12 => cleanse_demographics(raw, ctx),
        TableKind::ErpPxCatG1v2 => cleanse_categories(raw, ctx),
    }
}

pub(crate) fn audit_values(ctx: &LoadContext, len: usize) -> ColumnValues {
    ColumnValues::repeat_text(&format_datetime(ctx.loaded_at), len)
}

pub(crate) fn pick<T: Clone>(values: &[T], rows: &[usize]) -> Vec<T> {
    rows.iter().map(|&idx| values[idx].clone()).collect()
}

pub(crate) fn trimmed(values: Vec<Option<String>>) -> Vec<Option<String>> {
    values
        .into_iter()
        .map(|value| value.map(|text| text.trim().to_string()))
        .collect()
}
