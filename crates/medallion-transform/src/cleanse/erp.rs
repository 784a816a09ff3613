//! ERP extract cleansing: demographics, locations and category mapping.

use polars::prelude::{DataFrame, PolarsResult};
use tracing::debug;

use medallion_ingest::{ColumnValues, build_frame, date_values, text_values};
use medallion_model::TableKind;
use medallion_model::columns::{
    BDATE, CAT, CID, CNTRY, DWH_CREATE_DATE, GEN, ID, MAINTENANCE, SUBCAT,
};

use crate::cleanse::audit_values;
use crate::context::LoadContext;
use crate::error::TransformError;
use crate::normalization::{
    country_label, demographic_gender_label, strip_dashes, strip_demographic_prefix,
};

/// Strip id prefixes, null future birthdates and normalize gender.
///
/// # Errors
///
/// Returns [`TransformError::Frame`] if a raw column is missing.
pub fn cleanse_demographics(
    raw: &DataFrame,
    ctx: &LoadContext,
) -> Result<DataFrame, TransformError> {
    demographics(raw, ctx).map_err(TransformError::frame(TableKind::ErpCustAz12.table_name()))
}

fn demographics(raw: &DataFrame, ctx: &LoadContext) -> PolarsResult<DataFrame> {
    let ids: Vec<Option<String>> = text_values(raw, CID)?
        .iter()
        .map(|cid| cid.as_deref().map(strip_demographic_prefix))
        .collect();
    let raw_birthdates = date_values(raw, BDATE)?;
    let future = raw_birthdates
        .iter()
        .filter(|date| date.is_some_and(|d| d > ctx.as_of))
        .count();
    let birthdates: Vec<_> = raw_birthdates
        .into_iter()
        .map(|date| date.filter(|d| *d <= ctx.as_of))
        .collect();
    let genders: Vec<Option<String>> = text_values(raw, GEN)?
        .iter()
        .map(|gender| Some(demographic_gender_label(gender.as_deref()).to_string()))
        .collect();

    debug!(
        table = TableKind::ErpCustAz12.table_name(),
        rows = raw.height(),
        nulled_birthdates = future,
        "cleansed demographics"
    );

    build_frame(vec![
        (CID, ColumnValues::Text(ids)),
        (BDATE, ColumnValues::dates(birthdates)),
        (GEN, ColumnValues::Text(genders)),
        (DWH_CREATE_DATE, audit_values(ctx, raw.height())),
    ])
}

/// Remove dashes from ids and expand country codes.
///
/// # Errors
///
/// Returns [`TransformError::Frame`] if a raw column is missing.
pub fn cleanse_locations(raw: &DataFrame, ctx: &LoadContext) -> Result<DataFrame, TransformError> {
    locations(raw, ctx).map_err(TransformError::frame(TableKind::ErpLocA101.table_name()))
}

fn locations(raw: &DataFrame, ctx: &LoadContext) -> PolarsResult<DataFrame> {
    let ids: Vec<Option<String>> = text_values(raw, CID)?
        .iter()
        .map(|cid| cid.as_deref().map(strip_dashes))
        .collect();
    let countries: Vec<Option<String>> = text_values(raw, CNTRY)?
        .iter()
        .map(|country| Some(country_label(country.as_deref())))
        .collect();
    build_frame(vec![
        (CID, ColumnValues::Text(ids)),
        (CNTRY, ColumnValues::Text(countries)),
        (DWH_CREATE_DATE, audit_values(ctx, raw.height())),
    ])
}

/// Category mapping passes through unchanged apart from the audit column.
///
/// # Errors
///
/// Returns [`TransformError::Frame`] if a raw column is missing.
pub fn cleanse_categories(raw: &DataFrame, ctx: &LoadContext) -> Result<DataFrame, TransformError> {
    categories(raw, ctx).map_err(TransformError::frame(TableKind::ErpPxCatG1v2.table_name()))
}

fn categories(raw: &DataFrame, ctx: &LoadContext) -> PolarsResult<DataFrame> {
    build_frame(vec![
        (ID, ColumnValues::Text(text_values(raw, ID)?)),
        (CAT, ColumnValues::Text(text_values(raw, CAT)?)),
        (SUBCAT, ColumnValues::Text(text_values(raw, SUBCAT)?)),
        (MAINTENANCE, ColumnValues::Text(text_values(raw, MAINTENANCE)?)),
        (DWH_CREATE_DATE, audit_values(ctx, raw.height())),
    ])
}
