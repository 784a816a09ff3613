use polars::prelude::DataFrame;

use medallion_ingest::{ColumnValues, build_frame, int_values, text_values};
use medallion_model::columns::{
    CAT, CAT_ID, CATEGORY, CATEGORY_ID, COST, ID, MAINTENANCE, PRD_COST, PRD_END_DT, PRD_ID,
    PRD_KEY, PRD_LINE, PRD_NM, PRD_START_DT, PRODUCT_ID, PRODUCT_KEY, PRODUCT_LINE,
    PRODUCT_NAME, PRODUCT_NUMBER, START_DATE, SUBCAT, SUBCATEGORY,
};
use medallion_model::{GoldView, Layer, TableKind};

use crate::error::Result;
use crate::gold::{first_row_by, lookup};
use crate::keys::SurrogateKeys;
use crate::store::Warehouse;

/// Product dimension: current product versions only (no end date), ordered
/// by start date then product number, enriched with the category mapping.
///
/// # Errors
///
/// Returns an error if a silver table is missing or a frame cannot be built.
pub fn dim_products(warehouse: &Warehouse, keys: &mut SurrogateKeys) -> Result<DataFrame> {
    let products = warehouse.require(Layer::Silver, TableKind::CrmPrdInfo)?;
    let categories = warehouse.require(Layer::Silver, TableKind::ErpPxCatG1v2)?;

    let ends = text_values(products, PRD_END_DT)?;
    let starts = text_values(products, PRD_START_DT)?;
    let numbers = text_values(products, PRD_KEY)?;

    // ISO date text orders chronologically; missing start dates sort first.
    let mut order: Vec<usize> = (0..products.height())
        .filter(|&row| ends[row].is_none())
        .collect();
    order.sort_by(|&a, &b| (&starts[a], &numbers[a]).cmp(&(&starts[b], &numbers[b])));

    let ids = int_values(products, PRD_ID)?;
    let names = text_values(products, PRD_NM)?;
    let category_ids = text_values(products, CAT_ID)?;
    let costs = int_values(products, PRD_COST)?;
    let lines = text_values(products, PRD_LINE)?;

    let mapping_ids = text_values(categories, ID)?;
    let mapping_rows = first_row_by(&mapping_ids);
    let category_names = text_values(categories, CAT)?;
    let subcategories = text_values(categories, SUBCAT)?;
    let maintenance = text_values(categories, MAINTENANCE)?;

    let matched: Vec<Option<usize>> = order
        .iter()
        .map(|&row| {
            category_ids[row]
                .as_ref()
                .and_then(|id| mapping_rows.get(id).copied())
        })
        .collect();
    let joined = |values: &[Option<String>]| -> Vec<Option<String>> {
        matched.iter().map(|&row| lookup(values, row)).collect()
    };
    let pick_text = |values: &[Option<String>]| -> Vec<Option<String>> {
        order.iter().map(|&row| values[row].clone()).collect()
    };
    let pick_int = |values: &[Option<i64>]| -> Vec<Option<i64>> {
        order.iter().map(|&row| values[row]).collect()
    };

    // Keyed by product number: a new version of a product keeps its key.
    let surrogates = keys.assign(GoldView::DimProducts, &pick_text(&numbers));

    Ok(build_frame(vec![
        (PRODUCT_KEY, ColumnValues::Int(surrogates)),
        (PRODUCT_ID, ColumnValues::Int(pick_int(&ids))),
        (PRODUCT_NUMBER, ColumnValues::Text(pick_text(&numbers))),
        (PRODUCT_NAME, ColumnValues::Text(pick_text(&names))),
        (CATEGORY_ID, ColumnValues::Text(pick_text(&category_ids))),
        (CATEGORY, ColumnValues::Text(joined(&category_names))),
        (SUBCATEGORY, ColumnValues::Text(joined(&subcategories))),
        (MAINTENANCE, ColumnValues::Text(joined(&maintenance))),
        (COST, ColumnValues::Int(pick_int(&costs))),
        (PRODUCT_LINE, ColumnValues::Text(pick_text(&lines))),
        (START_DATE, ColumnValues::Text(pick_text(&starts))),
    ])?)
}
