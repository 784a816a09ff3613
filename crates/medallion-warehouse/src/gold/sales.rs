use polars::prelude::DataFrame;
use tracing::debug;

use medallion_ingest::{ColumnValues, build_frame, int_values, text_values};
use medallion_model::columns::{
    CUSTOMER_ID, CUSTOMER_KEY, DUE_DATE, ORDER_DATE, ORDER_NUMBER, PRICE, PRODUCT_KEY,
    PRODUCT_NUMBER, QUANTITY, SALES_AMOUNT, SHIPPING_DATE, SLS_CUST_ID, SLS_DUE_DT, SLS_ORD_NUM,
    SLS_ORDER_DT, SLS_PRD_KEY, SLS_PRICE, SLS_QUANTITY, SLS_SALES, SLS_SHIP_DT,
};
use medallion_model::{Layer, TableKind};

use crate::error::Result;
use crate::gold::{first_row_by, lookup};
use crate::store::Warehouse;

/// Sales fact: one row per silver sales line with dimension keys resolved
/// through the product number and customer identifier. Unmatched lines keep
/// a null key.
///
/// # Errors
///
/// Returns an error if the silver sales table is missing, a dimension frame
/// lacks its key columns, or a frame cannot be built.
pub fn fact_sales(
    warehouse: &Warehouse,
    customers: &DataFrame,
    products: &DataFrame,
) -> Result<DataFrame> {
    let sales = warehouse.require(Layer::Silver, TableKind::CrmSalesDetails)?;

    let product_numbers = text_values(products, PRODUCT_NUMBER)?;
    let product_rows = first_row_by(&product_numbers);
    let product_keys = int_values(products, PRODUCT_KEY)?;

    let customer_ids = int_values(customers, CUSTOMER_ID)?;
    let customer_rows = first_row_by(&customer_ids);
    let customer_keys = int_values(customers, CUSTOMER_KEY)?;

    let product_refs: Vec<Option<i64>> = text_values(sales, SLS_PRD_KEY)?
        .iter()
        .map(|number| {
            let row = number.as_ref().and_then(|n| product_rows.get(n).copied());
            lookup(&product_keys, row)
        })
        .collect();
    let customer_refs: Vec<Option<i64>> = int_values(sales, SLS_CUST_ID)?
        .iter()
        .map(|id| {
            let row = id.as_ref().and_then(|id| customer_rows.get(id).copied());
            lookup(&customer_keys, row)
        })
        .collect();

    debug!(
        lines = sales.height(),
        unmatched_products = product_refs.iter().filter(|key| key.is_none()).count(),
        unmatched_customers = customer_refs.iter().filter(|key| key.is_none()).count(),
        "resolved fact dimension keys"
    );

    Ok(build_frame(vec![
        (ORDER_NUMBER, ColumnValues::Text(text_values(sales, SLS_ORD_NUM)?)),
        (PRODUCT_KEY, ColumnValues::Int(product_refs)),
        (CUSTOMER_KEY, ColumnValues::Int(customer_refs)),
        (ORDER_DATE, ColumnValues::Text(text_values(sales, SLS_ORDER_DT)?)),
        (SHIPPING_DATE, ColumnValues::Text(text_values(sales, SLS_SHIP_DT)?)),
        (DUE_DATE, ColumnValues::Text(text_values(sales, SLS_DUE_DT)?)),
        (SALES_AMOUNT, ColumnValues::Int(int_values(sales, SLS_SALES)?)),
        (QUANTITY, ColumnValues::Int(int_values(sales, SLS_QUANTITY)?)),
        (PRICE, ColumnValues::Int(int_values(sales, SLS_PRICE)?)),
    ])?)
}
