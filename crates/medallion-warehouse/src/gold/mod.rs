//! Gold star schema projections.
//!
//! Dimensions and the fact table are computed from silver on every read;
//! nothing here is stored. Lookups that match more than one row use the first
//! matching row, so a projection never multiplies its driving rows.

mod customers;
mod products;
mod sales;

pub use customers::dim_customers;
pub use products::dim_products;
pub use sales::fact_sales;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use medallion_model::GoldView;

use crate::error::Result;
use crate::keys::SurrogateKeys;
use crate::store::Warehouse;

/// The three gold views of one read.
#[derive(Debug, Clone)]
pub struct GoldFrames {
    pub dim_customers: DataFrame,
    pub dim_products: DataFrame,
    pub fact_sales: DataFrame,
}

impl GoldFrames {
    pub fn get(&self, view: GoldView) -> &DataFrame {
        match view {
            GoldView::DimCustomers => &self.dim_customers,
            GoldView::DimProducts => &self.dim_products,
            GoldView::FactSales => &self.fact_sales,
        }
    }
}

/// Project every gold view from the current silver tables.
///
/// # Errors
///
/// Returns [`crate::WarehouseError::MissingTable`] if silver was never
/// loaded, or a Polars error if a frame cannot be built.
pub fn project_gold(warehouse: &Warehouse, keys: &mut SurrogateKeys) -> Result<GoldFrames> {
    let span = info_span!("project_gold");
    let _guard = span.enter();
    let start = Instant::now();

    let dim_customers = dim_customers(warehouse, keys)?;
    let dim_products = dim_products(warehouse, keys)?;
    let fact_sales = fact_sales(warehouse, &dim_customers, &dim_products)?;

    info!(
        customers = dim_customers.height(),
        products = dim_products.height(),
        sales = fact_sales.height(),
        duration_ms = start.elapsed().as_millis(),
        "gold projected"
    );
    Ok(GoldFrames {
        dim_customers,
        dim_products,
        fact_sales,
    })
}

/// Row index of the first occurrence of every non-null key.
pub(crate) fn first_row_by<K>(keys: &[Option<K>]) -> HashMap<&K, usize>
where
    K: Eq + Hash,
{
    let mut index = HashMap::with_capacity(keys.len());
    for (row, key) in keys.iter().enumerate() {
        if let Some(key) = key {
            index.entry(key).or_insert(row);
        }
    }
    index
}

/// `values[row]` for the looked-up row, null when nothing matched.
pub(crate) fn lookup<T: Clone>(values: &[Option<T>], row: Option<usize>) -> Option<T> {
    row.and_then(|row| values.get(row).cloned().flatten())
}
