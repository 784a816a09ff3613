//! Key uniqueness and referential integrity.

use std::collections::HashMap;

use polars::prelude::{DataFrame, PolarsResult};

use medallion_ingest::text_values;
use medallion_model::columns::{CUSTOMER_KEY, PRODUCT_KEY};

use crate::checks::filter_rows;

/// Rows whose key value occurs more than once. Nulls are ignored.
pub fn duplicate_keys(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let values = text_values(df, column)?;
    let counts = occurrences(&values);
    let mask: Vec<bool> = values
        .iter()
        .map(|value| value.as_ref().is_some_and(|v| counts[v] > 1))
        .collect();
    filter_rows(df, &mask)
}

/// Rows whose natural key is null or duplicated.
pub fn invalid_natural_keys(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let values = text_values(df, column)?;
    let counts = occurrences(&values);
    let mask: Vec<bool> = values
        .iter()
        .map(|value| value.as_ref().is_none_or(|v| counts[v] > 1))
        .collect();
    filter_rows(df, &mask)
}

/// Fact rows that did not resolve to a product or customer.
pub fn unresolved_references(fact: &DataFrame) -> PolarsResult<DataFrame> {
    let products = text_values(fact, PRODUCT_KEY)?;
    let customers = text_values(fact, CUSTOMER_KEY)?;
    let mask: Vec<bool> = products
        .iter()
        .zip(&customers)
        .map(|(product, customer)| product.is_none() || customer.is_none())
        .collect();
    filter_rows(fact, &mask)
}

fn occurrences(values: &[Option<String>]) -> HashMap<&String, usize> {
    let mut counts = HashMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}
