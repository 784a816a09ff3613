//! Check predicates over hand-built frames.

use chrono::NaiveDate;
use polars::prelude::DataFrame;

use medallion_ingest::{ColumnValues, build_frame, text_values};
use medallion_model::columns::{
    BDATE, CUSTOMER_KEY, PRD_END_DT, PRD_START_DT, PRODUCT_KEY, SLS_DUE_DT, SLS_ORDER_DT,
    SLS_PRICE, SLS_QUANTITY, SLS_SALES, SLS_SHIP_DT,
};
use medallion_validate::checks::{amounts, dates, keys, text};
use medallion_validate::render_rows;

fn texts(values: &[Option<&str>]) -> ColumnValues {
    ColumnValues::Text(values.iter().map(|v| v.map(str::to_string)).collect())
}

fn ints(values: &[Option<i64>]) -> ColumnValues {
    ColumnValues::Int(values.to_vec())
}

#[test]
fn duplicate_keys_returns_every_row_of_a_repeated_key() {
    let df = build_frame(vec![("k", ints(&[Some(1), Some(2), Some(1), None]))]).unwrap();
    assert_eq!(keys::duplicate_keys(&df, "k").unwrap().height(), 2);
}

#[test]
fn natural_keys_flag_nulls_and_duplicates() {
    let df = build_frame(vec![("id", texts(&[Some("A"), None, Some("B"), Some("B")]))]).unwrap();
    assert_eq!(keys::invalid_natural_keys(&df, "id").unwrap().height(), 3);
}

#[test]
fn unresolved_references_need_both_keys() {
    let df = build_frame(vec![
        (PRODUCT_KEY, ints(&[Some(1), None, Some(3)])),
        (CUSTOMER_KEY, ints(&[Some(1), Some(2), None])),
    ])
    .unwrap();
    assert_eq!(keys::unresolved_references(&df).unwrap().height(), 2);
}

#[test]
fn untrimmed_values_ignore_nulls() {
    let df = build_frame(vec![("name", texts(&[Some(" Jon"), Some("Ann"), None, Some("Lee ")]))])
        .unwrap();
    let offending = text::untrimmed_values(&df, "name").unwrap();
    assert_eq!(
        text_values(&offending, "name").unwrap(),
        vec![Some(" Jon".to_string()), Some("Lee ".to_string())]
    );
}

#[test]
fn distinct_values_are_sorted_with_null_first() {
    let df = build_frame(vec![("gen", texts(&[Some("Male"), None, Some("Female"), Some("Male")]))])
        .unwrap();
    let listing = text::distinct_values(&df, "gen").unwrap();
    assert_eq!(
        text_values(&listing, "gen").unwrap(),
        vec![None, Some("Female".to_string()), Some("Male".to_string())]
    );
}

#[test]
fn product_end_before_start_is_flagged() {
    let df = build_frame(vec![
        (PRD_START_DT, texts(&[Some("2012-07-01"), Some("2012-07-01"), None])),
        (PRD_END_DT, texts(&[Some("2012-06-30"), Some("2013-06-30"), Some("2000-01-01")])),
    ])
    .unwrap();
    assert_eq!(dates::product_end_before_start(&df).unwrap().height(), 1);
}

#[test]
fn order_after_ship_or_due_is_flagged() {
    let df = build_frame(vec![
        (
            SLS_ORDER_DT,
            texts(&[Some("2011-01-10"), Some("2011-01-01"), Some("2011-01-09"), None]),
        ),
        (
            SLS_SHIP_DT,
            texts(&[Some("2011-01-05"), Some("2011-01-05"), None, Some("2011-01-01")]),
        ),
        (
            SLS_DUE_DT,
            texts(&[Some("2011-01-20"), Some("2011-01-20"), Some("2011-01-08"), None]),
        ),
    ])
    .unwrap();
    assert_eq!(dates::order_after_ship_or_due(&df).unwrap().height(), 2);
}

#[test]
fn birthdates_outside_range_are_flagged() {
    let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let df = build_frame(vec![(
        BDATE,
        texts(&[Some("1923-12-31"), Some("1924-01-01"), Some("2025-03-02"), None]),
    )])
    .unwrap();
    assert_eq!(dates::birthdates_out_of_range(&df, as_of).unwrap().height(), 2);
}

fn sales(rows: &[(Option<i64>, Option<i64>, Option<i64>)]) -> DataFrame {
    build_frame(vec![
        (SLS_SALES, ColumnValues::Int(rows.iter().map(|r| r.0).collect())),
        (SLS_QUANTITY, ColumnValues::Int(rows.iter().map(|r| r.1).collect())),
        (SLS_PRICE, ColumnValues::Int(rows.iter().map(|r| r.2).collect())),
    ])
    .unwrap()
}

#[test]
fn sales_arithmetic_requires_positive_consistent_figures() {
    let df = sales(&[
        (Some(50), Some(2), Some(25)),
        (Some(40), Some(2), Some(25)),
        (Some(0), Some(1), Some(0)),
        (Some(10), Some(1), None),
    ]);
    assert_eq!(amounts::inconsistent_sales(&df).unwrap().height(), 3);
}

#[test]
fn rendered_rows_name_their_columns() {
    let df = sales(&[(Some(10), Some(1), None)]);
    assert_eq!(
        render_rows(&df, 5).unwrap(),
        vec!["sls_sales=10, sls_quantity=1, sls_price=<null>".to_string()]
    );
}
