//! Gold star schema projections over the fixture extracts.

mod common;

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use medallion_ingest::{int_values, text_values};
use medallion_model::columns::{
    BIRTHDATE, CATEGORY, COST, COUNTRY, CUSTOMER_ID, CUSTOMER_KEY, GENDER, PRICE, PRODUCT_ID,
    PRODUCT_KEY, PRODUCT_NUMBER, SALES_AMOUNT, START_DATE,
};
use medallion_model::{GoldView, KeyStrategy};
use medallion_warehouse::{KeyRegistry, SurrogateKeys, project_gold};

use common::{copy_testdata, loaded, loaded_from};

fn text(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

#[test]
fn customer_dimension_merges_crm_and_erp_attributes() {
    let gold = project_gold(&loaded(), &mut SurrogateKeys::Positional).unwrap();
    let customers = &gold.dim_customers;

    assert_eq!(
        int_values(customers, CUSTOMER_ID).unwrap(),
        vec![Some(7), Some(11000), Some(11001)]
    );
    assert_eq!(
        int_values(customers, CUSTOMER_KEY).unwrap(),
        vec![Some(1), Some(2), Some(3)]
    );
    assert_eq!(
        text_values(customers, COUNTRY).unwrap(),
        text(&[Some("Germany"), Some("Australia"), Some("United States")])
    );
    // CRM gender wins; the ERP gender fills in where CRM has none.
    assert_eq!(
        text_values(customers, GENDER).unwrap(),
        text(&[Some("Female"), Some("Male"), Some("Female")])
    );
    // The 2050 birthdate was nulled during cleansing.
    assert_eq!(
        text_values(customers, BIRTHDATE).unwrap(),
        text(&[Some("1980-01-01"), Some("1971-10-06"), None])
    );
}

#[test]
fn product_dimension_holds_current_versions_only() {
    let gold = project_gold(&loaded(), &mut SurrogateKeys::Positional).unwrap();
    let products = &gold.dim_products;

    assert_eq!(
        int_values(products, PRODUCT_ID).unwrap(),
        vec![Some(210), Some(211), Some(213)]
    );
    assert_eq!(
        text_values(products, PRODUCT_NUMBER).unwrap(),
        text(&[Some("FR-R92B-58"), Some("FR-R92R-58"), Some("HL-U509-R")])
    );
    assert_eq!(
        text_values(products, START_DATE).unwrap(),
        text(&[Some("2003-07-01"), Some("2011-07-01"), Some("2012-07-01")])
    );
    assert_eq!(
        text_values(products, CATEGORY).unwrap(),
        text(&[Some("Components"), Some("Components"), Some("Accessories")])
    );
    assert_eq!(
        int_values(products, COST).unwrap(),
        vec![Some(0), Some(12), Some(14)]
    );
}

#[test]
fn fact_rows_resolve_dimension_keys() {
    let gold = project_gold(&loaded(), &mut SurrogateKeys::Positional).unwrap();
    let facts = &gold.fact_sales;

    assert_eq!(facts.height(), 3);
    assert_eq!(
        int_values(facts, PRODUCT_KEY).unwrap(),
        vec![Some(2), Some(3), None]
    );
    assert_eq!(
        int_values(facts, CUSTOMER_KEY).unwrap(),
        vec![Some(2), Some(3), None]
    );
    assert_eq!(
        int_values(facts, SALES_AMOUNT).unwrap(),
        vec![Some(3578), Some(70), Some(50)]
    );
    assert_eq!(
        int_values(facts, PRICE).unwrap(),
        vec![Some(3578), None, Some(50)]
    );
}

#[test]
fn gold_views_follow_their_declared_columns() {
    let gold = project_gold(&loaded(), &mut SurrogateKeys::Positional).unwrap();
    for view in GoldView::ALL {
        let expected: Vec<&str> = view.columns().iter().map(|c| c.name).collect();
        let actual: Vec<&str> = gold
            .get(view)
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(actual, expected, "{view}");
    }
}

#[test]
fn dimension_keys_are_unique() {
    let gold = project_gold(&loaded(), &mut SurrogateKeys::Positional).unwrap();
    for (view, column) in [
        (GoldView::DimCustomers, CUSTOMER_KEY),
        (GoldView::DimProducts, PRODUCT_KEY),
    ] {
        let keys = int_values(gold.get(view), column).unwrap();
        let distinct: HashSet<_> = keys.iter().collect();
        assert_eq!(distinct.len(), keys.len(), "{view}");
    }
}

#[test]
fn stable_keys_do_not_shift_when_customers_are_added() {
    let dir = tempfile::tempdir().unwrap();
    copy_testdata(dir.path());

    let mut keys = SurrogateKeys::for_strategy(KeyStrategy::Stable, KeyRegistry::default());
    let before = project_gold(&loaded_from(dir.path()), &mut keys).unwrap();
    assert_eq!(
        int_values(&before.dim_customers, CUSTOMER_KEY).unwrap(),
        vec![Some(1), Some(2), Some(3)]
    );

    let mut file = OpenOptions::new()
        .append(true)
        .open(dir.path().join("source_crm/cust_info.csv"))
        .unwrap();
    writeln!(file, "5,AW00000005,New,Customer,S,M,2025-02-01").unwrap();

    let after = project_gold(&loaded_from(dir.path()), &mut keys).unwrap();
    assert_eq!(
        int_values(&after.dim_customers, CUSTOMER_ID).unwrap(),
        vec![Some(5), Some(7), Some(11000), Some(11001)]
    );
    assert_eq!(
        int_values(&after.dim_customers, CUSTOMER_KEY).unwrap(),
        vec![Some(4), Some(1), Some(2), Some(3)]
    );

    let mut positional = SurrogateKeys::Positional;
    let shifted = project_gold(&loaded_from(dir.path()), &mut positional).unwrap();
    assert_eq!(
        int_values(&shifted.dim_customers, CUSTOMER_KEY).unwrap(),
        vec![Some(1), Some(2), Some(3), Some(4)]
    );
}

fn append_products(root: &Path, lines: &[&str]) {
    let mut file = OpenOptions::new()
        .append(true)
        .open(root.join("source_crm/prd_info.csv"))
        .unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
}

#[test]
fn new_product_version_keeps_its_stable_key() {
    let dir = tempfile::tempdir().unwrap();
    copy_testdata(dir.path());

    let mut keys = SurrogateKeys::for_strategy(KeyStrategy::Stable, KeyRegistry::default());
    let before = project_gold(&loaded_from(dir.path()), &mut keys).unwrap();
    assert_eq!(
        int_values(&before.dim_products, PRODUCT_KEY).unwrap(),
        vec![Some(1), Some(2), Some(3)]
    );

    append_products(
        dir.path(),
        &["214,CO-RF-FR-R92B-58,HL Road Frame - Black- 58,20,R ,2013-07-01,"],
    );

    let after = project_gold(&loaded_from(dir.path()), &mut keys).unwrap();
    assert_eq!(
        int_values(&after.dim_products, PRODUCT_ID).unwrap(),
        vec![Some(211), Some(213), Some(214)]
    );
    assert_eq!(
        text_values(&after.dim_products, PRODUCT_NUMBER).unwrap(),
        text(&[Some("FR-R92R-58"), Some("HL-U509-R"), Some("FR-R92B-58")])
    );
    assert_eq!(
        int_values(&after.dim_products, PRODUCT_KEY).unwrap(),
        vec![Some(2), Some(3), Some(1)]
    );
    assert_eq!(keys.registry().unwrap().len(GoldView::DimProducts), 3);
}

#[test]
fn products_without_a_unique_number_get_no_stable_key() {
    let dir = tempfile::tempdir().unwrap();
    copy_testdata(dir.path());
    append_products(
        dir.path(),
        &[
            "215,,Unnamed Part,5,M ,2014-01-01,",
            "216,,Unnamed Part,6,M ,2014-01-01,",
            "217,CO-RF-FR-R92R-58,HL Road Frame - Red- 58,13,R ,2011-07-01,",
        ],
    );

    let mut keys = SurrogateKeys::for_strategy(KeyStrategy::Stable, KeyRegistry::default());
    let gold = project_gold(&loaded_from(dir.path()), &mut keys).unwrap();
    let products = &gold.dim_products;

    assert_eq!(
        int_values(products, PRODUCT_ID).unwrap(),
        vec![Some(210), Some(211), Some(217), Some(213), Some(215), Some(216)]
    );
    assert_eq!(
        int_values(products, PRODUCT_KEY).unwrap(),
        vec![Some(1), Some(2), None, Some(3), None, None]
    );

    let assigned: Vec<i64> = int_values(products, PRODUCT_KEY)
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    let distinct: HashSet<_> = assigned.iter().collect();
    assert_eq!(distinct.len(), assigned.len());
    assert_eq!(keys.registry().unwrap().get(GoldView::DimProducts, ""), None);
}
