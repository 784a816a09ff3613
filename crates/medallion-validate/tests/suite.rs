//! Quality suite over the fixture extracts.

use std::path::Path;

use chrono::NaiveDate;

use medallion_model::{CheckKind, CommitMode, TableRegistry};
use medallion_transform::LoadContext;
use medallion_validate::{CheckInput, default_checks, run_suite};
use medallion_warehouse::{SurrogateKeys, Warehouse, project_gold, run_full_reload};

fn ctx() -> LoadContext {
    let loaded_at = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    LoadContext::new(loaded_at)
}

fn loaded() -> Warehouse {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata");
    let mut warehouse = Warehouse::new(TableRegistry::default());
    let outcome = run_full_reload(&mut warehouse, &root, ctx(), CommitMode::PerTable);
    assert!(outcome.is_success());
    warehouse
}

#[test]
fn suite_reports_every_check() {
    let warehouse = loaded();
    let gold = project_gold(&warehouse, &mut SurrogateKeys::Positional).unwrap();
    let input = CheckInput {
        warehouse: &warehouse,
        gold: &gold,
        as_of: ctx().as_of,
    };
    let report = run_suite(&input).unwrap();

    let rendered: Vec<String> = report
        .results
        .iter()
        .map(|r| {
            let kind = match r.kind {
                CheckKind::Assertion => "assert",
                CheckKind::Listing => "list",
            };
            format!("{kind} {} {}", r.name, r.row_count)
        })
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    assert dim_customers_key_unique 0
    assert dim_products_key_unique 0
    assert fact_sales_referential_integrity 1
    assert crm_cust_info_natural_key 0
    assert crm_prd_info_natural_key 0
    assert erp_cust_az12_natural_key 0
    assert erp_loc_a101_natural_key 0
    assert erp_px_cat_g1v2_natural_key 0
    assert crm_cust_info_cst_firstname_whitespace 0
    assert crm_cust_info_cst_lastname_whitespace 0
    assert crm_prd_info_prd_nm_whitespace 0
    assert erp_loc_a101_cntry_whitespace 0
    assert erp_px_cat_g1v2_cat_whitespace 0
    assert erp_px_cat_g1v2_subcat_whitespace 0
    assert erp_px_cat_g1v2_maintenance_whitespace 0
    assert crm_prd_info_date_order 0
    assert crm_prd_info_cost 0
    assert crm_sales_details_date_order 0
    assert crm_sales_details_arithmetic 1
    assert erp_cust_az12_birthdate_range 0
    list crm_cust_info_cst_marital_status_values 2
    list crm_cust_info_cst_gndr_values 3
    list crm_prd_info_prd_line_values 2
    list erp_cust_az12_gen_values 3
    list erp_loc_a101_cntry_values 3
    list erp_px_cat_g1v2_cat_values 2
    list erp_px_cat_g1v2_subcat_values 2
    list erp_px_cat_g1v2_maintenance_values 2
    ");

    assert_eq!(report.results.len(), default_checks().len());
    assert_eq!(report.failure_count(), 2);
}

#[test]
fn failing_checks_carry_sample_rows() {
    let warehouse = loaded();
    let gold = project_gold(&warehouse, &mut SurrogateKeys::Positional).unwrap();
    let input = CheckInput {
        warehouse: &warehouse,
        gold: &gold,
        as_of: ctx().as_of,
    };
    let report = run_suite(&input).unwrap();

    let orphan = report.get("fact_sales_referential_integrity").unwrap();
    assert_eq!(orphan.table, "gold.fact_sales");
    assert!(orphan.samples[0].starts_with("order_number=SO43699, product_key=<null>"));

    let genders = report.get("crm_cust_info_cst_gndr_values").unwrap();
    assert!(genders.passed());
    assert_eq!(genders.samples, vec!["Female", "Male", "n/a"]);
}

#[test]
fn suite_needs_loaded_silver() {
    let warehouse = loaded();
    let gold = project_gold(&warehouse, &mut SurrogateKeys::Positional).unwrap();
    let empty = Warehouse::new(TableRegistry::default());
    let input = CheckInput {
        warehouse: &empty,
        gold: &gold,
        as_of: ctx().as_of,
    };
    let err = run_suite(&input).unwrap_err();
    assert_eq!(err.code(), "WAREHOUSE_MISSING_TABLE");
}
