//! Full-reload batches over the fixture extracts.

mod common;

use std::fs;

use medallion_ingest::text_values;
use medallion_model::columns::DWH_CREATE_DATE;
use medallion_model::{CommitMode, ErrorSeverity, Layer, StepStatus, TableKind, TableRegistry};
use medallion_warehouse::{
    CleansingSource, ExtractSource, FullReloadLoader, Warehouse, run_full_reload,
};

use common::{copy_testdata, ctx, loaded, testdata};

#[test]
fn full_reload_loads_every_table_in_registry_order() {
    let mut warehouse = Warehouse::new(TableRegistry::default());
    let outcome = run_full_reload(&mut warehouse, &testdata(), ctx(), CommitMode::PerTable);
    assert!(outcome.is_success());

    let bronze_order: Vec<TableKind> = outcome.bronze.steps.iter().map(|s| s.kind).collect();
    assert_eq!(bronze_order, TableKind::ALL.to_vec());
    assert!(
        outcome
            .bronze
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Loaded)
    );
    assert_eq!(outcome.bronze.step(TableKind::CrmCustInfo).unwrap().rows, 5);
    assert_eq!(
        outcome.bronze.step(TableKind::CrmCustInfo).unwrap().table,
        "bronze.crm_cust_info"
    );

    let silver = outcome.silver.as_ref().unwrap();
    assert_eq!(silver.layer, Layer::Silver);
    assert_eq!(silver.step(TableKind::CrmCustInfo).unwrap().rows, 3);
    assert_eq!(silver.step(TableKind::CrmSalesDetails).unwrap().rows, 3);
    assert_eq!(
        silver.loaded_rows(),
        warehouse.row_count(Layer::Silver, TableKind::CrmCustInfo)
            + warehouse.row_count(Layer::Silver, TableKind::CrmPrdInfo)
            + warehouse.row_count(Layer::Silver, TableKind::CrmSalesDetails)
            + warehouse.row_count(Layer::Silver, TableKind::ErpLocA101)
            + warehouse.row_count(Layer::Silver, TableKind::ErpCustAz12)
            + warehouse.row_count(Layer::Silver, TableKind::ErpPxCatG1v2)
    );
}

#[test]
fn silver_rows_are_stamped_with_the_load_timestamp() {
    let warehouse = loaded();
    for kind in TableKind::ALL {
        let frame = warehouse.require(Layer::Silver, kind).unwrap();
        let stamps = text_values(frame, DWH_CREATE_DATE).unwrap();
        assert!(
            stamps
                .iter()
                .all(|s| s.as_deref() == Some("2025-03-01 08:30:00")),
            "{kind}"
        );
    }
}

#[test]
fn reload_is_idempotent() {
    let mut warehouse = loaded();
    let first = warehouse
        .require(Layer::Silver, TableKind::CrmPrdInfo)
        .unwrap()
        .clone();
    let outcome = run_full_reload(&mut warehouse, &testdata(), ctx(), CommitMode::PerTable);
    assert!(outcome.is_success());
    let second = warehouse.require(Layer::Silver, TableKind::CrmPrdInfo).unwrap();
    assert!(first.equals_missing(second));
    assert_eq!(warehouse.row_count(Layer::Bronze, TableKind::CrmCustInfo), 5);
}

#[test]
fn missing_extract_stops_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    copy_testdata(dir.path());
    fs::remove_file(dir.path().join("source_crm/sales_details.csv")).unwrap();

    let mut warehouse = Warehouse::new(TableRegistry::default());
    let outcome = run_full_reload(&mut warehouse, dir.path(), ctx(), CommitMode::PerTable);
    assert!(!outcome.is_success());
    assert!(outcome.silver.is_none());

    let report = &outcome.bronze;
    let statuses: Vec<StepStatus> = report.steps.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![
            StepStatus::Loaded,
            StepStatus::Loaded,
            StepStatus::Failed,
            StepStatus::Skipped,
            StepStatus::Skipped,
            StepStatus::Skipped,
        ]
    );
    let error = report.error.as_ref().unwrap();
    assert_eq!(error.code, "INGEST_MISSING_SOURCE");
    assert_eq!(error.severity, ErrorSeverity::Error);
    assert!(!report.rolled_back);

    // Per-table commits keep earlier tables and leave the failing one empty.
    assert_eq!(warehouse.row_count(Layer::Bronze, TableKind::CrmCustInfo), 5);
    assert!(warehouse.table(Layer::Bronze, TableKind::CrmSalesDetails).is_some());
    assert_eq!(warehouse.row_count(Layer::Bronze, TableKind::CrmSalesDetails), 0);
    assert!(warehouse.table(Layer::Bronze, TableKind::ErpLocA101).is_none());
}

#[test]
fn atomic_batch_restores_the_previous_layer() {
    let dir = tempfile::tempdir().unwrap();
    copy_testdata(dir.path());
    let mut warehouse = common::loaded_from(dir.path());

    fs::write(
        dir.path().join("source_crm/cust_info.csv"),
        "cst_id,cst_key,cst_firstname,cst_lastname,cst_marital_status,cst_gndr,cst_create_date\n\
         1,AW1,A,B,S,M,2024-01-01\n",
    )
    .unwrap();
    fs::remove_file(dir.path().join("source_erp/PX_CAT_G1V2.csv")).unwrap();

    let loader = FullReloadLoader::new(CommitMode::Atomic);
    let report = loader.run(&mut warehouse, &ExtractSource::new(dir.path()));
    assert!(!report.is_success());
    assert!(report.rolled_back);
    assert_eq!(
        report.failed_step().unwrap().kind,
        TableKind::ErpPxCatG1v2
    );
    assert_eq!(warehouse.row_count(Layer::Bronze, TableKind::CrmCustInfo), 5);
    assert_eq!(warehouse.row_count(Layer::Bronze, TableKind::ErpPxCatG1v2), 2);
}

#[test]
fn unconvertible_value_fails_with_type_conversion() {
    let dir = tempfile::tempdir().unwrap();
    copy_testdata(dir.path());
    fs::write(
        dir.path().join("source_crm/prd_info.csv"),
        "prd_id,prd_key,prd_nm,prd_cost,prd_line,prd_start_dt,prd_end_dt\n\
         210,CO-RF-FR-R92B-58,Frame,cheap,R,2003-07-01,\n",
    )
    .unwrap();

    let mut warehouse = Warehouse::new(TableRegistry::default());
    let report = FullReloadLoader::default().run(&mut warehouse, &ExtractSource::new(dir.path()));
    let error = report.error.unwrap();
    assert_eq!(error.code, "INGEST_TYPE_CONVERSION");
    assert!(error.message.contains("prd_cost"));
}

#[test]
fn silver_reload_requires_bronze() {
    let mut warehouse = Warehouse::new(TableRegistry::default());
    let report = FullReloadLoader::default().run(&mut warehouse, &CleansingSource::new(ctx()));
    let error = report.error.unwrap();
    assert_eq!(error.code, "WAREHOUSE_MISSING_TABLE");
    assert_eq!(error.severity, ErrorSeverity::Fatal);
    assert_eq!(report.steps[0].status, StepStatus::Failed);
}
