//! Pipeline stages and CSV export over the fixture extracts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use medallion_cli::export::export_outputs;
use medallion_cli::pipeline::{
    ConfigOverrides, DEFAULT_KEY_REGISTRY, apply_overrides, default_key_registry, load_config,
    project, reload, validate,
};
use medallion_model::{CommitMode, GoldView, KeyStrategy, TableKind};
use medallion_transform::LoadContext;
use medallion_warehouse::KeyRegistry;

fn testdata() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata")
}

fn ctx() -> LoadContext {
    let loaded_at = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    LoadContext::new(loaded_at)
}

#[test]
fn config_defaults_without_a_file() {
    let config = load_config(None).unwrap();
    assert_eq!(config.reload.commit_mode, CommitMode::PerTable);
    assert_eq!(config.reload.surrogate_keys, KeyStrategy::Positional);
    assert_eq!(config.tables.len(), TableKind::ALL.len());
}

#[test]
fn flags_switch_features_on_but_never_off() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.toml");
    fs::write(&path, "[reload]\ncommit_mode = \"atomic\"\n").unwrap();

    let mut config = load_config(Some(&path)).unwrap();
    apply_overrides(&mut config, ConfigOverrides::default());
    assert_eq!(config.reload.commit_mode, CommitMode::Atomic);
    assert_eq!(config.reload.surrogate_keys, KeyStrategy::Positional);

    apply_overrides(
        &mut config,
        ConfigOverrides {
            atomic: false,
            stable_keys: true,
        },
    );
    assert_eq!(config.reload.commit_mode, CommitMode::Atomic);
    assert_eq!(config.reload.surrogate_keys, KeyStrategy::Stable);
}

#[test]
fn invalid_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.toml");
    fs::write(&path, "[reload]\ncommit_mode = \"sometimes\"\n").unwrap();
    let err = load_config(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("pipeline.toml"));
}

#[test]
fn reload_project_and_validate() {
    let config = load_config(None).unwrap();
    let reloaded = reload(&testdata(), &config, ctx()).unwrap();
    assert!(reloaded.outcome.is_success());

    let unused = TempDir::new().unwrap();
    let registry_path = unused.path().join(DEFAULT_KEY_REGISTRY);
    let projected = project(&reloaded.warehouse, KeyStrategy::Positional, &registry_path).unwrap();
    assert_eq!(projected.key_registry, None);
    assert!(!registry_path.exists());
    assert_eq!(projected.gold.get(GoldView::DimCustomers).height(), 3);

    let report = validate(&reloaded, &projected.gold, ctx()).unwrap();
    assert_eq!(report.failure_count(), 2);
}

#[test]
fn stable_keys_are_persisted_and_reused() {
    let dir = TempDir::new().unwrap();
    let registry_path = dir.path().join("keys.json");
    let config = load_config(None).unwrap();

    let reloaded = reload(&testdata(), &config, ctx()).unwrap();
    let first = project(&reloaded.warehouse, KeyStrategy::Stable, &registry_path).unwrap();
    assert_eq!(first.key_registry.as_deref(), Some(registry_path.as_path()));

    let registry = KeyRegistry::load(&registry_path).unwrap();
    assert_eq!(registry.get(GoldView::DimCustomers, "11000"), Some(2));
    assert_eq!(registry.len(GoldView::DimProducts), 3);

    let second = project(&reloaded.warehouse, KeyStrategy::Stable, &registry_path).unwrap();
    assert!(
        first
            .gold
            .dim_customers
            .equals_missing(&second.gold.dim_customers)
    );
    assert_eq!(KeyRegistry::load(&registry_path).unwrap(), registry);
}

#[test]
fn validate_refuses_a_failed_reload() {
    let dir = TempDir::new().unwrap();
    let config = load_config(None).unwrap();
    let empty = reload(dir.path(), &config, ctx()).unwrap();
    assert!(!empty.outcome.is_success());

    let good = reload(&testdata(), &config, ctx()).unwrap();
    let projected = project(
        &good.warehouse,
        KeyStrategy::Positional,
        &dir.path().join(DEFAULT_KEY_REGISTRY),
    )
    .unwrap();
    let err = validate(&empty, &projected.gold, ctx()).unwrap_err();
    assert!(err.to_string().contains("bronze"));
}

#[test]
fn key_registry_defaults_next_to_outputs() {
    let source = Path::new("/data/extracts");
    let output = Path::new("/data/out");
    assert_eq!(
        default_key_registry(source, Some(output)),
        output.join(DEFAULT_KEY_REGISTRY)
    );
    assert_eq!(
        default_key_registry(source, None),
        source.join(DEFAULT_KEY_REGISTRY)
    );
}

#[test]
fn export_writes_one_file_per_table_and_view() {
    let out = TempDir::new().unwrap();
    let config = load_config(None).unwrap();
    let reloaded = reload(&testdata(), &config, ctx()).unwrap();
    let projected = project(
        &reloaded.warehouse,
        KeyStrategy::Positional,
        &out.path().join(DEFAULT_KEY_REGISTRY),
    )
    .unwrap();

    let exported = export_outputs(out.path(), &reloaded.warehouse, &projected.gold).unwrap();
    assert_eq!(exported.len(), TableKind::ALL.len() + GoldView::ALL.len());
    assert_eq!(exported[0].table, "silver.crm_cust_info");
    assert_eq!(exported[0].path, out.path().join("silver/crm_cust_info.csv"));

    let customers = fs::read_to_string(out.path().join("silver/crm_cust_info.csv")).unwrap();
    let lines: Vec<&str> = customers.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("cst_id,cst_key,cst_firstname"));
    assert!(lines[0].ends_with("dwh_create_date"));

    let dim = fs::read_to_string(out.path().join("gold/dim_customers.csv")).unwrap();
    assert!(dim.starts_with("customer_key,customer_id,customer_number"));
    assert_eq!(dim.lines().count(), 4);

    let fact = exported
        .iter()
        .find(|file| file.table == "gold.fact_sales")
        .unwrap();
    assert_eq!(fact.rows, 3);
}
