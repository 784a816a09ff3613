#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use medallion_model::{CommitMode, TableKind, TableRegistry};
use medallion_transform::LoadContext;
use medallion_warehouse::{Warehouse, run_full_reload};

/// The shared extract fixture at the workspace root.
pub fn testdata() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata")
}

/// Copy the fixture extracts into `dest` so a test can edit them.
pub fn copy_testdata(dest: &Path) {
    for kind in TableKind::ALL {
        let relative = kind.default_source_file();
        let target = dest.join(relative);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::copy(testdata().join(relative), target).unwrap();
    }
}

pub fn ctx() -> LoadContext {
    let loaded_at = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    LoadContext::new(loaded_at)
}

/// A warehouse with both layers loaded from `root`.
pub fn loaded_from(root: &Path) -> Warehouse {
    let mut warehouse = Warehouse::new(TableRegistry::default());
    let outcome = run_full_reload(&mut warehouse, root, ctx(), CommitMode::PerTable);
    assert!(outcome.is_success(), "fixture reload failed: {outcome:?}");
    warehouse
}

pub fn loaded() -> Warehouse {
    loaded_from(&testdata())
}
