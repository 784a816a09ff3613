//! CSV export of silver tables and gold projections.
//!
//! Files land under one directory per schema:
//! `<dir>/<silver schema>/<table>.csv` and `<dir>/<gold schema>/<view>.csv`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info};

use medallion_model::{GoldView, Layer};
use medallion_warehouse::{GoldFrames, Warehouse};

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Qualified table or view name.
    pub table: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Write every silver table, then every gold view.
///
/// # Errors
///
/// Returns an error if a silver table is not loaded or a file cannot be
/// written.
pub fn export_outputs(
    dir: &Path,
    warehouse: &Warehouse,
    gold: &GoldFrames,
) -> Result<Vec<ExportedFile>> {
    let registry = warehouse.registry();
    let mut exported = Vec::new();

    let silver_dir = dir.join(registry.schema(Layer::Silver));
    for kind in registry.kinds() {
        let frame = warehouse
            .require(Layer::Silver, kind)
            .with_context(|| format!("export {}", kind.table_name()))?;
        let path = silver_dir.join(format!("{}.csv", kind.table_name()));
        write_frame_csv(frame, &path)?;
        exported.push(ExportedFile {
            table: registry.qualified_name(Layer::Silver, kind),
            path,
            rows: frame.height(),
        });
    }

    let gold_dir = dir.join(registry.schema(Layer::Gold));
    for view in GoldView::ALL {
        let frame = gold.get(view);
        let path = gold_dir.join(format!("{}.csv", view.view_name()));
        write_frame_csv(frame, &path)?;
        exported.push(ExportedFile {
            table: registry.qualified_view(view),
            path,
            rows: frame.height(),
        });
    }

    info!(
        files = exported.len(),
        dir = %dir.display(),
        "outputs written"
    );
    Ok(exported)
}

/// Write a frame with a header row; nulls become empty fields.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or the frame
/// cannot be serialized.
pub fn write_frame_csv(frame: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut frame = frame.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_null_value(String::new())
        .finish(&mut frame)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = frame.height(), "csv written");
    Ok(())
}
