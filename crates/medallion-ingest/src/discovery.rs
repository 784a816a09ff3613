use std::path::{Path, PathBuf};

use medallion_model::{TableKind, TableRegistry};

/// Location of one table's extract under a source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub kind: TableKind,
    pub path: PathBuf,
    pub exists: bool,
}

/// Resolve every registered extract under `root`, in load order.
pub fn discover_source_files(registry: &TableRegistry, root: &Path) -> Vec<SourceFile> {
    registry
        .tables()
        .iter()
        .map(|entry| {
            let path = if entry.source_file.is_absolute() {
                entry.source_file.clone()
            } else {
                root.join(&entry.source_file)
            };
            let exists = path.is_file();
            SourceFile {
                kind: entry.kind,
                path,
                exists,
            }
        })
        .collect()
}

/// Extracts that are registered but missing on disk.
pub fn missing_source_files(registry: &TableRegistry, root: &Path) -> Vec<SourceFile> {
    discover_source_files(registry, root)
        .into_iter()
        .filter(|source| !source.exists)
        .collect()
}
