//! Pipeline configuration and the qualified table registry.
//!
//! The schema namespace (bronze/silver/gold), the set of source tables and
//! their extract files are all carried by an explicit [`PipelineConfig`]
//! rather than by ambient naming. A config file only needs to list what it
//! overrides; everything else falls back to the built-in defaults.
//!
//! ```toml
//! [schemas]
//! silver = "standardized"
//!
//! [reload]
//! commit_mode = "atomic"
//! surrogate_keys = "stable"
//!
//! [[tables]]
//! kind = "crm_cust_info"
//! source_file = "crm/customers.csv"
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::table::{GoldView, Layer, TableKind};

/// Schema names of the three layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaNames {
    pub bronze: String,
    pub silver: String,
    pub gold: String,
}

impl Default for SchemaNames {
    fn default() -> Self {
        Self {
            bronze: Layer::Bronze.default_schema().to_string(),
            silver: Layer::Silver.default_schema().to_string(),
            gold: Layer::Gold.default_schema().to_string(),
        }
    }
}

impl SchemaNames {
    pub fn for_layer(&self, layer: Layer) -> &str {
        match layer {
            Layer::Bronze => &self.bronze,
            Layer::Silver => &self.silver,
            Layer::Gold => &self.gold,
        }
    }
}

/// One source table and the extract file that feeds its bronze copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub kind: TableKind,
    /// Extract path, relative to the source root unless absolute.
    pub source_file: PathBuf,
}

impl TableEntry {
    pub fn with_default_source(kind: TableKind) -> Self {
        Self {
            kind,
            source_file: PathBuf::from(kind.default_source_file()),
        }
    }
}

/// How a reload batch commits its table steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitMode {
    /// Each table commits on its own; a failure leaves earlier tables loaded
    /// and the failing table truncated.
    #[default]
    PerTable,
    /// The whole layer is restored to its pre-batch state on failure.
    Atomic,
}

/// How gold dimensions assign surrogate keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Row number within the dimension ordering, recomputed on every read.
    #[default]
    Positional,
    /// Append-only business key registry; keys are never reassigned.
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadSettings {
    pub commit_mode: CommitMode,
    pub surrogate_keys: KeyStrategy,
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub schemas: SchemaNames,
    /// Source tables in load order. Tables left out keep their default entry.
    pub tables: Vec<TableEntry>,
    pub reload: ReloadSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schemas: SchemaNames::default(),
            tables: TableKind::ALL
                .into_iter()
                .map(TableEntry::with_default_source)
                .collect(),
            reload: ReloadSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a config file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`PipelineConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ModelError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.complete()
    }

    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or the config is invalid.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|source| ModelError::Toml {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.complete()
    }

    /// Append default entries for tables the config does not mention, then
    /// validate.
    fn complete(mut self) -> Result<Self> {
        let listed: BTreeSet<TableKind> = self.tables.iter().map(|entry| entry.kind).collect();
        for kind in TableKind::ALL {
            if !listed.contains(&kind) {
                self.tables.push(TableEntry::with_default_source(kind));
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that schema names are usable and every table appears once.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        for layer in [Layer::Bronze, Layer::Silver, Layer::Gold] {
            let name = self.schemas.for_layer(layer);
            if name.trim().is_empty() {
                return Err(ModelError::InvalidConfig {
                    message: format!("schema name for {layer} is empty"),
                });
            }
        }
        let mut names = BTreeSet::new();
        for layer in [Layer::Bronze, Layer::Silver, Layer::Gold] {
            if !names.insert(self.schemas.for_layer(layer).to_lowercase()) {
                return Err(ModelError::InvalidConfig {
                    message: format!(
                        "schema name {} is used by more than one layer",
                        self.schemas.for_layer(layer)
                    ),
                });
            }
        }
        let mut seen = BTreeSet::new();
        for entry in &self.tables {
            if !seen.insert(entry.kind) {
                return Err(ModelError::InvalidConfig {
                    message: format!("table {} is listed more than once", entry.kind),
                });
            }
        }
        if seen.len() != TableKind::ALL.len() {
            return Err(ModelError::InvalidConfig {
                message: "every source table must be listed".to_string(),
            });
        }
        Ok(())
    }
}

/// Validated, ordered view of the configured tables with qualified naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegistry {
    schemas: SchemaNames,
    tables: Vec<TableEntry>,
}

impl Default for TableRegistry {
    fn default() -> Self {
        let config = PipelineConfig::default();
        Self {
            schemas: config.schemas,
            tables: config.tables,
        }
    }
}

impl TableRegistry {
    /// Build the registry from a config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            schemas: config.schemas.clone(),
            tables: config.tables.clone(),
        })
    }

    /// Tables in load order.
    pub fn tables(&self) -> &[TableEntry] {
        &self.tables
    }

    /// Table kinds in load order.
    pub fn kinds(&self) -> impl Iterator<Item = TableKind> + '_ {
        self.tables.iter().map(|entry| entry.kind)
    }

    pub fn schema(&self, layer: Layer) -> &str {
        self.schemas.for_layer(layer)
    }

    /// `schema.table` name of a source table in the given layer.
    pub fn qualified_name(&self, layer: Layer, kind: TableKind) -> String {
        format!("{}.{}", self.schema(layer), kind.table_name())
    }

    /// `schema.view` name of a gold view.
    pub fn qualified_view(&self, view: GoldView) -> String {
        format!("{}.{}", self.schema(Layer::Gold), view.view_name())
    }

    pub fn entry(&self, kind: TableKind) -> Option<&TableEntry> {
        self.tables.iter().find(|entry| entry.kind == kind)
    }

    /// Resolve the extract path of a table against a source root.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownTable`] if the table is not registered.
    pub fn source_path(&self, root: &Path, kind: TableKind) -> Result<PathBuf> {
        let entry = self.entry(kind).ok_or_else(|| ModelError::UnknownTable {
            name: kind.table_name().to_string(),
        })?;
        if entry.source_file.is_absolute() {
            Ok(entry.source_file.clone())
        } else {
            Ok(root.join(&entry.source_file))
        }
    }
}
