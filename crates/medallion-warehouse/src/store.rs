//! In-memory layered table store.
//!
//! Holds one frame per (layer, table). The caller owns the store and mutates
//! it through `&mut`, so a reader never observes a half-loaded table.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use medallion_ingest::empty_frame;
use medallion_model::{Layer, TableKind, TableRegistry};

use crate::error::{Result, WarehouseError};

/// Frames of one layer captured before a batch, for atomic restores.
#[derive(Debug, Clone)]
pub struct LayerSnapshot {
    layer: Layer,
    tables: BTreeMap<TableKind, DataFrame>,
}

#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    registry: TableRegistry,
    tables: BTreeMap<(Layer, TableKind), DataFrame>,
}

impl Warehouse {
    pub fn new(registry: TableRegistry) -> Self {
        Self {
            registry,
            tables: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// Replace the table with an empty frame of its declared columns.
    ///
    /// # Errors
    ///
    /// Returns a Polars error if the empty frame cannot be built.
    pub fn truncate(&mut self, layer: Layer, kind: TableKind) -> Result<()> {
        let empty = empty_frame(kind.columns(layer))?;
        self.tables.insert((layer, kind), empty);
        Ok(())
    }

    /// Append rows to a table. The frame must carry exactly the declared
    /// columns, in order.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::Schema`] when the columns differ, or a
    /// Polars error when the column types do not line up.
    pub fn insert(&mut self, layer: Layer, kind: TableKind, frame: DataFrame) -> Result<usize> {
        let expected: Vec<&str> = kind.columns(layer).iter().map(|c| c.name).collect();
        let actual: Vec<&str> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        if expected != actual {
            return Err(WarehouseError::Schema {
                table: self.registry.qualified_name(layer, kind),
                message: format!("expected {expected:?}, got {actual:?}"),
            });
        }

        let rows = frame.height();
        match self.tables.get_mut(&(layer, kind)) {
            Some(current) if current.height() > 0 => {
                current.vstack_mut(&frame)?;
            }
            _ => {
                self.tables.insert((layer, kind), frame);
            }
        }
        Ok(rows)
    }

    pub fn table(&self, layer: Layer, kind: TableKind) -> Option<&DataFrame> {
        self.tables.get(&(layer, kind))
    }

    /// A loaded table.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::MissingTable`] if it was never loaded.
    pub fn require(&self, layer: Layer, kind: TableKind) -> Result<&DataFrame> {
        self.table(layer, kind)
            .ok_or(WarehouseError::MissingTable { layer, table: kind })
    }

    /// Row count of a table, zero when it was never loaded.
    pub fn row_count(&self, layer: Layer, kind: TableKind) -> usize {
        self.table(layer, kind).map_or(0, DataFrame::height)
    }

    pub fn snapshot(&self, layer: Layer) -> LayerSnapshot {
        LayerSnapshot {
            layer,
            tables: self
                .tables
                .iter()
                .filter(|((table_layer, _), _)| *table_layer == layer)
                .map(|((_, kind), frame)| (*kind, frame.clone()))
                .collect(),
        }
    }

    /// Put a layer back exactly as it was when the snapshot was taken,
    /// including tables that did not exist yet.
    pub fn restore(&mut self, snapshot: LayerSnapshot) {
        let layer = snapshot.layer;
        self.tables.retain(|(table_layer, _), _| *table_layer != layer);
        self.tables.extend(
            snapshot
                .tables
                .into_iter()
                .map(|(kind, frame)| ((layer, kind), frame)),
        );
    }
}
