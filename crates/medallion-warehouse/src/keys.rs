//! Surrogate key assignment for gold dimensions.
//!
//! Positional keys are the row number within the dimension ordering and are
//! recomputed on every read. Stable keys come from an append-only registry:
//! once a business key has a surrogate it keeps it across reloads.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use medallion_model::{GoldView, KeyStrategy};

use crate::error::{Result, WarehouseError};

/// Business key → surrogate key, per dimension. Entries are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRegistry {
    #[serde(default)]
    dimensions: BTreeMap<GoldView, BTreeMap<String, i64>>,
}

impl KeyRegistry {
    /// Read a registry file; a missing file is an empty registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| WarehouseError::KeyRegistryIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| WarehouseError::KeyRegistryFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the registry as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text =
            serde_json::to_string_pretty(self).map_err(|source| WarehouseError::KeyRegistryFormat {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, text).map_err(|source| WarehouseError::KeyRegistryIo {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, view: GoldView, business_key: &str) -> Option<i64> {
        self.dimensions.get(&view)?.get(business_key).copied()
    }

    pub fn len(&self, view: GoldView) -> usize {
        self.dimensions.get(&view).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.values().all(BTreeMap::is_empty)
    }

    /// Surrogates for `business_keys`, in order. Unknown keys get the next
    /// numbers after the current maximum, in the order they appear.
    ///
    /// A missing business key, or one already seen earlier in the batch, gets
    /// no surrogate: a registry entry must identify exactly one row.
    pub fn assign(
        &mut self,
        view: GoldView,
        business_keys: &[Option<String>],
    ) -> Vec<Option<i64>> {
        let keys = self.dimensions.entry(view).or_default();
        let mut next = keys.values().copied().max().unwrap_or(0) + 1;
        let mut added = 0usize;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut unkeyed = 0usize;
        let assigned: Vec<Option<i64>> = business_keys
            .iter()
            .map(|business_key| {
                let Some(business_key) = business_key.as_deref() else {
                    unkeyed += 1;
                    return None;
                };
                if !seen.insert(business_key) {
                    unkeyed += 1;
                    return None;
                }
                Some(*keys.entry(business_key.to_string()).or_insert_with(|| {
                    let key = next;
                    next += 1;
                    added += 1;
                    key
                }))
            })
            .collect();
        if unkeyed > 0 {
            warn!(
                view = %view,
                rows = unkeyed,
                "rows without a unique business key get no stable key"
            );
        }
        debug!(view = %view, added, total = keys.len(), "assigned stable keys");
        assigned
    }
}

/// Surrogate key source used by the gold projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurrogateKeys {
    Positional,
    Stable(KeyRegistry),
}

impl SurrogateKeys {
    pub fn for_strategy(strategy: KeyStrategy, registry: KeyRegistry) -> Self {
        match strategy {
            KeyStrategy::Positional => Self::Positional,
            KeyStrategy::Stable => Self::Stable(registry),
        }
    }

    /// Keys for rows already in dimension order.
    pub fn assign(
        &mut self,
        view: GoldView,
        business_keys: &[Option<String>],
    ) -> Vec<Option<i64>> {
        match self {
            Self::Positional => (1..).take(business_keys.len()).map(Some).collect(),
            Self::Stable(registry) => registry.assign(view, business_keys),
        }
    }

    pub fn registry(&self) -> Option<&KeyRegistry> {
        match self {
            Self::Positional => None,
            Self::Stable(registry) => Some(registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some((*v).to_string())).collect()
    }

    #[test]
    fn positional_keys_follow_row_order() {
        let mut keys_source = SurrogateKeys::Positional;
        assert_eq!(
            keys_source.assign(GoldView::DimCustomers, &keys(&["9", "3", "5"])),
            vec![Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn stable_keys_survive_new_rows() {
        let mut registry = KeyRegistry::default();
        assert_eq!(
            registry.assign(GoldView::DimCustomers, &keys(&["10", "20"])),
            vec![Some(1), Some(2)]
        );
        assert_eq!(
            registry.assign(GoldView::DimCustomers, &keys(&["5", "10", "20"])),
            vec![Some(3), Some(1), Some(2)]
        );
    }

    #[test]
    fn dimensions_have_independent_sequences() {
        let mut registry = KeyRegistry::default();
        registry.assign(GoldView::DimCustomers, &keys(&["a", "b"]));
        assert_eq!(
            registry.assign(GoldView::DimProducts, &keys(&["a"])),
            vec![Some(1)]
        );
        assert_eq!(registry.len(GoldView::DimCustomers), 2);
    }

    #[test]
    fn missing_business_key_gets_no_stable_key() {
        let mut registry = KeyRegistry::default();
        let business_keys = vec![Some("10".to_string()), None, Some("20".to_string())];
        assert_eq!(
            registry.assign(GoldView::DimProducts, &business_keys),
            vec![Some(1), None, Some(2)]
        );
        assert_eq!(registry.get(GoldView::DimProducts, ""), None);
        assert_eq!(registry.len(GoldView::DimProducts), 2);
    }

    #[test]
    fn repeated_business_key_is_keyed_once() {
        let mut registry = KeyRegistry::default();
        assert_eq!(
            registry.assign(GoldView::DimCustomers, &keys(&["7", "8", "7"])),
            vec![Some(1), Some(2), None]
        );
        assert_eq!(
            registry.assign(GoldView::DimCustomers, &keys(&["7"])),
            vec![Some(1)]
        );
    }

    #[test]
    fn registry_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        let mut registry = KeyRegistry::default();
        registry.assign(GoldView::DimProducts, &keys(&["210", "211"]));
        registry.save(&path).unwrap();

        let loaded = KeyRegistry::load(&path).unwrap();
        assert_eq!(loaded.get(GoldView::DimProducts, "211"), Some(2));
    }

    #[test]
    fn missing_registry_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = KeyRegistry::load(&dir.path().join("absent.json")).unwrap();
        assert!(registry.is_empty());
    }
}
