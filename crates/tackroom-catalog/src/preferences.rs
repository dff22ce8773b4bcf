//! Remembered facet selections, one per category path.
//!
//! Keys follow the storefront's `collection-filters-{path}` naming. Values
//! are [`FilterSelection`] JSON, whose price bounds are decimal strings.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tackroom_core::FilterSelection;

use crate::error::CatalogError;

pub const PREFERENCE_KEY_PREFIX: &str = "collection-filters-";

/// Storage key for `category_path`.
#[must_use]
pub fn preference_key(category_path: &str) -> String {
    format!("{PREFERENCE_KEY_PREFIX}{category_path}")
}

/// Per-category persistence for [`FilterSelection`]s.
///
/// Reads never fail: a missing or unreadable entry is simply `None`.
pub trait PreferenceStore {
    fn get(&self, category_path: &str) -> Option<FilterSelection>;

    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backing storage cannot be written.
    fn save(&mut self, category_path: &str, selection: &FilterSelection)
        -> Result<(), CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backing storage cannot be written.
    fn clear(&mut self, category_path: &str) -> Result<(), CatalogError>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: HashMap<String, FilterSelection>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, category_path: &str) -> Option<FilterSelection> {
        self.entries.get(&preference_key(category_path)).cloned()
    }

    fn save(
        &mut self,
        category_path: &str,
        selection: &FilterSelection,
    ) -> Result<(), CatalogError> {
        self.entries
            .insert(preference_key(category_path), selection.clone());
        Ok(())
    }

    fn clear(&mut self, category_path: &str) -> Result<(), CatalogError> {
        self.entries.remove(&preference_key(category_path));
        Ok(())
    }
}

/// All selections in one JSON object file, keyed by [`preference_key`].
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path an unreadable preferences file is moved to before it is replaced.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Stored entries, plus whether an existing file could not be used.
    fn read_all(&self) -> (BTreeMap<String, FilterSelection>, bool) {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (BTreeMap::new(), false),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read filter preferences");
                return (BTreeMap::new(), true);
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => (entries, false),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "filter preferences file is not valid JSON; ignoring");
                (BTreeMap::new(), true)
            }
        }
    }

    /// Moves an unusable file aside so a write does not destroy it.
    fn back_up_unreadable(&self) -> Result<(), CatalogError> {
        let backup = self.backup_path();
        std::fs::rename(&self.path, &backup).map_err(|e| CatalogError::Write {
            path: backup.display().to_string(),
            source: e,
        })?;
        tracing::warn!(
            path = %self.path.display(),
            backup = %backup.display(),
            "replacing unreadable filter preferences file; previous contents moved to backup"
        );
        Ok(())
    }

    fn write_all(&self, entries: &BTreeMap<String, FilterSelection>) -> Result<(), CatalogError> {
        let context = self.path.display().to_string();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| CatalogError::Json {
            context: context.clone(),
            source: e,
        })?;

        std::fs::write(&self.path, json).map_err(|e| CatalogError::Write {
            path: context,
            source: e,
        })
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, category_path: &str) -> Option<FilterSelection> {
        self.read_all().0.remove(&preference_key(category_path))
    }

    fn save(
        &mut self,
        category_path: &str,
        selection: &FilterSelection,
    ) -> Result<(), CatalogError> {
        let (mut entries, unreadable) = self.read_all();
        if unreadable {
            self.back_up_unreadable()?;
        }
        entries.insert(preference_key(category_path), selection.clone());
        self.write_all(&entries)?;
        tracing::debug!(path = %self.path.display(), category_path, "saved filter preferences");
        Ok(())
    }

    fn clear(&mut self, category_path: &str) -> Result<(), CatalogError> {
        let (mut entries, _) = self.read_all();
        if entries.remove(&preference_key(category_path)).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tackroom_core::PriceRange;

    use super::*;

    fn make_selection() -> FilterSelection {
        FilterSelection {
            sizes: vec!["Full".to_string()],
            price_range: Some(PriceRange::new(Decimal::ZERO, Decimal::from(250))),
            in_stock_only: true,
            ..FilterSelection::default()
        }
    }

    fn temp_store(name: &str) -> JsonFilePreferenceStore {
        let dir = std::env::temp_dir().join(format!(
            "tackroom-preferences-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        JsonFilePreferenceStore::new(dir.join("prefs.json"))
    }

    #[test]
    fn key_uses_storefront_prefix() {
        assert_eq!(preference_key("horse/boots"), "collection-filters-horse/boots");
    }

    #[test]
    fn memory_store_round_trip_and_clear() {
        let mut store = MemoryPreferenceStore::new();
        assert!(store.get("horse").is_none());
        store.save("horse", &make_selection()).unwrap();
        assert_eq!(store.get("horse"), Some(make_selection()));
        assert!(store.get("horse/boots").is_none());
        store.clear("horse").unwrap();
        assert!(store.get("horse").is_none());
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let store = temp_store("missing");
        assert!(store.get("horse").is_none());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let mut store = temp_store("persist");
        store.save("horse/boots", &make_selection()).unwrap();
        store.save("dog", &FilterSelection::default()).unwrap();

        let reopened = JsonFilePreferenceStore::new(store.path().to_path_buf());
        assert_eq!(reopened.get("horse/boots"), Some(make_selection()));

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["collection-filters-horse/boots"]["inStockOnly"], true);
        assert_eq!(json["collection-filters-horse/boots"]["sizes"][0], "Full");

        store.clear("horse/boots").unwrap();
        assert!(reopened.get("horse/boots").is_none());
        assert!(reopened.get("dog").is_some());
    }

    #[test]
    fn file_store_ignores_corrupt_file() {
        let mut store = temp_store("corrupt");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.get("horse").is_none());

        store.save("horse", &make_selection()).unwrap();
        assert_eq!(store.get("horse"), Some(make_selection()));
    }

    #[test]
    fn file_store_keeps_corrupt_file_as_backup_on_save() {
        let mut store = temp_store("backup");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{\"collection-filters-dog\": {\"sizes\": [").unwrap();

        store.save("horse", &make_selection()).unwrap();

        let backup = std::fs::read_to_string(store.backup_path()).unwrap();
        assert!(backup.starts_with("{\"collection-filters-dog\""));
        assert_eq!(store.get("horse"), Some(make_selection()));
    }
}
