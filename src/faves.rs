//! Favorite shortcuts: named aliases that expand to another prediction query.
//!
//! The table is one flat JSON object (name → whitespace-joined expansion),
//! loaded fresh at process start and written back wholesale after a mutating
//! command. [`FaveStore`] is the seam: production uses [`JsonFileStore`],
//! tests swap in an in-memory table.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

pub type FaveTable = BTreeMap<String, String>;

pub trait FaveStore {
    /// Returns the persisted table. A table that was never written is empty,
    /// not an error.
    fn load(&self) -> Result<FaveTable>;

    /// Overwrites the persisted table wholesale.
    fn save(&self, table: &FaveTable) -> Result<()>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence_err(&self, source: io::Error) -> Error {
        Error::Persistence {
            path: self.path.clone(),
            source,
        }
    }
}

impl FaveStore for JsonFileStore {
    fn load(&self) -> Result<FaveTable> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            // first run, nothing saved yet
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FaveTable::new()),
            Err(e) => return Err(self.persistence_err(e)),
        };

        let table: FaveTable = serde_json::from_str(&text)
            .map_err(|e| self.persistence_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        debug!(path = %self.path.display(), aliases = table.len(), "loaded faves");
        Ok(table)
    }

    fn save(&self, table: &FaveTable) -> Result<()> {
        let json = serde_json::to_string_pretty(table)
            .map_err(|e| self.persistence_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&self.path, json).map_err(|e| self.persistence_err(e))?;
        debug!(path = %self.path.display(), aliases = table.len(), "saved faves");
        Ok(())
    }
}

/// Stores `tokens` under `name`, lower-cased and whitespace-joined,
/// overwriting any prior value. Returns the stored expansion.
pub fn set_alias(store: &dyn FaveStore, name: &str, tokens: &[String]) -> Result<String> {
    let mut table = store.load()?;
    let expansion = tokens
        .iter()
        .map(|t| t.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    table.insert(name.to_string(), expansion.clone());
    store.save(&table)?;
    Ok(expansion)
}

/// Removes each of `names` if present. Absent names are reported per-name
/// rather than aborting the batch; the mutated table is written back once.
pub fn delete_aliases(store: &dyn FaveStore, names: &[String]) -> Result<Vec<(String, bool)>> {
    let mut table = store.load()?;
    let outcomes = names
        .iter()
        .map(|name| (name.clone(), table.remove(name).is_some()))
        .collect();
    store.save(&table)?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::env;

    struct MemStore(RefCell<FaveTable>);

    impl MemStore {
        fn new() -> Self {
            Self(RefCell::new(FaveTable::new()))
        }
    }

    impl FaveStore for MemStore {
        fn load(&self) -> Result<FaveTable> {
            Ok(self.0.borrow().clone())
        }

        fn save(&self, table: &FaveTable) -> Result<()> {
            *self.0.borrow_mut() = table.clone();
            Ok(())
        }
    }

    fn temp_store(name: &str) -> JsonFileStore {
        let path = format!("{}/{}", env::temp_dir().display(), name);
        let _ = fs::remove_file(&path); // clean up any prior run
        JsonFileStore::new(path)
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = temp_store("mbta_faves_test_missing.json");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_set_then_load_round_trips() {
        let store = temp_store("mbta_faves_test_roundtrip.json");

        set_alias(&store, "home", &strings(&["R", "Harv"])).unwrap();

        let table = store.load().unwrap();
        let tokens: Vec<&str> = table["home"].split_whitespace().collect();
        assert_eq!(tokens, vec!["r", "harv"]);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_delete_removes_alias() {
        let store = temp_store("mbta_faves_test_delete.json");

        set_alias(&store, "home", &strings(&["r", "harv"])).unwrap();
        delete_aliases(&store, &strings(&["home"])).unwrap();

        assert!(!store.load().unwrap().contains_key("home"));

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_delete_batch_is_best_effort_per_name() {
        let store = MemStore::new();
        set_alias(&store, "home", &strings(&["r", "harv"])).unwrap();

        let outcomes = delete_aliases(&store, &strings(&["work", "home"])).unwrap();

        assert_eq!(outcomes[0], ("work".to_string(), false));
        assert_eq!(outcomes[1], ("home".to_string(), true));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_set_overwrites_prior_value() {
        let store = MemStore::new();
        set_alias(&store, "home", &strings(&["r", "harv"])).unwrap();
        set_alias(&store, "home", &strings(&["o", "down"])).unwrap();

        assert_eq!(store.load().unwrap()["home"], "o down");
    }

    #[test]
    fn test_unwritable_destination_fails_loudly() {
        let store = JsonFileStore::new(format!(
            "{}/mbta_faves_test_no_such_dir/faves.json",
            env::temp_dir().display()
        ));

        assert!(matches!(
            store.save(&FaveTable::new()),
            Err(Error::Persistence { .. })
        ));
    }

    #[test]
    fn test_corrupt_file_fails_loudly() {
        let store = temp_store("mbta_faves_test_corrupt.json");
        fs::write(store.path(), "not json at all").unwrap();

        assert!(matches!(store.load(), Err(Error::Persistence { .. })));

        let _ = fs::remove_file(store.path());
    }
}
