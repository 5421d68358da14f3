//! Symbol registry: the main series plus any comparison overlays.

use std::collections::HashMap;
use std::sync::Arc;

use async_lock::RwLock;

use super::SymbolEntry;
use crate::shared::SymbolName;

/// Registry shared between the controller (writer) and the feed (reader).
pub type SharedRegistry = Arc<RwLock<SymbolRegistry>>;

/// Name-keyed symbol store.
///
/// The main symbol is always present. Inserting under an existing name
/// replaces the entry.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    main: SymbolName,
    entries: HashMap<SymbolName, SymbolEntry>,
}

impl SymbolRegistry {
    pub fn new(main: SymbolEntry) -> Self {
        let name = main.name.clone();
        let mut entries = HashMap::new();
        entries.insert(name.clone(), main);
        Self {
            main: name,
            entries,
        }
    }

    /// Wrap the registry for sharing with a feed adapter.
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert or replace by name. Returns the replaced entry.
    pub fn put(&mut self, entry: SymbolEntry) -> Option<SymbolEntry> {
        self.entries.insert(entry.name.clone(), entry)
    }

    /// Remove a comparison entry. The main entry cannot be removed.
    pub fn remove(&mut self, name: &str) -> Option<SymbolEntry> {
        if name == self.main.as_str() {
            return None;
        }
        self.entries.remove(name)
    }

    pub fn main_name(&self) -> &SymbolName {
        &self.main
    }

    pub fn main(&self) -> &SymbolEntry {
        // `main` is inserted in `new` and `set_main`, and never removed.
        &self.entries[self.main.as_str()]
    }

    /// Replace the main series. Comparison entries are kept.
    ///
    /// When the name changes, the previous main entry stays available under its
    /// old name.
    pub fn set_main(&mut self, entry: SymbolEntry) {
        self.main = entry.name.clone();
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Names of all non-main entries, sorted.
    pub fn compare_names(&self) -> Vec<SymbolName> {
        let mut names: Vec<SymbolName> = self
            .entries
            .keys()
            .filter(|name| **name != self.main)
            .cloned()
            .collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
