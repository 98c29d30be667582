use crate::collection::Collection;
use crate::types::CollectionName;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of named collections. The store is the only shared mutable
/// resource in the system and is internally synchronized.
pub struct Store {
    collections: RwLock<HashMap<CollectionName, Arc<Collection>>>,
}

impl Store {
    pub fn new() -> Self {
        Store { collections: RwLock::new(HashMap::new()) }
    }

    /// Creates a collection if it doesn't exist, returning a handle either way.
    pub fn create_collection(&self, name: &str) -> Arc<Collection> {
        let mut cols = self.collections.write();
        cols.entry(name.to_string())
            .or_insert_with(|| Arc::new(Collection::new(name.to_string())))
            .clone()
    }

    pub fn collection(&self, name: &str) -> Option<Arc<Collection>> {
        self.collections.read().get(name).cloned()
    }

    pub fn list_collection_names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
