use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use stockroom_core::Document;

use super::{CollectionError, DocumentCollection};

/// In-memory document collection.
///
/// Intended for tests/dev. Documents are listed in key order. The store can be
/// switched offline to simulate an unreachable backend.
#[derive(Debug, Default)]
pub struct InMemoryCollection {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
    offline: AtomicBool,
}

impl InMemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle availability; while unavailable every operation fails.
    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), CollectionError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CollectionError::Unavailable(
                "in-memory collection is offline".to_string(),
            ));
        }
        Ok(())
    }
}

fn poisoned() -> CollectionError {
    CollectionError::Unavailable("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl DocumentCollection for InMemoryCollection {
    async fn list_all(&self, collection: &str) -> Result<Vec<(String, Document)>, CollectionError> {
        self.ensure_available()?;
        let map = self.collections.read().map_err(|_| poisoned())?;

        Ok(map
            .get(collection)
            .map(|docs| docs.iter().map(|(k, d)| (k.clone(), d.clone())).collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, CollectionError> {
        self.ensure_available()?;
        let map = self.collections.read().map_err(|_| poisoned())?;
        Ok(map.get(collection).and_then(|docs| docs.get(key)).cloned())
    }

    async fn put(&self, collection: &str, key: &str, doc: Document) -> Result<(), CollectionError> {
        self.ensure_available()?;
        let mut map = self.collections.write().map_err(|_| poisoned())?;
        map.entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), doc);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), CollectionError> {
        self.ensure_available()?;
        let mut map = self.collections.write().map_err(|_| poisoned())?;
        if let Some(docs) = map.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }
}
