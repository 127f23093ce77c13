//! Integration tests for the store pipeline.
//!
//! Tests: Mutation → DocumentCollection → refresh → Snapshot → ViewFilter
//!
//! Verifies:
//! - The documented item lifecycle end to end, on both backends
//! - Concurrent read-modify-write sequences are not serialized (lost update)

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Barrier;

    use stockroom_core::{Category, Document, ItemAttributes};
    use stockroom_inventory::ViewFilter;

    use crate::collection::{
        CollectionError, DocumentCollection, InMemoryCollection, SqliteCollection,
    };
    use crate::store::{DEFAULT_COLLECTION, InventoryStore};

    fn attrs(quantity: u32, category: Category, price: f64) -> ItemAttributes {
        ItemAttributes {
            quantity,
            category,
            description: String::new(),
            price,
            supplier: "Acme".to_string(),
        }
    }

    /// Collection whose `get` waits until every barrier party has read,
    /// forcing concurrent read-modify-write sequences to interleave.
    struct InterleavingCollection {
        inner: InMemoryCollection,
        barrier: Barrier,
    }

    #[async_trait::async_trait]
    impl DocumentCollection for InterleavingCollection {
        async fn list_all(
            &self,
            collection: &str,
        ) -> Result<Vec<(String, Document)>, CollectionError> {
            self.inner.list_all(collection).await
        }

        async fn get(
            &self,
            collection: &str,
            key: &str,
        ) -> Result<Option<Document>, CollectionError> {
            let doc = self.inner.get(collection, key).await;
            self.barrier.wait().await;
            doc
        }

        async fn put(&self, collection: &str, key: &str, doc: Document) -> Result<(), CollectionError> {
            self.inner.put(collection, key, doc).await
        }

        async fn delete(&self, collection: &str, key: &str) -> Result<(), CollectionError> {
            self.inner.delete(collection, key).await
        }
    }

    async fn exercise_lifecycle<C: DocumentCollection>(store: InventoryStore<C>) {
        store
            .add_or_accumulate("Bread", attrs(2, Category::Food, 3.50))
            .await
            .unwrap();
        store
            .add_or_accumulate("Bread", attrs(3, Category::Food, 4.00))
            .await
            .unwrap();
        store
            .add_or_accumulate("Laptop", attrs(1, Category::Electronics, 900.0))
            .await
            .unwrap();
        store
            .add_or_accumulate("Pallet", attrs(100, Category::None, 0.0))
            .await
            .unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.items().len(), 3);
        let bread = snap.get("Bread").unwrap();
        assert_eq!(bread.quantity(), 5);
        assert_eq!(bread.attributes.price, 4.00);

        let rows = store.view(&ViewFilter::new("bread", None));
        assert_eq!(rows.len(), 1);

        let snap = store.decrement_or_remove("Bread").await.unwrap();
        assert_eq!(snap.get("Bread").unwrap().quantity(), 4);

        let snap = store.decrement_or_remove("Laptop").await.unwrap();
        assert!(snap.get("Laptop").is_none());

        let snap = store.delete_item("Pallet").await.unwrap();
        assert!(snap.get("Pallet").is_none());

        let listed = store.collection().list_all(DEFAULT_COLLECTION).await.unwrap();
        let keys: Vec<_> = listed.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Bread"]);
    }

    #[tokio::test]
    async fn lifecycle_in_memory() {
        let store = InventoryStore::new(InMemoryCollection::new(), DEFAULT_COLLECTION);
        exercise_lifecycle(store).await;
    }

    #[tokio::test]
    async fn lifecycle_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let collection = SqliteCollection::open(&dir.path().join("inventory.db"))
            .await
            .unwrap();
        let store = InventoryStore::new(collection, DEFAULT_COLLECTION);
        exercise_lifecycle(store).await;
    }

    #[tokio::test]
    async fn separate_store_instances_share_the_collection() {
        let collection = Arc::new(InMemoryCollection::new());
        let writer = InventoryStore::new(collection.clone(), DEFAULT_COLLECTION);
        let reader = InventoryStore::new(collection, DEFAULT_COLLECTION);

        reader.refresh().await.unwrap();
        writer
            .add_or_accumulate("Scarf", attrs(2, Category::Clothing, 12.0))
            .await
            .unwrap();

        // The reader only sees the write after its own refresh.
        assert!(reader.snapshot().get("Scarf").is_none());
        let snap = reader.refresh().await.unwrap();
        assert_eq!(snap.get("Scarf").unwrap().quantity(), 2);
    }

    #[tokio::test]
    async fn concurrent_accumulates_lose_an_update() {
        let collection = InterleavingCollection {
            inner: InMemoryCollection::new(),
            barrier: Barrier::new(2),
        };
        collection
            .inner
            .put(
                DEFAULT_COLLECTION,
                "Bread",
                attrs(1, Category::Food, 1.0).to_document(),
            )
            .await
            .unwrap();
        let store = InventoryStore::new(collection, DEFAULT_COLLECTION);

        // Both calls read quantity 1 before either writes.
        let (a, b) = tokio::join!(
            store.increment("Bread", attrs(1, Category::Food, 1.0)),
            store.increment("Bread", attrs(1, Category::Food, 1.0)),
        );
        a.unwrap();
        b.unwrap();

        let snap = store.refresh().await.unwrap();
        assert_eq!(snap.get("Bread").unwrap().quantity(), 2);
    }
}
