//! Inventory store: the gateway between callers and the item collection.
//!
//! Every mutation follows the same pipeline:
//!
//! ```text
//! Mutation
//!   ↓
//! 1. Validate caller input (name, quantity, price)
//!   ↓
//! 2. Read the current record when the rule needs it (add, decrement)
//!   ↓
//! 3. Plan the write with the pure inventory rules
//!   ↓
//! 4. Apply it to the collection (put / delete)
//!   ↓
//! 5. Re-list the whole collection into the snapshot
//! ```
//!
//! ## Concurrency
//!
//! Nothing here is sequenced or locked. Two mutations on the same name may
//! interleave their read and write steps, so read-modify-write on `quantity`
//! can lose updates; the last write the collection sees wins. Refreshes are
//! not ordered either: a refresh started earlier but finishing later replaces
//! a newer snapshot. The snapshot lock only guards the in-memory copy and is
//! never held across an await.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;

use stockroom_core::{DomainError, Item, ItemAttributes, ItemName};
use stockroom_inventory::{DecrementPlan, ViewFilter, accumulate, plan_decrement};

use crate::collection::{CollectionError, DocumentCollection};

/// Collection name used when none is configured.
pub const DEFAULT_COLLECTION: &str = "inventory";

/// Inventory store operation error.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Caller input was rejected before anything was written.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The collection could not be read or written.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored record could not be decoded into an item.
    #[error("malformed record '{name}': {message}")]
    MalformedRecord { name: String, message: String },
}

impl From<DomainError> for InventoryError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput(msg) => InventoryError::InvalidInput(msg),
            DomainError::MalformedRecord { name, message } => {
                InventoryError::MalformedRecord { name, message }
            }
        }
    }
}

impl From<CollectionError> for InventoryError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::Unavailable(msg) => InventoryError::StoreUnavailable(msg),
            CollectionError::Serialization { key, message } => {
                InventoryError::MalformedRecord { name: key, message }
            }
        }
    }
}

/// What a decrement writes when the record survives.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum DecrementWrite {
    /// Write the full record with the reduced quantity.
    #[default]
    PreserveAttributes,
    /// Write only the reduced quantity; the other fields are dropped from the
    /// record and read back as empty text and a zero price.
    QuantityOnly,
}

/// Cached copy of the collection as of the last successful refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    items: Vec<Item>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// `None` until the first successful refresh.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn is_current(&self) -> bool {
        self.refreshed_at.is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name.as_str() == name)
    }
}

/// Reads and writes item records and keeps a snapshot of the collection.
pub struct InventoryStore<C> {
    collection: C,
    collection_name: String,
    decrement_write: DecrementWrite,
    snapshot: RwLock<Snapshot>,
}

impl<C> InventoryStore<C>
where
    C: DocumentCollection,
{
    pub fn new(collection: C, collection_name: impl Into<String>) -> Self {
        Self {
            collection,
            collection_name: collection_name.into(),
            decrement_write: DecrementWrite::default(),
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    pub fn with_decrement_write(mut self, decrement_write: DecrementWrite) -> Self {
        self.decrement_write = decrement_write;
        self
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn decrement_write(&self) -> DecrementWrite {
        self.decrement_write
    }

    /// Current snapshot (possibly empty and not yet refreshed).
    pub fn snapshot(&self) -> Snapshot {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply a view filter to the current snapshot.
    pub fn view(&self, filter: &ViewFilter) -> Vec<Item> {
        filter.apply(self.snapshot().items())
    }

    fn replace_snapshot(&self, next: Snapshot) {
        match self.snapshot.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Replace the snapshot with every record in the collection.
    ///
    /// Records that cannot be decoded are left out and logged; only a failed
    /// listing fails the refresh. On failure the previous snapshot is kept
    /// as-is.
    #[tracing::instrument(skip(self), fields(collection = %self.collection_name))]
    pub async fn refresh(&self) -> Result<Snapshot, InventoryError> {
        let records = match self.collection.list_all(&self.collection_name).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "refresh failed; keeping stale snapshot");
                return Err(err.into());
            }
        };

        let mut items = Vec::with_capacity(records.len());
        for (key, doc) in records {
            match Item::from_record(key, doc) {
                Ok(item) => items.push(item),
                Err(err) => tracing::warn!(error = %err, "skipping undecodable record"),
            }
        }

        let next = Snapshot {
            items,
            refreshed_at: Some(Utc::now()),
        };
        self.replace_snapshot(next.clone());

        tracing::debug!(count = next.items.len(), "snapshot refreshed");
        Ok(next)
    }

    /// Add `attributes.quantity` units of `name`.
    ///
    /// An existing record keeps nothing but its quantity, which is summed;
    /// the other fields are replaced by the supplied ones.
    #[tracing::instrument(skip(self, attributes), fields(collection = %self.collection_name))]
    pub async fn add_or_accumulate(
        &self,
        name: &str,
        attributes: ItemAttributes,
    ) -> Result<Snapshot, InventoryError> {
        let name = ItemName::parse(name)?;
        attributes.validate()?;

        let existing = self.collection.get(&self.collection_name, name.as_str()).await?;
        let existing_quantity = existing
            .as_ref()
            .map(|doc| ItemAttributes::quantity_of(name.as_str(), doc))
            .transpose()?;

        let added = attributes.quantity;
        let merged = accumulate(existing_quantity, attributes)?;
        self.collection
            .put(&self.collection_name, name.as_str(), merged.to_document())
            .await?;

        tracing::info!(added, quantity = merged.quantity, "item added");
        self.refresh().await
    }

    /// Add a single unit, resupplying the item's other fields.
    pub async fn increment(
        &self,
        name: &str,
        attributes: ItemAttributes,
    ) -> Result<Snapshot, InventoryError> {
        self.add_or_accumulate(
            name,
            ItemAttributes {
                quantity: 1,
                ..attributes
            },
        )
        .await
    }

    /// Remove one unit; the record is deleted when its last unit goes.
    ///
    /// An absent record is not an error: nothing is written, the snapshot is
    /// still refreshed.
    #[tracing::instrument(skip(self), fields(collection = %self.collection_name))]
    pub async fn decrement_or_remove(&self, name: &str) -> Result<Snapshot, InventoryError> {
        let name = ItemName::parse(name)?;
        let key = name.as_str();

        let existing = self.collection.get(&self.collection_name, key).await?;
        let existing_quantity = existing
            .as_ref()
            .map(|doc| ItemAttributes::quantity_of(key, doc))
            .transpose()?;

        match plan_decrement(existing_quantity) {
            DecrementPlan::Skip => {
                tracing::debug!("decrement of absent item; nothing to do");
            }
            DecrementPlan::Remove => {
                self.collection.delete(&self.collection_name, key).await?;
                tracing::info!("last unit removed; item deleted");
            }
            DecrementPlan::SetQuantity(quantity) => {
                let doc = match (self.decrement_write, existing) {
                    (DecrementWrite::PreserveAttributes, Some(doc)) => {
                        let mut attrs = ItemAttributes::from_document(key, doc)?;
                        attrs.quantity = quantity;
                        attrs.to_document()
                    }
                    _ => ItemAttributes::quantity_only_document(quantity),
                };
                self.collection.put(&self.collection_name, key, doc).await?;
                tracing::info!(quantity, "item decremented");
            }
        }

        self.refresh().await
    }

    /// Delete the record regardless of its quantity. Deleting an absent
    /// record succeeds.
    #[tracing::instrument(skip(self), fields(collection = %self.collection_name))]
    pub async fn delete_item(&self, name: &str) -> Result<Snapshot, InventoryError> {
        let name = ItemName::parse(name)?;
        self.collection
            .delete(&self.collection_name, name.as_str())
            .await?;

        tracing::info!("item deleted");
        self.refresh().await
    }

    /// Overwrite every field but the name. Creates the record if absent.
    #[tracing::instrument(skip(self, attributes), fields(collection = %self.collection_name))]
    pub async fn edit_item(
        &self,
        name: &str,
        attributes: ItemAttributes,
    ) -> Result<Snapshot, InventoryError> {
        let name = ItemName::parse(name)?;
        attributes.validate()?;

        self.collection
            .put(&self.collection_name, name.as_str(), attributes.to_document())
            .await?;

        tracing::info!(quantity = attributes.quantity, "item edited");
        self.refresh().await
    }
}
