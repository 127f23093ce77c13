//! Remote document collection abstractions.
//!
//! A collection maps string keys to JSON object documents. The inventory store
//! only needs four primitives from it: list everything, get one, overwrite one,
//! and delete one.

pub mod in_memory;
pub mod sqlite;

use std::sync::Arc;

use thiserror::Error;

use stockroom_core::Document;

pub use in_memory::InMemoryCollection;
pub use sqlite::SqliteCollection;

/// Collection operation error.
///
/// These are **infrastructure errors** (connectivity, storage, encoding) as
/// opposed to domain errors.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The backing store could not be reached or refused the operation.
    #[error("collection unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be encoded or decoded.
    #[error("serialization failed for '{key}': {message}")]
    Serialization { key: String, message: String },
}

/// Key/document store, one namespace per collection name.
///
/// Semantics every backend must follow:
/// - `put` replaces the whole document with the supplied fields
/// - `delete` succeeds whether or not the key existed
/// - `list_all` returns every document in the collection, no paging
#[async_trait::async_trait]
pub trait DocumentCollection: Send + Sync {
    async fn list_all(&self, collection: &str) -> Result<Vec<(String, Document)>, CollectionError>;

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, CollectionError>;

    async fn put(&self, collection: &str, key: &str, doc: Document) -> Result<(), CollectionError>;

    async fn delete(&self, collection: &str, key: &str) -> Result<(), CollectionError>;
}

#[async_trait::async_trait]
impl<C> DocumentCollection for Arc<C>
where
    C: DocumentCollection + ?Sized,
{
    async fn list_all(&self, collection: &str) -> Result<Vec<(String, Document)>, CollectionError> {
        (**self).list_all(collection).await
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, CollectionError> {
        (**self).get(collection, key).await
    }

    async fn put(&self, collection: &str, key: &str, doc: Document) -> Result<(), CollectionError> {
        (**self).put(collection, key, doc).await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), CollectionError> {
        (**self).delete(collection, key).await
    }
}
