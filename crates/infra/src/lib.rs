//! Infrastructure layer: document collections, the inventory store, config.

pub mod collection;
pub mod config;
pub mod store;

mod integration_tests;

pub use collection::{CollectionError, DocumentCollection, InMemoryCollection, SqliteCollection};
pub use config::{Backend, ConfigError, DynInventoryStore, StoreConfig};
pub use store::{DEFAULT_COLLECTION, DecrementWrite, InventoryError, InventoryStore, Snapshot};
