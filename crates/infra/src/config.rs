//! Configuration loading and store wiring.
//!
//! Settings come from environment variables:
//!
//! | variable | values | default |
//! |---|---|---|
//! | `STOCKROOM_BACKEND` | `memory`, `sqlite` | `sqlite` |
//! | `STOCKROOM_DATABASE_URL` | SQLite URL | `sqlite://{data_dir}/stockroom/inventory.db` |
//! | `STOCKROOM_COLLECTION` | collection name | `inventory` |
//! | `STOCKROOM_DECREMENT_WRITE` | `preserve`, `quantity-only` | `preserve` |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use thiserror::Error;

use crate::collection::{DocumentCollection, InMemoryCollection, SqliteCollection};
use crate::store::{DEFAULT_COLLECTION, DecrementWrite, InventoryStore};

/// Store wired to whichever backend the configuration selected.
pub type DynInventoryStore = InventoryStore<Arc<dyn DocumentCollection>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: Backend,
    /// Only consulted for the SQLite backend; `None` means the default path.
    pub database_url: Option<String>,
    pub collection: String,
    pub decrement_write: DecrementWrite,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            database_url: None,
            collection: DEFAULT_COLLECTION.to_string(),
            decrement_write: DecrementWrite::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("STOCKROOM_BACKEND") {
            config.backend = match value.trim().to_ascii_lowercase().as_str() {
                "memory" => Backend::Memory,
                "sqlite" => Backend::Sqlite,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "STOCKROOM_BACKEND",
                        value,
                        expected: "memory | sqlite",
                    });
                }
            };
        }

        if let Some(value) = lookup("STOCKROOM_DATABASE_URL") {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty("STOCKROOM_DATABASE_URL"));
            }
            config.database_url = Some(value);
        }

        if let Some(value) = lookup("STOCKROOM_COLLECTION") {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty("STOCKROOM_COLLECTION"));
            }
            config.collection = value;
        }

        if let Some(value) = lookup("STOCKROOM_DECREMENT_WRITE") {
            config.decrement_write = match value.trim().to_ascii_lowercase().as_str() {
                "preserve" => DecrementWrite::PreserveAttributes,
                "quantity-only" => DecrementWrite::QuantityOnly,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "STOCKROOM_DECREMENT_WRITE",
                        value,
                        expected: "preserve | quantity-only",
                    });
                }
            };
        }

        Ok(config)
    }

    /// Open the configured backend and wrap it in an inventory store.
    pub async fn open(&self) -> anyhow::Result<DynInventoryStore> {
        let collection: Arc<dyn DocumentCollection> = match self.backend {
            Backend::Memory => Arc::new(InMemoryCollection::new()),
            Backend::Sqlite => {
                let url = match &self.database_url {
                    Some(url) => url.clone(),
                    None => format!("sqlite://{}", default_db_path()?.to_string_lossy()),
                };
                tracing::info!(%url, "opening SQLite collection");
                Arc::new(SqliteCollection::connect(&url).await?)
            }
        };

        Ok(InventoryStore::new(collection, self.collection.clone())
            .with_decrement_write(self.decrement_write))
    }
}

/// Resolve the default SQLite database path:
/// `{app_data_dir}/stockroom/inventory.db`.
fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut dir = base;
    dir.push("stockroom");

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory at {:?}", dir))?;

    dir.push("inventory.db");

    Ok(dir)
}
