use stockroom_infra::{DynInventoryStore, StoreConfig};

/// Shared state handed to every handler.
pub struct AppServices {
    store: DynInventoryStore,
}

impl AppServices {
    pub fn new(store: DynInventoryStore) -> Self {
        Self { store }
    }

    /// Open the configured backend.
    pub async fn from_config(config: &StoreConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.open().await?))
    }

    pub fn store(&self) -> &DynInventoryStore {
        &self.store
    }
}
