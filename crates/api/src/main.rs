use std::sync::Arc;

use anyhow::Context;

use stockroom_api::app::{build_app, services::AppServices};
use stockroom_infra::StoreConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = StoreConfig::from_env().context("invalid store configuration")?;
    let bind = std::env::var("STOCKROOM_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let services = Arc::new(AppServices::from_config(&config).await?);

    // Initial load; the server still starts if the store is down.
    match services.store().refresh().await {
        Ok(snapshot) => tracing::info!(items = snapshot.items().len(), "initial snapshot loaded"),
        Err(err) => tracing::warn!(error = %err, "initial refresh failed"),
    }

    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
