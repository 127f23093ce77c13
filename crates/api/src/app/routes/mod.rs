use axum::Router;

pub mod inventory;
pub mod system;

/// Router for all application endpoints.
pub fn router() -> Router {
    Router::new().nest("/inventory", inventory::router())
}
