use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items).post(add_item))
        .route("/items/:name", put(edit_item).delete(delete_item))
        .route("/items/:name/increment", post(increment_item))
        .route("/items/:name/decrement", post(decrement_item))
}

/// Refresh, then return the filtered view.
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListItemsQuery>,
) -> axum::response::Response {
    let snapshot = match services.store().refresh().await {
        Ok(s) => s,
        Err(e) => return errors::inventory_error_to_response(e),
    };

    let rows = query.into_filter().apply(snapshot.items());
    (StatusCode::OK, Json(dto::items_to_json(&rows, &snapshot))).into_response()
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    let (name, attrs) = match body.into_parts() {
        Ok(parts) => parts,
        Err(resp) => return resp,
    };

    match services.store().add_or_accumulate(&name, attrs).await {
        Ok(snapshot) => (StatusCode::OK, Json(dto::snapshot_to_json(&snapshot))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn increment_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Json(body): Json<dto::IncrementItemRequest>,
) -> axum::response::Response {
    let attrs = body.into_attributes();

    match services.store().increment(&name, attrs).await {
        Ok(snapshot) => (StatusCode::OK, Json(dto::snapshot_to_json(&snapshot))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn decrement_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.store().decrement_or_remove(&name).await {
        Ok(snapshot) => (StatusCode::OK, Json(dto::snapshot_to_json(&snapshot))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn edit_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Json(body): Json<dto::EditItemRequest>,
) -> axum::response::Response {
    let attrs = match body.into_attributes() {
        Ok(a) => a,
        Err(resp) => return resp,
    };

    match services.store().edit_item(&name, attrs).await {
        Ok(snapshot) => (StatusCode::OK, Json(dto::snapshot_to_json(&snapshot))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.store().delete_item(&name).await {
        Ok(snapshot) => (StatusCode::OK, Json(dto::snapshot_to_json(&snapshot))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
