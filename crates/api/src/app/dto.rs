use serde::Deserialize;
use serde_json::json;

use stockroom_core::{Category, ItemAttributes};
use stockroom_infra::Snapshot;
use stockroom_inventory::ViewFilter;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub supplier: String,
}

#[derive(Debug, Deserialize)]
pub struct EditItemRequest {
    pub quantity: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub supplier: String,
}

/// The "+" button resupplies every field but the quantity.
///
/// No defaults: the increment overwrites all four fields, so a missing one
/// would blank the stored value.
#[derive(Debug, Deserialize)]
pub struct IncrementItemRequest {
    pub category: String,
    pub description: String,
    pub price: f64,
    pub supplier: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ListItemsQuery {
    pub fn into_filter(self) -> ViewFilter {
        ViewFilter::new(
            self.search.unwrap_or_default(),
            self.category.map(Category::from),
        )
    }
}

// -------------------------
// Mapping helpers
// -------------------------

pub fn attributes(
    quantity: i64,
    category: String,
    description: String,
    price: f64,
    supplier: String,
) -> Result<ItemAttributes, axum::response::Response> {
    let quantity = u32::try_from(quantity).map_err(|_| {
        errors::json_error(
            axum::http::StatusCode::BAD_REQUEST,
            "invalid_input",
            "quantity must be a non-negative integer",
        )
    })?;

    Ok(ItemAttributes {
        quantity,
        category: Category::from(category),
        description,
        price,
        supplier,
    })
}

impl AddItemRequest {
    pub fn into_parts(self) -> Result<(String, ItemAttributes), axum::response::Response> {
        let attrs = attributes(
            self.quantity,
            self.category,
            self.description,
            self.price,
            self.supplier,
        )?;
        Ok((self.name, attrs))
    }
}

impl EditItemRequest {
    pub fn into_attributes(self) -> Result<ItemAttributes, axum::response::Response> {
        attributes(
            self.quantity,
            self.category,
            self.description,
            self.price,
            self.supplier,
        )
    }
}

impl IncrementItemRequest {
    pub fn into_attributes(self) -> ItemAttributes {
        ItemAttributes {
            quantity: 1,
            category: Category::from(self.category),
            description: self.description,
            price: self.price,
            supplier: self.supplier,
        }
    }
}

pub fn items_to_json(items: &[stockroom_core::Item], snapshot: &Snapshot) -> serde_json::Value {
    json!({
        "items": items,
        "count": items.len(),
        "refreshed_at": snapshot.refreshed_at().map(|t| t.to_rfc3339()),
    })
}

pub fn snapshot_to_json(snapshot: &Snapshot) -> serde_json::Value {
    items_to_json(snapshot.items(), snapshot)
}
