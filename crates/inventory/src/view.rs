//! Presentation-side state, kept out of the store.
//!
//! The store never holds search text or form values; a front end owns a
//! [`ViewModel`] and an [`ItemDraft`] and passes their contents into store
//! operations explicitly.

use serde::{Deserialize, Serialize};

use stockroom_core::{Category, DomainError, DomainResult, Item, ItemAttributes};

use crate::filter::ViewFilter;

/// List state: what the user is searching for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub filter: ViewFilter,
}

impl ViewModel {
    pub fn new(filter: ViewFilter) -> Self {
        Self { filter }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
    }

    /// Rows to display for the given snapshot.
    pub fn rows(&self, snapshot: &[Item]) -> Vec<Item> {
        self.filter.apply(snapshot)
    }
}

/// Values of the add/edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: u32,
    pub category: Category,
    pub description: String,
    pub price: f64,
    pub supplier: String,
}

impl Default for ItemDraft {
    /// A blank add form: one unit, zero price.
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 1,
            category: Category::None,
            description: String::new(),
            price: 0.0,
            supplier: String::new(),
        }
    }
}

impl ItemDraft {
    /// Prefill the edit form from an existing item.
    pub fn from_item(item: &Item) -> Self {
        let attrs = &item.attributes;
        Self {
            name: item.name.to_string(),
            quantity: attrs.quantity,
            category: attrs.category.clone(),
            description: attrs.description.clone(),
            price: attrs.price,
            supplier: attrs.supplier.clone(),
        }
    }

    /// Clear back to the blank add form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn attributes(&self) -> ItemAttributes {
        ItemAttributes {
            quantity: self.quantity,
            category: self.category.clone(),
            description: self.description.clone(),
            price: self.price,
            supplier: self.supplier.clone(),
        }
    }

    /// Parse the quantity text field.
    pub fn parse_quantity(raw: &str) -> DomainResult<u32> {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| DomainError::invalid_input(format!("not a valid quantity: {raw:?}")))
    }

    /// Parse the price text field.
    pub fn parse_price(raw: &str) -> DomainResult<f64> {
        let price = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::invalid_input(format!("not a valid price: {raw:?}")))?;
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::invalid_input("price must be a non-negative number"));
        }
        Ok(price)
    }
}
