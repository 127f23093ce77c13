//! Items, their names, and the document shape they are persisted as.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::Category;
use crate::error::{DomainError, DomainResult};

/// A stored record body: a JSON object of attribute fields.
pub type Document = serde_json::Map<String, Value>;

/// Name of an item; doubles as its collection key.
///
/// Case-sensitive and never empty. Whitespace is kept as-is and counts as
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::invalid_input("name cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything about an item except its name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributes {
    pub quantity: u32,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub supplier: String,
}

/// Decoding shape for stored documents: every field but `quantity` may be
/// missing or null (quantity-only writes leave them out).
#[derive(Deserialize)]
struct StoredAttributes {
    quantity: u32,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    supplier: Option<String>,
}

impl ItemAttributes {
    /// Check the values a caller may write: quantity of at least one and a
    /// finite, non-negative price.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 {
            return Err(DomainError::invalid_input("quantity must be at least 1"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::invalid_input(
                "price must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Encode as a full document (all five fields).
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("quantity".to_string(), Value::from(self.quantity));
        doc.insert(
            "category".to_string(),
            Value::from(self.category.as_str()),
        );
        doc.insert(
            "description".to_string(),
            Value::from(self.description.as_str()),
        );
        doc.insert("price".to_string(), Value::from(self.price));
        doc.insert(
            "supplier".to_string(),
            Value::from(self.supplier.as_str()),
        );
        doc
    }

    /// A document carrying only a quantity.
    pub fn quantity_only_document(quantity: u32) -> Document {
        let mut doc = Document::new();
        doc.insert("quantity".to_string(), Value::from(quantity));
        doc
    }

    /// Decode a stored document. Missing text fields read as empty and a
    /// missing price as zero; a missing or invalid quantity is an error.
    pub fn from_document(name: &str, doc: Document) -> DomainResult<Self> {
        let stored: StoredAttributes = serde_json::from_value(Value::Object(doc))
            .map_err(|e| DomainError::malformed(name, e.to_string()))?;

        Ok(Self {
            quantity: stored.quantity,
            category: stored.category.unwrap_or_default(),
            description: stored.description.unwrap_or_default(),
            price: stored.price.unwrap_or_default(),
            supplier: stored.supplier.unwrap_or_default(),
        })
    }

    /// Read just the quantity of a stored document.
    pub fn quantity_of(name: &str, doc: &Document) -> DomainResult<u32> {
        doc.get("quantity")
            .and_then(Value::as_u64)
            .and_then(|q| u32::try_from(q).ok())
            .ok_or_else(|| DomainError::malformed(name, "quantity is missing or not a count"))
    }
}

/// An item as seen in the snapshot: its key plus its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: ItemName,
    #[serde(flatten)]
    pub attributes: ItemAttributes,
}

impl Item {
    pub fn new(name: ItemName, attributes: ItemAttributes) -> Self {
        Self { name, attributes }
    }

    /// Rebuild an item from a collection key and its stored document.
    pub fn from_record(key: String, doc: Document) -> DomainResult<Self> {
        if key.is_empty() {
            return Err(DomainError::malformed(key, "record key is empty"));
        }
        let attributes = ItemAttributes::from_document(&key, doc)?;
        Ok(Self {
            name: ItemName(key),
            attributes,
        })
    }

    pub fn quantity(&self) -> u32 {
        self.attributes.quantity
    }

    pub fn category(&self) -> &Category {
        &self.attributes.category
    }
}
