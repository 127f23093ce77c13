//! Item categories.

use serde::{Deserialize, Serialize};

/// Category of an item.
///
/// The form offers a small fixed set, but stored records may carry any text;
/// unknown values round-trip through [`Category::Other`] unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// No category (stored as the empty string).
    #[default]
    None,
    Food,
    Electronics,
    Clothing,
    Other(String),
}

impl Category {
    /// Categories offered by the add/edit forms, in display order.
    pub const KNOWN: [Category; 4] = [
        Category::None,
        Category::Food,
        Category::Electronics,
        Category::Clothing,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::None => "",
            Category::Food => "Food",
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Other(s) => s,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Category::None)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Category::None,
            "Food" => Category::Food,
            "Electronics" => Category::Electronics,
            "Clothing" => Category::Clothing,
            _ => Category::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_map_to_variants() {
        assert_eq!(Category::from("Food"), Category::Food);
        assert_eq!(Category::from("Electronics"), Category::Electronics);
        assert_eq!(Category::from("Clothing"), Category::Clothing);
        assert_eq!(Category::from(""), Category::None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Category::from("food"), Category::Other("food".to_string()));
        assert_ne!(Category::from("food"), Category::Food);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_value(Category::Electronics).unwrap();
        assert_eq!(json, serde_json::json!("Electronics"));

        let none = serde_json::to_value(Category::None).unwrap();
        assert_eq!(none, serde_json::json!(""));

        let other: Category = serde_json::from_value(serde_json::json!("Garden")).unwrap();
        assert_eq!(other.as_str(), "Garden");
    }
}
