//! View filter: search text + category over a snapshot.

use serde::{Deserialize, Serialize};

use stockroom_core::{Category, Item};

/// Search and category criteria for the item list.
///
/// An unset category and [`Category::None`] both mean "all categories";
/// items without a category therefore cannot be selected on their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<Category>,
}

impl ViewFilter {
    pub fn new(search: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    fn active_category(&self) -> Option<&Category> {
        self.category.as_ref().filter(|c| !c.is_none())
    }

    pub fn matches(&self, item: &Item) -> bool {
        let needle = self.search.to_lowercase();
        matches_with(item, &needle, self.active_category())
    }

    /// Apply to a snapshot, preserving snapshot order.
    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        filter_items(items, &self.search, self.active_category())
    }
}

fn matches_with(item: &Item, needle: &str, category: Option<&Category>) -> bool {
    item.name.as_str().to_lowercase().contains(needle)
        && category.is_none_or(|c| item.category() == c)
}

/// Items whose name contains `search` (case-insensitively) and, when given,
/// whose category equals `category` exactly. Order follows `items`.
pub fn filter_items(items: &[Item], search: &str, category: Option<&Category>) -> Vec<Item> {
    let needle = search.to_lowercase();
    let category = category.filter(|c| !c.is_none());
    items
        .iter()
        .filter(|item| matches_with(item, &needle, category))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockroom_core::{ItemAttributes, ItemName};

    fn item(name: &str, category: Category) -> Item {
        Item::new(
            ItemName::parse(name).unwrap(),
            ItemAttributes {
                quantity: 1,
                category,
                ..ItemAttributes::default()
            },
        )
    }

    fn sample() -> Vec<Item> {
        vec![
            item("Bread", Category::Food),
            item("Laptop", Category::Electronics),
            item("breadbox", Category::Other("Kitchen".to_string())),
            item("Scarf", Category::Clothing),
            item("Spare parts", Category::None),
        ]
    }

    #[test]
    fn empty_filter_returns_snapshot_unchanged() {
        let items = sample();
        assert_eq!(filter_items(&items, "", None), items);
        assert_eq!(ViewFilter::default().apply(&items), items);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = sample();
        let names: Vec<_> = filter_items(&items, "bread", None)
            .into_iter()
            .map(|i| i.name.to_string())
            .collect();
        assert_eq!(names, vec!["Bread", "breadbox"]);

        let upper = filter_items(&items, "BREAD", None);
        assert_eq!(upper.len(), 2);
    }

    #[test]
    fn category_must_match_exactly() {
        let items = sample();
        let food = filter_items(&items, "", Some(&Category::Food));
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name.as_str(), "Bread");

        let kitchen = filter_items(&items, "", Some(&Category::from("kitchen")));
        assert!(kitchen.is_empty());
    }

    #[test]
    fn none_category_means_all() {
        let items = sample();
        let filter = ViewFilter::new("", Some(Category::None));
        assert_eq!(filter.apply(&items), items);
    }

    #[test]
    fn search_and_category_combine() {
        let items = sample();
        let filter = ViewFilter::new("bread", Some(Category::Food));
        let out = filter.apply(&items);
        assert_eq!(out.len(), 1);
        assert!(filter.matches(&items[0]));
        assert!(!filter.matches(&items[2]));
    }

    proptest! {
        /// Filtering yields an order-preserving subsequence of the input.
        #[test]
        fn result_is_subsequence(
            names in prop::collection::vec("[a-zA-Z]{1,8}", 0..12),
            search in "[a-zA-Z]{0,3}",
        ) {
            let items: Vec<Item> = names.iter().map(|n| item(n, Category::Food)).collect();
            let out = filter_items(&items, &search, None);

            let mut cursor = items.iter();
            for found in &out {
                prop_assert!(cursor.any(|i| i == found));
                prop_assert!(found.name.as_str().to_lowercase().contains(&search.to_lowercase()));
            }
        }

        /// Applying the same filter twice changes nothing.
        #[test]
        fn filter_is_idempotent(
            names in prop::collection::vec("[a-zA-Z]{1,8}", 0..12),
            search in "[a-zA-Z]{0,3}",
        ) {
            let items: Vec<Item> = names.iter().map(|n| item(n, Category::Food)).collect();
            let once = filter_items(&items, &search, Some(&Category::Food));
            let twice = filter_items(&once, &search, Some(&Category::Food));
            prop_assert_eq!(once, twice);
        }
    }
}
