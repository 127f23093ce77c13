//! `stockroom-core` - domain building blocks for the inventory tracker.
//!
//! This crate contains **pure domain** types (no IO, no storage): item names,
//! item attributes, categories, and the document encoding used to persist them.

pub mod category;
pub mod error;
pub mod item;

pub use category::Category;
pub use error::{DomainError, DomainResult};
pub use item::{Document, Item, ItemAttributes, ItemName};
