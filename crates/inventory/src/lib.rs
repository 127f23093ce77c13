//! Inventory rules (pure).
//!
//! This crate decides *what* a mutation writes and *which* items a view shows.
//! It performs no IO; the infra layer executes the plans against a collection.

pub mod filter;
pub mod stock;
pub mod view;

pub use filter::{ViewFilter, filter_items};
pub use stock::{DecrementPlan, accumulate, plan_decrement};
pub use view::{ItemDraft, ViewModel};
