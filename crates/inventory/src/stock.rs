//! Quantity rules for add and decrement.

use stockroom_core::{DomainError, DomainResult, ItemAttributes};

/// Merge an add into whatever is already stored.
///
/// The quantities are summed; every other field comes from `incoming`, the
/// previous category/description/price/supplier are discarded.
pub fn accumulate(
    existing_quantity: Option<u32>,
    incoming: ItemAttributes,
) -> DomainResult<ItemAttributes> {
    let Some(existing) = existing_quantity else {
        return Ok(incoming);
    };

    let quantity = existing
        .checked_add(incoming.quantity)
        .ok_or_else(|| DomainError::invalid_input("quantity overflow"))?;

    Ok(ItemAttributes {
        quantity,
        ..incoming
    })
}

/// What a decrement should do to the stored record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecrementPlan {
    /// No record exists; nothing to write.
    Skip,
    /// The last unit is gone; delete the record.
    Remove,
    /// Store the reduced quantity.
    SetQuantity(u32),
}

pub fn plan_decrement(existing_quantity: Option<u32>) -> DecrementPlan {
    match existing_quantity {
        None => DecrementPlan::Skip,
        Some(q) if q <= 1 => DecrementPlan::Remove,
        Some(q) => DecrementPlan::SetQuantity(q - 1),
    }
}
