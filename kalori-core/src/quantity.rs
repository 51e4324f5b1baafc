//! Quantity normalization: (quantity, unit, food) to grams.

use crate::reference::{FoodEntry, ReferenceData, UnitConversion};

/// Gram weight for `quantity` of `food` expressed in `unit_token`.
///
/// Known units convert through the store; an absent or unknown unit means the
/// number already is grams. No upper bound is applied.
pub fn grams_for(quantity: u64, unit_token: Option<&str>, food: &FoodEntry, store: &ReferenceData) -> f64 {
    let quantity = quantity as f64;
    match unit_token.and_then(|u| store.unit(u)) {
        Some(UnitConversion::PerUnit) => quantity * food.unit_grams,
        Some(UnitConversion::Grams(per_unit)) => quantity * per_unit,
        None => quantity,
    }
}
