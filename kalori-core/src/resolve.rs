//! Fuzzy food resolution and token-to-item resolution.
//!
//! Similarity is normalized Levenshtein (1.0 = identical). Only the single best
//! candidate is considered, and only if it reaches the cutoff. Equal scores go
//! to the food that comes first in the store.

use serde::Serialize;
use strsim::normalized_levenshtein;

use crate::extract::ExtractedToken;
use crate::quantity::grams_for;
use crate::reference::{CookingMethod, FoodEntry, ReferenceData};

/// Minimum similarity for a word to count as a food.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Best food for a word, with its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodMatch<'a> {
    pub food: &'a FoodEntry,
    pub score: f64,
}

/// A token whose food and method both resolved against the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedItem<'a> {
    pub food: &'a FoodEntry,
    pub grams: f64,
    pub method: &'a CookingMethod,
}

/// Closest food to `word`, or `None` when nothing reaches `cutoff`.
pub fn closest_food<'a>(word: &str, store: &'a ReferenceData, cutoff: f64) -> Option<FoodMatch<'a>> {
    if let Some(food) = store.food(word) {
        return Some(FoodMatch { food, score: 1.0 });
    }

    let mut best: Option<FoodMatch<'a>> = None;
    for food in store.foods() {
        let score = normalized_levenshtein(word, &food.name);
        if best.is_none_or(|b| score > b.score) {
            best = Some(FoodMatch { food, score });
        }
    }

    best.filter(|m| m.score >= cutoff)
}

/// Turn one extracted token into an item, or drop it.
///
/// When the food word does not resolve and the tentative unit is not a known
/// unit, the tentative unit is tried as the food with no unit at all.
pub fn resolve_token<'a>(
    token: &ExtractedToken,
    method: &'a CookingMethod,
    store: &'a ReferenceData,
    cutoff: f64,
) -> Option<ResolvedItem<'a>> {
    if let Some(m) = closest_food(&token.word_token, store, cutoff) {
        let grams = grams_for(token.quantity, token.unit_token.as_deref(), m.food, store);
        return Some(ResolvedItem { food: m.food, grams, method });
    }

    let unit = token.unit_token.as_deref()?;
    if store.unit(unit).is_some() {
        return None;
    }

    let m = closest_food(unit, store, cutoff)?;
    tracing::debug!(word = unit, food = %m.food.name, "re-read unit slot as food");
    Some(ResolvedItem {
        food: m.food,
        grams: grams_for(token.quantity, None, m.food, store),
        method,
    })
}
