//! Reference tables: food composition, unit conversions, cooking methods
//! and the feature layout the calorie model was trained on.
//!
//! Built once, then only read. Names and unit tokens are stored folded
//! (see [`crate::text::fold_text`]) so they compare directly against
//! normalized input.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CoreError;
use crate::text::fold_text;

/// Method applied when the sentence names none.
pub const DEFAULT_METHOD: &str = "haslama";

/// Composition of one food, per 100 grams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub name: String,
    #[serde(rename = "protein")]
    pub protein_per_100g: f64,
    #[serde(rename = "fat")]
    pub fat_per_100g: f64,
    #[serde(rename = "carbs")]
    pub carb_per_100g: f64,
    /// Grams in one piece of this food (one egg, one slice, ...).
    pub unit_grams: f64,
}

impl FoodEntry {
    pub fn new(
        name: impl Into<String>,
        protein_per_100g: f64,
        fat_per_100g: f64,
        carb_per_100g: f64,
        unit_grams: f64,
    ) -> Self {
        Self {
            name: name.into(),
            protein_per_100g,
            fat_per_100g,
            carb_per_100g,
            unit_grams,
        }
    }
}

/// How a unit token turns into grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UnitConversion {
    /// Use the matched food's own `unit_grams`.
    #[serde(rename = "per_unit")]
    PerUnit,
    /// Fixed number of grams per unit.
    #[serde(rename = "grams")]
    Grams(f64),
}

/// Extra fat a cooking method adds, per 100 grams of food.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CookingMethod {
    pub name: String,
    #[serde(rename = "extra_fat")]
    pub extra_fat_per_100g: f64,
}

impl CookingMethod {
    pub fn new(name: impl Into<String>, extra_fat_per_100g: f64) -> Self {
        Self {
            name: name.into(),
            extra_fat_per_100g,
        }
    }
}

/// The read-only store every request works against.
///
/// Foods and methods keep their insertion order: the resolver breaks score
/// ties by it and the method detector picks the first substring hit by it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    foods: Vec<FoodEntry>,
    food_index: HashMap<String, usize>,
    units: HashMap<String, UnitConversion>,
    methods: Vec<CookingMethod>,
    feature_names: Vec<String>,
}

impl ReferenceData {
    /// Validate and index the tables.
    pub fn new(
        foods: Vec<FoodEntry>,
        units: Vec<(String, UnitConversion)>,
        methods: Vec<CookingMethod>,
        feature_names: Vec<String>,
    ) -> Result<Self, CoreError> {
        let mut store = ReferenceData {
            feature_names,
            ..Default::default()
        };

        for mut food in foods {
            food.name = fold_text(food.name.trim());
            validate_food(&food)?;
            if store.food_index.contains_key(&food.name) {
                return Err(invalid(format!("duplicate food '{}'", food.name)));
            }
            store.food_index.insert(food.name.clone(), store.foods.len());
            store.foods.push(food);
        }

        for (token, conversion) in units {
            let token = fold_text(token.trim());
            if token.is_empty() {
                return Err(invalid("empty unit token".to_string()));
            }
            if let UnitConversion::Grams(g) = conversion {
                if !g.is_finite() || g <= 0.0 {
                    return Err(invalid(format!("unit '{token}' has non-positive grams {g}")));
                }
            }
            store.units.insert(token, conversion);
        }

        for mut method in methods {
            method.name = fold_text(method.name.trim());
            if method.name.is_empty() {
                return Err(invalid("empty cooking method name".to_string()));
            }
            if !method.extra_fat_per_100g.is_finite() {
                return Err(invalid(format!("method '{}' has non-finite extra fat", method.name)));
            }
            if store.method(&method.name).is_some() {
                return Err(invalid(format!("duplicate cooking method '{}'", method.name)));
            }
            store.methods.push(method);
        }

        Ok(store)
    }

    /// The store a failed load degrades to. Nothing resolves against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// No foods means nothing can ever be understood.
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn food(&self, name: &str) -> Option<&FoodEntry> {
        self.food_index.get(name).map(|&i| &self.foods[i])
    }

    pub fn foods(&self) -> &[FoodEntry] {
        &self.foods
    }

    pub fn unit(&self, token: &str) -> Option<UnitConversion> {
        self.units.get(token).copied()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn method(&self, name: &str) -> Option<&CookingMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn methods(&self) -> &[CookingMethod] {
        &self.methods
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }

    /// Column order of the model's feature vector.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

fn validate_food(food: &FoodEntry) -> Result<(), CoreError> {
    if food.name.is_empty() {
        return Err(invalid("empty food name".to_string()));
    }
    let per_100g = [
        ("protein", food.protein_per_100g),
        ("fat", food.fat_per_100g),
        ("carbs", food.carb_per_100g),
    ];
    for (label, value) in per_100g {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!("food '{}' has invalid {label} {value}", food.name)));
        }
    }
    if !food.unit_grams.is_finite() || food.unit_grams <= 0.0 {
        return Err(invalid(format!(
            "food '{}' has non-positive unit grams {}",
            food.name, food.unit_grams
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> CoreError {
    CoreError::InvalidReference(msg)
}
