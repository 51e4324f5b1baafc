//! The calorie model seam.
//!
//! The pipeline only needs a single-row score. Whatever sits behind it (a
//! trained regressor, a remote service, a fixed table) is the caller's choice.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::features::{CARBS, FAT, FeatureVector, PROTEIN};

/// Scores one feature row into a calorie estimate.
pub trait CalorieModel {
    fn score(&self, features: &FeatureVector<'_>) -> anyhow::Result<f64>;
}

/// Any scoring function is a model.
impl<F> CalorieModel for F
where
    F: Fn(&FeatureVector<'_>) -> anyhow::Result<f64>,
{
    fn score(&self, features: &FeatureVector<'_>) -> anyhow::Result<f64> {
        self(features)
    }
}

/// `intercept + Σ weight[column] × value[column]`.
///
/// Columns without a weight contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub intercept: f64,
    pub weights: HashMap<String, f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, weights: HashMap<String, f64>) -> Self {
        Self { intercept, weights }
    }

    /// Atwater general factors: 4 kcal/g protein, 9 kcal/g fat, 4 kcal/g carbs.
    pub fn atwater() -> Self {
        let weights = [(PROTEIN, 4.0), (FAT, 9.0), (CARBS, 4.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self::new(0.0, weights)
    }
}

impl CalorieModel for LinearModel {
    fn score(&self, features: &FeatureVector<'_>) -> anyhow::Result<f64> {
        let sum: f64 = features
            .iter()
            .map(|(name, value)| self.weights.get(name).copied().unwrap_or(0.0) * value)
            .sum();
        Ok(self.intercept + sum)
    }
}
