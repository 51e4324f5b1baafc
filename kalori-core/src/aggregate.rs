//! Nutrition aggregation: macros per item, one model score per item, totals.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::error::CoreError;
use crate::features::{CARBS, FAT, FeatureVector, PROTEIN, method_column};
use crate::model::CalorieModel;
use crate::resolve::ResolvedItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Nutrition {
    /// Every value rounded to one decimal place.
    pub fn rounded(&self) -> Self {
        Self {
            calories: round1(self.calories),
            protein: round1(self.protein),
            fat: round1(self.fat),
            carbs: round1(self.carbs),
        }
    }
}

impl AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.fat += rhs.fat;
        self.carbs += rhs.carbs;
    }
}

/// Output row for one resolved item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemNutrition {
    pub food: String,
    /// Grams.
    pub amount: f64,
    pub method: String,
    #[serde(flatten)]
    pub nutrition: Nutrition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionReport {
    pub items: Vec<ItemNutrition>,
    pub totals: Nutrition,
}

/// Protein, fat and carbs for one item; calories are left at zero.
///
/// Fat includes whatever the cooking method adds.
pub fn macros_for(item: &ResolvedItem<'_>) -> Nutrition {
    let ratio = item.grams / 100.0;
    Nutrition {
        calories: 0.0,
        protein: item.food.protein_per_100g * ratio,
        fat: (item.food.fat_per_100g + item.method.extra_fat_per_100g) * ratio,
        carbs: item.food.carb_per_100g * ratio,
    }
}

/// Model input row for one item.
pub fn features_for<'a>(macros: &Nutrition, method: &str, feature_names: &'a [String]) -> FeatureVector<'a> {
    let mut row = FeatureVector::zeros(feature_names);
    row.set(PROTEIN, macros.protein);
    row.set(FAT, macros.fat);
    row.set(CARBS, macros.carbs);
    if !row.set(&method_column(method), 1.0) {
        tracing::debug!(method, "no one-hot column for cooking method");
    }
    row
}

/// Score every item and sum the results.
///
/// Totals are summed from unrounded values; rounding happens once, on output.
/// The first scoring failure aborts the whole report.
pub fn aggregate<M: CalorieModel + ?Sized>(
    items: &[ResolvedItem<'_>],
    feature_names: &[String],
    model: &M,
) -> Result<NutritionReport, CoreError> {
    let mut totals = Nutrition::default();
    let mut rows = Vec::with_capacity(items.len());

    for item in items {
        let mut nutrition = macros_for(item);
        let features = features_for(&nutrition, &item.method.name, feature_names);

        let calories = model.score(&features).map_err(|source| CoreError::Scoring {
            food: item.food.name.clone(),
            source,
        })?;
        if !calories.is_finite() {
            return Err(CoreError::NonFiniteScore {
                food: item.food.name.clone(),
                value: calories,
            });
        }
        nutrition.calories = calories;
        totals += nutrition;

        rows.push(ItemNutrition {
            food: item.food.name.clone(),
            amount: item.grams,
            method: item.method.name.clone(),
            nutrition: nutrition.rounded(),
        });
    }

    Ok(NutritionReport {
        items: rows,
        totals: totals.rounded(),
    })
}

/// One decimal; `+ 0.0` turns a rounded `-0.0` into `0.0`.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearModel;
    use crate::reference::{CookingMethod, FoodEntry};

    struct FixedModel(f64);

    impl CalorieModel for FixedModel {
        fn score(&self, _features: &FeatureVector<'_>) -> anyhow::Result<f64> {
            Ok(self.0)
        }
    }

    struct FailingModel;

    impl CalorieModel for FailingModel {
        fn score(&self, _features: &FeatureVector<'_>) -> anyhow::Result<f64> {
            anyhow::bail!("model not loaded")
        }
    }

    fn names() -> Vec<String> {
        ["Protein", "Fat", "Carbs", "Method_haslama", "Method_kizartma"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_macros_boiled_egg() {
        let egg = FoodEntry::new("yumurta", 13.0, 11.0, 1.1, 50.0);
        let boil = CookingMethod::new("haslama", 0.0);
        let item = ResolvedItem { food: &egg, grams: 100.0, method: &boil };
        let m = macros_for(&item).rounded();
        assert_eq!((m.protein, m.fat, m.carbs), (13.0, 11.0, 1.1));
    }

    #[test]
    fn test_macros_include_method_fat() {
        let egg = FoodEntry::new("yumurta", 13.0, 11.0, 1.1, 50.0);
        let fry = CookingMethod::new("kizartma", 5.0);
        let item = ResolvedItem { food: &egg, grams: 150.0, method: &fry };
        assert_eq!(macros_for(&item).fat, 24.0);
    }

    #[test]
    fn test_feature_row_one_hot() {
        let names = names();
        let macros = Nutrition { calories: 0.0, protein: 13.0, fat: 11.0, carbs: 1.1 };
        let row = features_for(&macros, "kizartma", &names);
        assert_eq!(row.values(), &[13.0, 11.0, 1.1, 0.0, 1.0]);

        let row = features_for(&macros, "buhar", &names);
        assert_eq!(row.values(), &[13.0, 11.0, 1.1, 0.0, 0.0]);
    }

    #[test]
    fn test_model_sees_feature_row() {
        struct EchoFat;
        impl CalorieModel for EchoFat {
            fn score(&self, features: &FeatureVector<'_>) -> anyhow::Result<f64> {
                assert_eq!(features.get("Method_kizartma"), Some(1.0));
                Ok(features.get("Fat").unwrap_or_default())
            }
        }

        let names = names();
        let egg = FoodEntry::new("yumurta", 13.0, 11.0, 1.1, 50.0);
        let fry = CookingMethod::new("kizartma", 5.0);
        let items = [ResolvedItem { food: &egg, grams: 100.0, method: &fry }];
        let report = aggregate(&items, &names, &EchoFat).unwrap();
        assert_eq!(report.items[0].nutrition.calories, 16.0);
    }

    #[test]
    fn test_totals_are_rounded_once() {
        // 0.04 g protein each: every row rounds to 0.0, the sum rounds to 0.1
        let names = names();
        let food = FoodEntry::new("tuz", 0.04, 0.0, 0.0, 1.0);
        let boil = CookingMethod::new("haslama", 0.0);
        let items = [
            ResolvedItem { food: &food, grams: 100.0, method: &boil },
            ResolvedItem { food: &food, grams: 100.0, method: &boil },
        ];
        let report = aggregate(&items, &names, &FixedModel(10.04)).unwrap();
        assert_eq!(report.items[0].nutrition.protein, 0.0);
        assert_eq!(report.totals.protein, 0.1);
        assert_eq!(report.items[0].nutrition.calories, 10.0);
        assert_eq!(report.totals.calories, 20.1);
    }

    #[test]
    fn test_totals_sum_items() {
        let names = names();
        let egg = FoodEntry::new("yumurta", 13.0, 11.0, 1.1, 50.0);
        let bread = FoodEntry::new("ekmek", 9.0, 3.2, 49.0, 25.0);
        let boil = CookingMethod::new("haslama", 0.0);
        let items = [
            ResolvedItem { food: &egg, grams: 100.0, method: &boil },
            ResolvedItem { food: &bread, grams: 50.0, method: &boil },
        ];
        let report = aggregate(&items, &names, &LinearModel::atwater()).unwrap();
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.totals.protein, 17.5);
        assert_eq!(report.totals.fat, 12.6);
        assert_eq!(report.totals.carbs, 25.6);
        // 4*17.5 + 9*12.6 + 4*25.6
        assert_eq!(report.totals.calories, 285.8);
    }

    #[test]
    fn test_scoring_error_aborts() {
        let names = names();
        let egg = FoodEntry::new("yumurta", 13.0, 11.0, 1.1, 50.0);
        let boil = CookingMethod::new("haslama", 0.0);
        let items = [ResolvedItem { food: &egg, grams: 100.0, method: &boil }];
        let err = aggregate(&items, &names, &FailingModel).unwrap_err();
        assert!(matches!(err, CoreError::Scoring { ref food, .. } if food == "yumurta"));
    }

    #[test]
    fn test_non_finite_score_aborts() {
        let names = names();
        let egg = FoodEntry::new("yumurta", 13.0, 11.0, 1.1, 50.0);
        let boil = CookingMethod::new("haslama", 0.0);
        let items = [ResolvedItem { food: &egg, grams: 100.0, method: &boil }];
        let err = aggregate(&items, &names, &FixedModel(f64::NAN)).unwrap_err();
        assert!(matches!(err, CoreError::NonFiniteScore { .. }));
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let names = names();
        let cucumber = FoodEntry::new("salatalik", 0.7, 0.0, 3.6, 120.0);
        let drained = CookingMethod::new("suzme", -0.04);
        let items = [ResolvedItem { food: &cucumber, grams: 100.0, method: &drained }];
        let report = aggregate(&items, &names, &FixedModel(-0.01)).unwrap();

        let row = report.items[0].nutrition;
        assert!(row.fat.is_sign_positive());
        assert!(row.calories.is_sign_positive());
        assert_eq!(format!("{:.1}", report.totals.fat), "0.0");
        assert_eq!(format!("{:.1}", report.totals.calories), "0.0");
    }

    #[test]
    fn test_report_json_shape() {
        let report = NutritionReport {
            items: vec![ItemNutrition {
                food: "yumurta".to_string(),
                amount: 100.0,
                method: "haslama".to_string(),
                nutrition: Nutrition { calories: 155.0, protein: 13.0, fat: 11.0, carbs: 1.1 },
            }],
            totals: Nutrition { calories: 155.0, protein: 13.0, fat: 11.0, carbs: 1.1 },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["items"][0]["food"], "yumurta");
        assert_eq!(json["items"][0]["calories"], 155.0);
        assert_eq!(json["totals"]["carbs"], 1.1);
    }
}
