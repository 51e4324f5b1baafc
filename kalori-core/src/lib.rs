//! kalori-core: meal text to quantities, macros and calorie estimates

pub mod aggregate;
pub mod analyzer;
pub mod cooking;
pub mod error;
pub mod extract;
pub mod features;
pub mod model;
pub mod quantity;
pub mod reference;
pub mod resolve;
pub mod text;

pub use aggregate::{ItemNutrition, Nutrition, NutritionReport, aggregate, features_for, macros_for};
pub use analyzer::{Analyzer, AnalyzerOptions, Estimate, NotUnderstood};
pub use cooking::detect_method;
pub use error::CoreError;
pub use extract::{ExtractedToken, extract_tokens};
pub use features::{FeatureVector, method_column};
pub use model::{CalorieModel, LinearModel};
pub use quantity::grams_for;
pub use reference::{CookingMethod, DEFAULT_METHOD, FoodEntry, ReferenceData, UnitConversion};
pub use resolve::{DEFAULT_CUTOFF, FoodMatch, ResolvedItem, closest_food, resolve_token};
pub use text::fold_text;
