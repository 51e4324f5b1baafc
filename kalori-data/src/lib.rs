//! kalori-data: loaders for reference tables and the linear calorie model.

pub mod model_file;
pub mod tables;
pub mod types;

pub use model_file::{load_linear_model, parse_linear_model};
pub use tables::{load_or_empty, load_reference_dir};
pub use types::{PER_UNIT_SENTINEL, UnitRow};
