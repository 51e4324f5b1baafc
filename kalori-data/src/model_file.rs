//! Linear calorie model stored as JSON:
//!
//!   { "intercept": 0.0, "weights": { "Protein": 4.0, "Fat": 9.0, ... } }

use anyhow::{Context, Result};
use kalori_core::LinearModel;
use std::fs;
use std::path::Path;

pub fn parse_linear_model(json: &str) -> Result<LinearModel> {
    serde_json::from_str(json).context("parse linear model JSON")
}

pub fn load_linear_model(path: impl AsRef<Path>) -> Result<LinearModel> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_linear_model(&s).with_context(|| format!("loading model {}", path.display()))
}
