//! Feature vectors laid out in the model's column order.

use serde::Serialize;

pub const PROTEIN: &str = "Protein";
pub const FAT: &str = "Fat";
pub const CARBS: &str = "Carbs";
pub const METHOD_PREFIX: &str = "Method_";

/// One-hot column name for a cooking method.
pub fn method_column(method: &str) -> String {
    format!("{METHOD_PREFIX}{method}")
}

/// A single row of model input. Columns come from the reference store and
/// cannot be added; setting an unknown column is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector<'a> {
    names: &'a [String],
    values: Vec<f64>,
}

impl<'a> FeatureVector<'a> {
    pub fn zeros(names: &'a [String]) -> Self {
        Self {
            names,
            values: vec![0.0; names.len()],
        }
    }

    /// Set `name` to `value`; returns false when the column does not exist.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names.iter().position(|n| n == name).map(|i| self.values[i])
    }

    pub fn names(&self) -> &'a [String] {
        self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["Protein", "Fat", "Carbs", "Method_haslama", "Method_kizartma"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_zero_initialized_in_column_order() {
        let names = names();
        let v = FeatureVector::zeros(&names);
        assert_eq!(v.values(), &[0.0; 5]);
        assert_eq!(v.names()[3], "Method_haslama");
    }

    #[test]
    fn test_set_known_and_unknown_columns() {
        let names = names();
        let mut v = FeatureVector::zeros(&names);
        assert!(v.set(PROTEIN, 13.0));
        assert!(v.set(&method_column("kizartma"), 1.0));
        assert!(!v.set(&method_column("buhar"), 1.0));
        assert_eq!(v.values(), &[13.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(v.get("Method_buhar"), None);
    }

    #[test]
    fn test_serializes_as_json() {
        let names = vec!["Protein".to_string()];
        let mut v = FeatureVector::zeros(&names);
        v.set(PROTEIN, 2.5);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["values"][0], 2.5);
        assert_eq!(json["names"][0], "Protein");
    }
}
