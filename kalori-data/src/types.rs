use serde::Deserialize;

/// Value in the `grams` column that means "use the food's own unit weight".
pub const PER_UNIT_SENTINEL: &str = "per_unit";

/// Raw `units.csv` row; `grams` is either a number or [`PER_UNIT_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnitRow {
    pub unit: String,
    pub grams: String,
}
