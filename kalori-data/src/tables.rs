//! Reference table loaders (CSV + plain text).
//!
//! Expected layout of a reference directory:
//!   foods.csv            name,protein,fat,carbs,unit_grams
//!   units.csv            unit,grams            (grams may be `per_unit`)
//!   cooking_methods.csv  name,extra_fat        (row order = detection order)
//!   features.txt         one model column per line
//!
//! Lines starting with `#` are comments in every file.

use anyhow::{Context, Result, bail};
use kalori_core::{CookingMethod, FoodEntry, ReferenceData, UnitConversion};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::types::{PER_UNIT_SENTINEL, UnitRow};

pub const FOODS_FILE: &str = "foods.csv";
pub const UNITS_FILE: &str = "units.csv";
pub const METHODS_FILE: &str = "cooking_methods.csv";
pub const FEATURES_FILE: &str = "features.txt";

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(rdr)
}

pub fn parse_foods_csv<R: Read>(rdr: R) -> Result<Vec<FoodEntry>> {
    let mut out = Vec::new();
    for (i, row) in csv_reader(rdr).deserialize::<FoodEntry>().enumerate() {
        let food = row.with_context(|| format!("foods row {}", i + 1))?;
        out.push(food);
    }
    Ok(out)
}

pub fn parse_units_csv<R: Read>(rdr: R) -> Result<Vec<(String, UnitConversion)>> {
    let mut out = Vec::new();
    for (i, row) in csv_reader(rdr).deserialize::<UnitRow>().enumerate() {
        let row = row.with_context(|| format!("units row {}", i + 1))?;
        let conversion = parse_unit_grams(&row.grams)
            .with_context(|| format!("unit '{}'", row.unit))?;
        out.push((row.unit, conversion));
    }
    Ok(out)
}

pub fn parse_methods_csv<R: Read>(rdr: R) -> Result<Vec<CookingMethod>> {
    let mut out = Vec::new();
    for (i, row) in csv_reader(rdr).deserialize::<CookingMethod>().enumerate() {
        let method = row.with_context(|| format!("cooking methods row {}", i + 1))?;
        out.push(method);
    }
    Ok(out)
}

/// One column name per non-blank, non-comment line, in file order.
pub fn parse_feature_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn parse_unit_grams(raw: &str) -> Result<UnitConversion> {
    let raw = raw.trim();
    if raw == PER_UNIT_SENTINEL {
        return Ok(UnitConversion::PerUnit);
    }
    let grams: f64 = raw
        .parse()
        .with_context(|| format!("expected a number or '{PER_UNIT_SENTINEL}', got '{raw}'"))?;
    Ok(UnitConversion::Grams(grams))
}

/// Load and validate every table in `dir`.
pub fn load_reference_dir(dir: impl AsRef<Path>) -> Result<ReferenceData> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("reference data directory not found: {}", dir.display());
    }

    let open = |name: &str| {
        let p = dir.join(name);
        fs::File::open(&p).with_context(|| format!("opening {}", p.display()))
    };

    let foods = parse_foods_csv(open(FOODS_FILE)?).context("parsing foods")?;
    let units = parse_units_csv(open(UNITS_FILE)?).context("parsing units")?;
    let methods = parse_methods_csv(open(METHODS_FILE)?).context("parsing cooking methods")?;

    let features_path = dir.join(FEATURES_FILE);
    let features = fs::read_to_string(&features_path)
        .with_context(|| format!("read {}", features_path.display()))?;

    let store = ReferenceData::new(foods, units, methods, parse_feature_names(&features))?;
    tracing::info!(
        foods = store.foods().len(),
        units = store.unit_count(),
        methods = store.methods().len(),
        features = store.feature_names().len(),
        dir = %dir.display(),
        "loaded reference data"
    );
    Ok(store)
}

/// Like [`load_reference_dir`], but a failed load becomes the empty store.
pub fn load_or_empty(dir: impl AsRef<Path>) -> ReferenceData {
    match load_reference_dir(dir.as_ref()) {
        Ok(store) => store,
        Err(err) => {
            tracing::warn!("reference data unavailable ({err:#}); continuing with empty store");
            ReferenceData::empty()
        }
    }
}
