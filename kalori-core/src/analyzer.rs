//! The request pipeline: text in, nutrition report out.
//!
//! [`Analyzer`] bundles the reference store, the calorie model and the
//! matching options. It is built once and only read afterwards, so one
//! instance can serve any number of concurrent requests as long as the model
//! allows it.

use serde::{Deserialize, Serialize};

use crate::aggregate::{self, ItemNutrition, Nutrition, NutritionReport};
use crate::cooking::detect_method;
use crate::error::CoreError;
use crate::extract::extract_tokens;
use crate::model::CalorieModel;
use crate::reference::{DEFAULT_METHOD, ReferenceData};
use crate::resolve::{DEFAULT_CUTOFF, ResolvedItem, resolve_token};
use crate::text::fold_text;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    /// Minimum similarity for a fuzzy food match.
    pub cutoff: f64,
    /// Method used when the sentence names none.
    pub default_method: String,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            default_method: DEFAULT_METHOD.to_string(),
        }
    }
}

/// Why nothing could be estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotUnderstood {
    /// The reference store is empty (failed or missing load).
    DataUnavailable,
    /// The text produced no resolvable item.
    NoUnderstandableInput,
}

/// Outcome of a full estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Estimate {
    Understood(NutritionReport),
    NotUnderstood(NotUnderstood),
}

impl Estimate {
    pub fn is_understood(&self) -> bool {
        matches!(self, Estimate::Understood(_))
    }

    pub fn items(&self) -> &[ItemNutrition] {
        match self {
            Estimate::Understood(report) => &report.items,
            Estimate::NotUnderstood(_) => &[],
        }
    }

    /// Zero when nothing was understood.
    pub fn totals(&self) -> Nutrition {
        match self {
            Estimate::Understood(report) => report.totals,
            Estimate::NotUnderstood(_) => Nutrition::default(),
        }
    }
}

pub struct Analyzer<M> {
    store: ReferenceData,
    model: M,
    options: AnalyzerOptions,
}

impl<M: CalorieModel> Analyzer<M> {
    pub fn new(store: ReferenceData, model: M) -> Self {
        Self {
            store,
            model,
            options: AnalyzerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &ReferenceData {
        &self.store
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Extract, resolve and weigh every food mention in `text`.
    ///
    /// Tokens that do not resolve are dropped silently; an empty store
    /// yields an empty list.
    pub fn extract_and_resolve(&self, text: &str) -> Vec<ResolvedItem<'_>> {
        if self.store.is_empty() {
            return Vec::new();
        }

        let text = fold_text(text);
        let tokens = extract_tokens(&text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let Some(method) = detect_method(&text, &self.store, &self.options.default_method) else {
            tracing::warn!(
                default = %self.options.default_method,
                "default cooking method missing from reference data; dropping all items"
            );
            return Vec::new();
        };
        tracing::debug!(method = %method.name, tokens = tokens.len(), "extracted tokens");

        tokens
            .iter()
            .filter_map(|token| {
                let item = resolve_token(token, method, &self.store, self.options.cutoff);
                if item.is_none() {
                    tracing::debug!(word = %token.word_token, "dropping unresolved token");
                }
                item
            })
            .collect()
    }

    /// Score and total already resolved items.
    pub fn aggregate(&self, items: &[ResolvedItem<'_>]) -> Result<NutritionReport, CoreError> {
        aggregate::aggregate(items, self.store.feature_names(), &self.model)
    }

    /// Full pass over one request.
    pub fn estimate(&self, text: &str) -> Result<Estimate, CoreError> {
        if self.store.is_empty() {
            return Ok(Estimate::NotUnderstood(NotUnderstood::DataUnavailable));
        }
        if text.trim().is_empty() {
            return Err(CoreError::EmptyInput);
        }

        let items = self.extract_and_resolve(text);
        if items.is_empty() {
            return Ok(Estimate::NotUnderstood(NotUnderstood::NoUnderstandableInput));
        }

        Ok(Estimate::Understood(self.aggregate(&items)?))
    }
}
