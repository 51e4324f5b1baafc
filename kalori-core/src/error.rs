//! Error types for the estimation pipeline.
//!
//! Per-token resolution failures never show up here: those tokens are dropped
//! where they fail. What remains are problems with the reference data itself
//! and failures of the calorie model, which abort the whole request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The input was empty or whitespace only.
    #[error("empty input")]
    EmptyInput,

    /// Reference tables violate an invariant (duplicate names, negative values, ...).
    #[error("invalid reference data: {0}")]
    InvalidReference(String),

    /// The calorie model returned an error for one item.
    #[error("scoring failed for {food}: {source}")]
    Scoring {
        food: String,
        #[source]
        source: anyhow::Error,
    },

    /// The calorie model returned NaN or an infinite value.
    #[error("model returned a non-numeric score ({value}) for {food}")]
    NonFiniteScore { food: String, value: f64 },
}

impl CoreError {
    /// True for the failures that come out of the calorie model.
    pub fn is_scoring_failure(&self) -> bool {
        matches!(self, CoreError::Scoring { .. } | CoreError::NonFiniteScore { .. })
    }
}
