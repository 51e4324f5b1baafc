//! Quantity + unit + word extraction from normalized meal text.
//!
//! Grammar per match:
//!   <digits> [ws] [<word> ws] <word>
//!
//! With two words the first is only tentatively a unit; the resolver may
//! re-read it as the food (see [`crate::resolve`]). Words are letter runs, so
//! "3 yumurta 2 ekmek" yields two matches instead of swallowing the "2".

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // 2 adet yumurta, 100gr tavuk, 3 elma
    Regex::new(r"(?P<qty>[0-9]+)\s*(?:(?P<unit>\p{L}+)\s+)?(?P<word>\p{L}+)").ok()
});

/// One grammar match, before any lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedToken {
    pub quantity: u64,
    pub unit_token: Option<String>,
    pub word_token: String,
}

impl ExtractedToken {
    pub fn new(quantity: u64, unit_token: Option<&str>, word_token: impl Into<String>) -> Self {
        Self {
            quantity,
            unit_token: unit_token.map(str::to_string),
            word_token: word_token.into(),
        }
    }
}

/// Scan already-folded `text` left to right; matches never overlap.
///
/// Matches whose quantity is zero or does not fit a `u64` are skipped.
pub fn extract_tokens(text: &str) -> Vec<ExtractedToken> {
    let Some(pattern) = TOKEN_PATTERN.as_ref() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for caps in pattern.captures_iter(text) {
        let quantity = match caps["qty"].parse::<u64>() {
            Ok(q) if q > 0 => q,
            _ => {
                tracing::debug!(qty = &caps["qty"], "skipping match with unusable quantity");
                continue;
            }
        };

        out.push(ExtractedToken {
            quantity,
            unit_token: caps.name("unit").map(|m| m.as_str().to_string()),
            word_token: caps["word"].to_string(),
        });
    }

    out
}
