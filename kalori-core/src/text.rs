//! Input normalization shared by extraction, method detection and the store.

/// Letters folded to their unaccented base after lowercasing.
const FOLDS: &[(char, char)] = &[
    ('ı', 'i'),
    ('ü', 'u'),
    ('ö', 'o'),
    ('ş', 's'),
    ('ç', 'c'),
    ('ğ', 'g'),
];

/// Lowercasing 'İ' leaves this combining dot behind the 'i'.
const COMBINING_DOT_ABOVE: char = '\u{307}';

/// Lowercase `text` and fold the accented letters in [`FOLDS`].
///
/// Purely table-driven; no locale-aware casing is involved, so the result is
/// the same on every platform.
pub fn fold_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| c != COMBINING_DOT_ABOVE)
        .map(|c| {
            FOLDS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|&(_, to)| to)
                .unwrap_or(c)
        })
        .collect()
}
