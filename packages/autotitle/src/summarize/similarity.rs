//! Token normalization and sentence similarity.

use std::collections::BTreeSet;

use super::stopwords::is_stopword;

/// Lowercase, strip punctuation and drop stopwords.
///
/// Any non-alphanumeric character separates tokens, except apostrophes,
/// which are removed so `don't` becomes `dont`.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || is_apostrophe(c)))
        .map(|raw| {
            raw.chars()
                .filter(|c| !is_apostrophe(*c))
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .collect()
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Sørensen–Dice overlap of two normalized token sequences.
///
/// `2·|A∩B| / (|A|+|B|)` over unique tokens. Returns 0 when either side
/// is empty. Symmetric and stateless.
pub fn similarity<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let a: BTreeSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let b: BTreeSet<&str> = b.iter().map(AsRef::as_ref).collect();
    set_similarity(&a, &b)
}

/// [`similarity`] on prebuilt token sets.
pub(crate) fn set_similarity(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    (2 * shared) as f64 / (a.len() + b.len()) as f64
}
