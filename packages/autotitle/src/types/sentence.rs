//! Sentence - the atomic ranking unit.

use std::collections::BTreeSet;

use crate::summarize::normalize_tokens;

/// A parsed sentence from one document.
///
/// Immutable once parsed. Only lives for the duration of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Stable identifier: index among the qualifying sentences
    pub id: usize,

    /// Position among all non-empty candidates, used for occurrence ordering
    pub position: usize,

    /// The trimmed source text, punctuation included
    pub text: String,

    /// Lowercased, punctuation-stripped, stopword-filtered tokens
    pub tokens: Vec<String>,
}

impl Sentence {
    /// Create a sentence, normalizing its tokens.
    pub fn new(id: usize, position: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = normalize_tokens(&text);
        Self {
            id,
            position,
            text,
            tokens,
        }
    }

    /// Unique normalized tokens.
    pub fn token_set(&self) -> BTreeSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    /// Whether the text ends in `.`, `?` or `!`, ignoring closing quotes.
    pub fn has_terminal_punctuation(&self) -> bool {
        self.text
            .trim_end_matches(|c: char| CLOSING_MARKS.contains(&c))
            .ends_with(['.', '?', '!'])
    }
}

/// Characters allowed between terminal punctuation and the next sentence.
pub(crate) const CLOSING_MARKS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']'];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_normalized() {
        let sentence = Sentence::new(0, 0, "The Cats are sleeping!");
        assert_eq!(sentence.tokens, vec!["cats", "sleeping"]);
    }

    #[test]
    fn test_terminal_punctuation_through_quotes() {
        assert!(Sentence::new(0, 0, "He said \"stop here.\"").has_terminal_punctuation());
        assert!(Sentence::new(0, 0, "Is it done?").has_terminal_punctuation());
        assert!(!Sentence::new(0, 0, "Shopping list for today").has_terminal_punctuation());
    }

    #[test]
    fn test_token_set_dedupes() {
        let sentence = Sentence::new(0, 0, "Rust rust RUST compiler");
        assert_eq!(sentence.token_set().len(), 2);
    }
}
