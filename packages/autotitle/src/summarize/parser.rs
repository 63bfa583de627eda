//! Sentence parser.
//!
//! Splits raw text on `.`, `?` and `!`, guarding known abbreviations, and
//! drops fragments too short to carry signal.

use regex::Regex;
use std::sync::LazyLock;

use super::stopwords::is_stopword;
use crate::types::sentence::{Sentence, CLOSING_MARKS};

/// Sentences with fewer words than this are dropped.
pub const MIN_WORD_TOKENS: usize = 3;

/// Lowercased words (without their final period) that never end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "fig", "approx", "cf", "dept", "est", "mt", "al",
];

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

/// Parse text into qualifying sentences.
///
/// Positions count every non-empty candidate, including ones dropped for
/// being short, so occurrence order reflects the source document. Ids are
/// dense over the returned sentences.
pub fn parse_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut position = 0;

    for paragraph in PARAGRAPH_BREAK.split(text) {
        for candidate in split_paragraph(paragraph) {
            let candidate = candidate.trim();
            if candidate.is_empty() {
                continue;
            }
            let this_position = position;
            position += 1;

            if word_count(candidate) < MIN_WORD_TOKENS {
                continue;
            }
            sentences.push(Sentence::new(sentences.len(), this_position, candidate));
        }
    }

    sentences
}

/// Count whitespace-separated words that contain a letter or digit.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .count()
}

/// Split one paragraph at sentence boundaries.
fn split_paragraph(paragraph: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '?' | '!') {
            continue;
        }

        // Swallow runs like "?!" or "..." and any closing quotes after them.
        let mut end = idx + c.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if matches!(next, '.' | '?' | '!') || CLOSING_MARKS.contains(&next) {
                end = next_idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let at_boundary = match chars.peek() {
            None => true,
            Some(&(_, next)) => next.is_whitespace(),
        };
        if !at_boundary {
            continue;
        }

        if c == '.'
            && (ends_with_abbreviation(&paragraph[start..idx])
                || is_initial(&paragraph[start..idx], &paragraph[end..])
                || is_numbering(&paragraph[start..idx], &paragraph[end..]))
        {
            continue;
        }

        pieces.push(&paragraph[start..end]);
        start = end;
    }

    if start < paragraph.len() {
        pieces.push(&paragraph[start..]);
    }
    pieces
}

/// Last word before a period, without leading punctuation.
fn last_word(before_period: &str) -> &str {
    before_period
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
}

/// Check whether the word right before a period is a known abbreviation.
fn ends_with_abbreviation(before_period: &str) -> bool {
    let word = last_word(before_period);
    !word.is_empty() && ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

/// "J. R. Tolkien": a capital letter is an initial when another initial or
/// a capitalised name follows. "option B. The" still splits.
fn is_initial(before_period: &str, after: &str) -> bool {
    let mut letters = last_word(before_period).chars();
    let (Some(letter), None) = (letters.next(), letters.next()) else {
        return false;
    };
    if !letter.is_uppercase() {
        return false;
    }

    let next = after
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if !next.starts_with(char::is_uppercase) {
        return false;
    }
    let next = next
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    next.chars().count() == 1 || !is_stopword(&next)
}

/// "No. 5": only an abbreviation when a number follows.
fn is_numbering(before_period: &str, after: &str) -> bool {
    let word = before_period.rsplit(char::is_whitespace).next().unwrap_or("");
    word.eq_ignore_ascii_case("no")
        && after
            .trim_start()
            .starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        parse_sentences(text).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_splits_on_terminal_punctuation() {
        assert_eq!(
            texts("Cats are mammals. Dogs are mammals too! Do birds fly far?"),
            vec!["Cats are mammals.", "Dogs are mammals too!", "Do birds fly far?"]
        );
    }

    #[test]
    fn test_abbreviation_guard() {
        assert_eq!(
            texts("Mr. Smith met Dr. Jones today. They discussed fruit, e.g. apples and pears."),
            vec![
                "Mr. Smith met Dr. Jones today.",
                "They discussed fruit, e.g. apples and pears."
            ]
        );
    }

    #[test]
    fn test_numbering_guard() {
        assert_eq!(
            texts("Invoice No. 42 is overdue now. The answer was simply no. We moved on quickly."),
            vec![
                "Invoice No. 42 is overdue now.",
                "The answer was simply no.",
                "We moved on quickly."
            ]
        );
    }

    #[test]
    fn test_initials_do_not_split() {
        assert_eq!(
            texts("The author J. R. Tolkien wrote many books. Readers still love them."),
            vec![
                "The author J. R. Tolkien wrote many books.",
                "Readers still love them."
            ]
        );
    }

    #[test]
    fn test_single_letter_before_sentence_start_splits() {
        assert_eq!(
            texts("We finally chose option B. The whole team agreed quickly."),
            vec!["We finally chose option B.", "The whole team agreed quickly."]
        );
        assert_eq!(
            texts("Ask J. Smith about the new budget. She approved it yesterday."),
            vec!["Ask J. Smith about the new budget.", "She approved it yesterday."]
        );
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        assert_eq!(
            texts("She said \"we should leave now.\" Then everyone left the room."),
            vec![
                "She said \"we should leave now.\"",
                "Then everyone left the room."
            ]
        );
    }

    #[test]
    fn test_decimals_and_urls_do_not_split() {
        assert_eq!(
            texts("Pi is roughly 3.14 in value. See example.com for more details."),
            vec!["Pi is roughly 3.14 in value.", "See example.com for more details."]
        );
    }

    #[test]
    fn test_paragraph_break_ends_sentence() {
        assert_eq!(
            texts("Weekly grocery shopping list\n\nBuy milk and eggs today."),
            vec!["Weekly grocery shopping list", "Buy milk and eggs today."]
        );
    }

    #[test]
    fn test_short_fragments_dropped_but_positions_kept() {
        let sentences = parse_sentences("Hi there. Cats are mammals. Ok. Both are popular pets.");
        let summary: Vec<(usize, usize)> = sentences.iter().map(|s| (s.id, s.position)).collect();
        assert_eq!(summary, vec![(0, 1), (1, 3)]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(parse_sentences("").is_empty());
        assert!(parse_sentences("   \n\n  ").is_empty());
        assert!(parse_sentences("...").is_empty());
    }

    #[test]
    fn test_trailing_text_without_punctuation() {
        assert_eq!(
            texts("First sentence is here. And a trailing clause without end"),
            vec!["First sentence is here.", "And a trailing clause without end"]
        );
    }

    #[test]
    fn test_word_count_ignores_symbols() {
        assert_eq!(word_count("a - b"), 2);
        assert_eq!(word_count("Birds can fly."), 3);
    }
}
