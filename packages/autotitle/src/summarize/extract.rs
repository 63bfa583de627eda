//! Extraction: turn a raw document into prompt context.
//!
//! Pre-filters markup that carries no prose, runs the summarizer, and falls
//! back to the leading characters of the document when ranking yields
//! nothing.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use super::engine::Summarizer;
use crate::error::{Result, TitleError};
use crate::types::summary::{ContextSource, Extraction};

/// Characters kept by the leading-text fallback.
pub const FALLBACK_CHARS: usize = 500;

/// A line made only of embedded images: `![[photo.png]]`,
/// `![alt](path/to/photo.png)`, or several of them in a row.
static IMAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:!\[\[[^\]]*\]\]|!\[[^\]]*\]\([^)]*\))\s*)+$").unwrap()
});

/// Leading YAML front matter.
static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[ \t]*\r?\n(?s:.*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap());

/// Remove front matter and image-only lines.
pub fn prefilter(text: &str) -> String {
    let body = FRONT_MATTER.replace(text, "");
    body.lines()
        .filter(|line| !IMAGE_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether every non-blank line is an image embed.
fn only_images(text: &str) -> bool {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .all(|line| IMAGE_LINE.is_match(line))
}

/// First `max_chars` characters of `text`, at a character boundary.
pub fn leading_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Extract prompt context from a document.
///
/// `name` is only used in the error for an empty document.
pub fn extract_context(summarizer: &Summarizer, name: &str, text: &str) -> Result<Extraction> {
    if text.trim().is_empty() {
        return Err(empty(name));
    }

    let filtered = prefilter(text);
    let summary = summarizer.summarize(&filtered);

    if !summary.is_empty() {
        debug!(
            document = name,
            selected = summary.len(),
            iterations = summary.iterations,
            converged = summary.converged,
            "Extracted summary sentences"
        );
        return Ok(Extraction {
            context: summary.joined(),
            source: ContextSource::Summary {
                sentences: summary.len(),
            },
        });
    }

    let filtered = filtered.trim();
    let context = if !filtered.is_empty() {
        leading_chars(filtered, FALLBACK_CHARS)
    } else if only_images(text) {
        return Err(empty(name));
    } else {
        leading_chars(text.trim(), FALLBACK_CHARS)
    };

    info!(
        document = name,
        chars = context.chars().count(),
        "Summarization found no sentences, using leading text"
    );
    Ok(Extraction {
        context: context.to_string(),
        source: ContextSource::Fallback,
    })
}

fn empty(name: &str) -> TitleError {
    TitleError::EmptyDocument {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::SummarizerConfig;

    fn summarizer(k: usize) -> Summarizer {
        Summarizer::new(SummarizerConfig::new().with_sentence_count(k)).unwrap()
    }

    #[test]
    fn test_whitespace_only_is_empty_document() {
        let err = extract_context(&summarizer(5), "Untitled", "  \n\t \n").unwrap_err();
        assert!(matches!(err, TitleError::EmptyDocument { .. }));
        assert!(extract_context(&summarizer(5), "Untitled", "").is_err());
    }

    #[test]
    fn test_image_only_document_is_empty() {
        let err = extract_context(&summarizer(5), "Untitled", "![[image.png]]").unwrap_err();
        assert!(matches!(err, TitleError::EmptyDocument { .. }));

        let err = extract_context(&summarizer(5), "Untitled", "![[a.png]]\n\n![b](img/b.jpg)\n")
            .unwrap_err();
        assert!(matches!(err, TitleError::EmptyDocument { .. }));
    }

    #[test]
    fn test_line_of_several_embeds_is_markup() {
        let err = extract_context(&summarizer(5), "Untitled", "![[a.png]] ![[b.png]]").unwrap_err();
        assert!(matches!(err, TitleError::EmptyDocument { .. }));

        let text = "![[a.png]] ![b](b.jpg)\nThe photos show the new garden beds.";
        assert_eq!(prefilter(text), "The photos show the new garden beds.");
    }

    #[test]
    fn test_summary_path() {
        let text = "Cats are mammals. Dogs are mammals too. Both are popular pets. Birds can fly.";
        let extraction = extract_context(&summarizer(2), "Untitled", text).unwrap();
        assert_eq!(extraction.context, "Cats are mammals. Dogs are mammals too.");
        assert_eq!(extraction.source, ContextSource::Summary { sentences: 2 });
    }

    #[test]
    fn test_images_removed_before_parsing() {
        let text = "![[diagram.png]]\nThe diagram shows our network layout.\n![[other.png]]";
        let extraction = extract_context(&summarizer(5), "Untitled", text).unwrap();
        assert_eq!(extraction.context, "The diagram shows our network layout.");
    }

    #[test]
    fn test_inline_image_line_with_text_is_kept() {
        let filtered = prefilter("See ![[chart.png]] for the quarterly numbers.");
        assert_eq!(filtered, "See ![[chart.png]] for the quarterly numbers.");
    }

    #[test]
    fn test_short_fragments_fall_back_to_leading_text() {
        let text = "Milk. Eggs. Bread!";
        let extraction = extract_context(&summarizer(5), "Untitled", text).unwrap();
        assert!(extraction.is_fallback());
        assert_eq!(extraction.context, "Milk. Eggs. Bread!");
    }

    #[test]
    fn test_fallback_truncates_to_500_chars() {
        let text = "ab ".repeat(400);
        let text = text.replace(' ', ".\n");
        let extraction = extract_context(&summarizer(5), "Untitled", &text).unwrap();
        assert!(extraction.is_fallback());
        assert_eq!(extraction.context.chars().count(), FALLBACK_CHARS);
    }

    #[test]
    fn test_front_matter_only_falls_back_to_original() {
        let text = "---\ntags: [inbox]\n---\n";
        let extraction = extract_context(&summarizer(5), "Untitled", text).unwrap();
        assert!(extraction.is_fallback());
        assert_eq!(extraction.context, "---\ntags: [inbox]\n---");
    }

    #[test]
    fn test_front_matter_is_not_prompt_context() {
        let text = "---\ntitle: draft\n---\nOur team shipped the release today.";
        let extraction = extract_context(&summarizer(5), "Untitled", text).unwrap();
        assert_eq!(extraction.context, "Our team shipped the release today.");
    }

    #[test]
    fn test_leading_chars_respects_char_boundaries() {
        assert_eq!(leading_chars("héllo wörld", 4), "héll");
        assert_eq!(leading_chars("short", 500), "short");
    }
}
