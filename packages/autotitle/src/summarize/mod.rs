//! Extractive summarization - the core of the library.
//!
//! The pipeline runs:
//! - Pre-filtering (front matter, image-only lines)
//! - Sentence parsing with an abbreviation guard
//! - Sentence similarity graph (Sørensen–Dice token overlap)
//! - Damped ranking to convergence
//! - Top-K selection under an output order
//! - Leading-text fallback when nothing qualifies

pub mod engine;
pub mod extract;
pub mod graph;
pub mod parser;
pub mod similarity;
pub mod stopwords;

pub use engine::{select_top, Summarizer};
pub use extract::{extract_context, leading_chars, prefilter, FALLBACK_CHARS};
pub use graph::{rank, RankScores, SentenceGraph};
pub use parser::{parse_sentences, word_count, MIN_WORD_TOKENS};
pub use similarity::{normalize_tokens, similarity};
