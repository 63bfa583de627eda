//! Summary types - ranked sentences and the extracted prompt context.

use serde::Serialize;

use super::sentence::Sentence;

/// A selected sentence with its final rank score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSentence {
    pub sentence: Sentence,
    pub score: f64,
}

/// Result of running the summarization engine on one document.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Selected sentences, already in the configured output order
    pub sentences: Vec<RankedSentence>,

    /// Final score of every qualifying sentence, indexed by sentence id
    pub scores: Vec<f64>,

    /// Whether ranking stopped below the convergence threshold
    pub converged: bool,

    /// Number of ranking passes run
    pub iterations: usize,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Positions of the selected sentences, in output order.
    pub fn positions(&self) -> Vec<usize> {
        self.sentences.iter().map(|r| r.sentence.position).collect()
    }

    /// Join the selection into one string.
    ///
    /// Sentences are separated by a single space; a sentence that ended at
    /// a paragraph break gets a period so the joined text still reads as
    /// prose.
    pub fn joined(&self) -> String {
        let mut out = String::new();
        for ranked in &self.sentences {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&ranked.sentence.text);
            if !ranked.sentence.has_terminal_punctuation() {
                out.push('.');
            }
        }
        out
    }
}

/// Where the prompt context came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ContextSource {
    /// Ranked sentence selection
    Summary { sentences: usize },

    /// Leading characters of the document, used when ranking found nothing
    Fallback,
}

/// Context extracted from one document, ready for prompting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub context: String,
    pub source: ContextSource,
}

impl Extraction {
    pub fn is_fallback(&self) -> bool {
        self.source == ContextSource::Fallback
    }
}
