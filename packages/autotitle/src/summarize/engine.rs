//! Summarization engine: parse, rank, select.

use tracing::debug;

use super::graph::{rank, SentenceGraph};
use super::parser::parse_sentences;
use crate::error::Result;
use crate::types::{
    config::{OutputOrder, SelectionStrategy, SummarizerConfig},
    sentence::Sentence,
    summary::{RankedSentence, Summary},
};

/// Selects the top-K sentences of a document.
///
/// Deterministic: the same text and config always give the same selection
/// in the same order.
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    config: SummarizerConfig,
}

impl Summarizer {
    /// Create a summarizer, rejecting configs the engine cannot run with.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Parse and summarize raw text.
    pub fn summarize(&self, text: &str) -> Summary {
        self.summarize_sentences(parse_sentences(text))
    }

    /// Summarize already-parsed sentences.
    pub fn summarize_sentences(&self, sentences: Vec<Sentence>) -> Summary {
        if sentences.is_empty() {
            return Summary {
                converged: true,
                ..Default::default()
            };
        }

        let (scores, converged, iterations) = match self.config.strategy {
            SelectionStrategy::TextRank => {
                let graph = SentenceGraph::build(&sentences);
                debug!(
                    sentences = graph.len(),
                    edges = graph.edge_count(),
                    "Built sentence graph"
                );
                let ranked = rank(
                    &graph,
                    self.config.damping,
                    self.config.convergence_threshold,
                    self.config.max_iterations,
                );
                (ranked.scores, ranked.converged, ranked.iterations)
            }
            // Earlier sentences score higher, so selection keeps the lead.
            SelectionStrategy::LeadSentences => {
                let n = sentences.len();
                let scores = (0..n).map(|i| (n - i) as f64).collect();
                (scores, true, 0)
            }
        };

        let selected = select_top(
            &sentences,
            &scores,
            self.config.sentence_count,
            self.config.order,
        );

        Summary {
            sentences: selected
                .into_iter()
                .map(|i| RankedSentence {
                    sentence: sentences[i].clone(),
                    score: scores[i],
                })
                .collect(),
            scores,
            converged,
            iterations,
        }
    }
}

/// Pick the indices of the `k` best sentences.
///
/// Score descending with ties broken by position ascending, then re-sorted
/// by position when the order is [`OutputOrder::ByOccurrence`].
pub fn select_top(
    sentences: &[Sentence],
    scores: &[f64],
    k: usize,
    order: OutputOrder,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..sentences.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .total_cmp(&scores[a])
            .then(sentences[a].position.cmp(&sentences[b].position))
    });
    indices.truncate(k);

    if order == OutputOrder::ByOccurrence {
        indices.sort_by_key(|&i| sentences[i].position);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: &str = "Cats are mammals. Dogs are mammals too. Both are popular pets. Birds can fly.";
    const ENERGY: &str = "Solar panels convert sunlight. Bananas are yellow fruit. \
        Solar panels and wind turbines produce clean energy. Wind turbines need steady wind.";

    fn summarizer(k: usize, order: OutputOrder) -> Summarizer {
        Summarizer::new(
            SummarizerConfig::new()
                .with_sentence_count(k)
                .with_order(order),
        )
        .unwrap()
    }

    #[test]
    fn test_pets_scenario_occurrence_order() {
        let summary = summarizer(2, OutputOrder::ByOccurrence).summarize(PETS);
        assert_eq!(summary.positions(), vec![0, 1]);
        assert_eq!(summary.joined(), "Cats are mammals. Dogs are mammals too.");
        assert!(summary.converged);
    }

    #[test]
    fn test_rank_order_vs_occurrence_order() {
        let by_rank = summarizer(2, OutputOrder::ByRank).summarize(ENERGY);
        assert_eq!(by_rank.positions(), vec![2, 0]);

        let by_occurrence = summarizer(2, OutputOrder::ByOccurrence).summarize(ENERGY);
        assert_eq!(by_occurrence.positions(), vec![0, 2]);
    }

    #[test]
    fn test_fewer_sentences_than_k_returns_all() {
        let summary = summarizer(8, OutputOrder::ByOccurrence).summarize(PETS);
        assert_eq!(summary.len(), 4);
        assert_eq!(summary.positions(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_deterministic() {
        let s = summarizer(2, OutputOrder::ByRank);
        let first = s.summarize(ENERGY);
        for _ in 0..5 {
            let again = s.summarize(ENERGY);
            assert_eq!(again.positions(), first.positions());
            assert_eq!(again.scores, first.scores);
        }
    }

    #[test]
    fn test_lead_sentences_strategy() {
        let s = Summarizer::new(
            SummarizerConfig::new()
                .with_sentence_count(2)
                .with_order(OutputOrder::ByRank)
                .with_strategy(SelectionStrategy::LeadSentences),
        )
        .unwrap();
        let summary = s.summarize(ENERGY);
        assert_eq!(summary.positions(), vec![0, 1]);
        assert_eq!(summary.iterations, 0);
    }

    #[test]
    fn test_no_qualifying_sentences() {
        let summary = summarizer(3, OutputOrder::ByOccurrence).summarize("Hi. Ok. Yes.");
        assert!(summary.is_empty());
        assert!(summary.scores.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Summarizer::new(SummarizerConfig::new().with_sentence_count(0)).is_err());
    }

    #[test]
    fn test_tie_break_by_position() {
        let sentences: Vec<Sentence> = ["Alpha beta gamma.", "Delta epsilon zeta.", "Eta theta iota."]
            .iter()
            .enumerate()
            .map(|(i, t)| Sentence::new(i, i, *t))
            .collect();
        let scores = vec![0.5, 0.5, 0.5];
        assert_eq!(select_top(&sentences, &scores, 2, OutputOrder::ByRank), vec![0, 1]);
    }
}
