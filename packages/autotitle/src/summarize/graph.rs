//! Sentence similarity graph and PageRank-style ranking.

use std::collections::BTreeSet;

use tracing::debug;

use super::similarity::set_similarity;
use crate::types::sentence::Sentence;

/// Undirected weighted graph over the sentences of one document.
///
/// Stored as a dense symmetric matrix with a zero diagonal. Rebuilt for
/// every document.
#[derive(Debug, Clone)]
pub struct SentenceGraph {
    weights: Vec<Vec<f64>>,
    out_weight: Vec<f64>,
}

impl SentenceGraph {
    /// Score every distinct sentence pair.
    pub fn build(sentences: &[Sentence]) -> Self {
        let n = sentences.len();
        let sets: Vec<BTreeSet<&str>> = sentences.iter().map(Sentence::token_set).collect();
        let mut weights = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let w = set_similarity(&sets[i], &sets[j]);
                weights[i][j] = w;
                weights[j][i] = w;
            }
        }

        let out_weight = weights.iter().map(|row| row.iter().sum()).collect();
        Self {
            weights,
            out_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Edge weight between two sentences.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i][j]
    }

    /// Sum of a sentence's edge weights.
    pub fn out_weight(&self, i: usize) -> f64 {
        self.out_weight[i]
    }

    /// Number of non-zero undirected edges.
    pub fn edge_count(&self) -> usize {
        let n = self.len();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.weights[i][j] > 0.0)
            .count()
    }
}

/// Scores produced by [`rank`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankScores {
    pub scores: Vec<f64>,
    pub converged: bool,
    pub iterations: usize,
}

/// Run damped ranking over the graph.
///
/// `score(i) = (1-d) + d · Σ_j [ w(i,j) / Σ_k w(j,k) ] · score(j)`, starting
/// from 1.0 everywhere. Each pass reads only the previous pass's scores. A
/// sentence with no edges is a sink: it never appears as a denominator and
/// settles at `1-d`.
pub fn rank(
    graph: &SentenceGraph,
    damping: f64,
    convergence_threshold: f64,
    max_iterations: usize,
) -> RankScores {
    let n = graph.len();
    let mut scores = vec![1.0; n];
    if n == 0 {
        return RankScores {
            scores,
            converged: true,
            iterations: 0,
        };
    }

    let mut next = vec![0.0; n];
    for iteration in 1..=max_iterations {
        let mut max_delta: f64 = 0.0;

        for i in 0..n {
            let mut incoming = 0.0;
            for j in 0..n {
                let w = graph.weight(j, i);
                let denominator = graph.out_weight(j);
                if w == 0.0 || denominator == 0.0 {
                    continue;
                }
                incoming += w / denominator * scores[j];
            }
            next[i] = (1.0 - damping) + damping * incoming;
            max_delta = max_delta.max((next[i] - scores[i]).abs());
        }

        std::mem::swap(&mut scores, &mut next);

        if max_delta < convergence_threshold {
            debug!(iterations = iteration, sentences = n, "Ranking converged");
            return RankScores {
                scores,
                converged: true,
                iterations: iteration,
            };
        }
    }

    debug!(
        iterations = max_iterations,
        sentences = n,
        "Ranking hit iteration cap"
    );
    RankScores {
        scores,
        converged: false,
        iterations: max_iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(texts: &[&str]) -> Vec<Sentence> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Sentence::new(i, i, *t))
            .collect()
    }

    #[test]
    fn test_matrix_is_symmetric_with_zero_diagonal() {
        let graph = SentenceGraph::build(&sentences(&[
            "Cats are mammals.",
            "Dogs are mammals too.",
            "Both are popular pets.",
        ]));
        for i in 0..graph.len() {
            assert_eq!(graph.weight(i, i), 0.0);
            for j in 0..graph.len() {
                assert_eq!(graph.weight(i, j), graph.weight(j, i));
            }
        }
        assert_eq!(graph.edge_count(), 1);
        assert!((graph.weight(0, 1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_disconnected_graph_terminates() {
        let graph = SentenceGraph::build(&sentences(&[
            "Apples grow on trees.",
            "Rivers flow downhill quickly.",
            "Violins need fresh strings.",
        ]));
        assert_eq!(graph.edge_count(), 0);

        let result = rank(&graph, 0.85, 1e-6, 100);
        assert!(result.converged);
        assert!(result.iterations <= 100);
        for score in result.scores {
            assert!((score - 0.15).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hub_sentence_ranks_highest() {
        let graph = SentenceGraph::build(&sentences(&[
            "Solar panels convert sunlight.",
            "Bananas are yellow fruit.",
            "Solar panels and wind turbines produce clean energy.",
            "Wind turbines need steady wind.",
        ]));
        let result = rank(&graph, 0.85, 1e-6, 200);

        assert!(result.scores[2] > result.scores[0]);
        assert!(result.scores[2] > result.scores[3]);
        assert_eq!(result.scores[0], result.scores[3]);
        assert!((result.scores[1] - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_iteration_cap_respected() {
        let graph = SentenceGraph::build(&sentences(&[
            "Solar panels convert sunlight.",
            "Solar panels and wind turbines produce clean energy.",
            "Wind turbines need steady wind.",
        ]));
        let result = rank(&graph, 0.85, 1e-12, 3);
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_empty_graph() {
        let graph = SentenceGraph::build(&[]);
        assert!(graph.is_empty());
        let result = rank(&graph, 0.85, 1e-6, 100);
        assert!(result.scores.is_empty());
        assert_eq!(result.iterations, 0);
    }
}
