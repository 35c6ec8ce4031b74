//! PageRank centrality over the sentence-similarity graph

pub mod standard;

use std::cmp::Ordering;

use serde::Serialize;

/// Result of a PageRank computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
    /// Whether the graph had no edges and scores fell back to uniform
    pub degenerate: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
            degenerate: false,
        }
    }

    /// Uniform scores for a graph without edges
    pub fn uniform(n: usize) -> Self {
        let scores = if n == 0 {
            Vec::new()
        } else {
            vec![1.0 / n as f64; n]
        };
        Self {
            scores,
            iterations: 0,
            delta: 0.0,
            converged: true,
            degenerate: n > 1,
        }
    }

    /// Node indices ordered by score descending, ties by index ascending
    pub fn ranking(&self) -> Vec<usize> {
        rank_order(&self.scores)
    }

    /// Get top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        self.ranking()
            .into_iter()
            .take(n)
            .map(|i| (i as u32, self.scores[i]))
            .collect()
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}

/// Indices of `scores` sorted by score descending, then index ascending.
///
/// Uses `total_cmp` so the order is total even if a score is NaN.
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| compare_ranked(scores, a, b));
    order
}

fn compare_ranked(scores: &[f64], a: usize, b: usize) -> Ordering {
    scores[b].total_cmp(&scores[a]).then(a.cmp(&b))
}
