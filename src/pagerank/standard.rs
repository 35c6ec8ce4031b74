//! Standard PageRank algorithm
//!
//! Power iteration over the weighted similarity graph. A node passes its
//! damped score to its neighbors in proportion to edge weight over its row
//! sum. Isolated nodes keep only the teleport term; their mass is not
//! redistributed.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;
use crate::graph::similarity::SimilarityMatrix;
use crate::types::SummaryConfig;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 change between iterations
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, iteration cap and threshold from a config
    pub fn from_config(config: &SummaryConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.convergence_threshold,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Rank the sentences of a similarity matrix
    pub fn rank(&self, matrix: &SimilarityMatrix) -> PageRankResult {
        self.run(&CsrGraph::from_similarity(matrix))
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        match n {
            0 => return PageRankResult::new(vec![], 0, 0.0, true),
            1 => return PageRankResult::new(vec![1.0], 0, 0.0, true),
            _ => {}
        }

        if graph.num_edges() == 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(nodes = n, "similarity graph has no edges, using uniform scores");
            return PageRankResult::uniform(n);
        }

        // Initialize scores uniformly
        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            new_scores.fill(teleport);

            // Propagate scores through edges
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        let contribution = self.damping * node_score * weight / total_weight;
                        new_scores[neighbor as usize] += contribution;
                    }
                }
            }

            // Calculate convergence delta (L1 norm)
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Isolated nodes leak mass, so rescale to a distribution
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        let converged = delta <= self.threshold;
        if !converged {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                iterations,
                delta,
                threshold = self.threshold,
                "pagerank hit the iteration cap before converging"
            );
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}
