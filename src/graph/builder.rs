//! Similarity graph construction
//!
//! Turns sentence embeddings into a [`SimilarityMatrix`]. Norms are computed
//! once per sentence; rows are filled sequentially for small documents and
//! with rayon for large ones.

use rayon::prelude::*;

use super::similarity::{cosine_with_norms, l2_norm, SimilarityMatrix};
use crate::embedding::Embedding;
use crate::errors::{Result, SummaryError};

/// Default sentence count at which rows are computed in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Builds the pairwise cosine-similarity graph over sentences
#[derive(Debug, Clone)]
pub struct SimilarityGraphBuilder {
    parallel_threshold: usize,
}

impl Default for SimilarityGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityGraphBuilder {
    pub fn new() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the sentence count at which rows are computed in parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Build the similarity matrix.
    ///
    /// Fails if the embeddings disagree on dimension.
    pub fn build(&self, embeddings: &[Embedding]) -> Result<SimilarityMatrix> {
        let n = embeddings.len();
        if n == 0 {
            return Ok(SimilarityMatrix::default());
        }

        let dim = embeddings[0].len();
        if let Some((index, e)) = embeddings
            .iter()
            .enumerate()
            .find(|(_, e)| e.len() != dim)
        {
            return Err(SummaryError::DimensionMismatch {
                index,
                expected: dim,
                actual: e.len(),
            });
        }

        let norms: Vec<f64> = embeddings.iter().map(|e| l2_norm(e)).collect();

        let row = |i: usize| -> Vec<f64> {
            (0..n)
                .map(|j| {
                    if i == j {
                        0.0
                    } else {
                        cosine_with_norms(&embeddings[i], &embeddings[j], norms[i], norms[j])
                    }
                })
                .collect()
        };

        let rows: Vec<Vec<f64>> = if n < self.parallel_threshold {
            (0..n).map(row).collect()
        } else {
            (0..n).into_par_iter().map(row).collect()
        };

        Ok(SimilarityMatrix::from_rows(rows))
    }
}
