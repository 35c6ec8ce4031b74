//! Dense sentence-similarity matrix

use serde::Serialize;

/// Cosine similarity of two vectors.
///
/// Zero-magnitude vectors have similarity 0 with everything. Non-finite
/// results are also reported as 0, and rounding drift is clamped to `[-1, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    cosine_with_norms(a, b, l2_norm(a), l2_norm(b))
}

pub(crate) fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

pub(crate) fn cosine_with_norms(a: &[f32], b: &[f32], norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Symmetric n×n matrix of pairwise similarities with a zero diagonal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    n: usize,
    /// Row-major values
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// An n×n matrix of zeros
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Assemble a matrix from computed rows.
    ///
    /// Callers guarantee `rows.len() == n` and every row has length n.
    pub(crate) fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n = rows.len();
        let values = rows.into_iter().flatten().collect();
        Self { n, values }
    }

    /// Number of sentences (rows)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between sentences `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Row `i` of the matrix
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Sum of row `i`
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).iter().sum()
    }

    /// Number of unordered sentence pairs with positive similarity
    pub fn positive_pairs(&self) -> usize {
        (0..self.n)
            .map(|i| ((i + 1)..self.n).filter(|&j| self.get(i, j) > 0.0).count())
            .sum()
    }

    /// True when no pair of sentences is positively similar
    pub fn is_degenerate(&self) -> bool {
        self.values.iter().all(|&v| v <= 0.0)
    }

    /// Check symmetry within a tolerance
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.n).all(|i| {
            (i..self.n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }
}
