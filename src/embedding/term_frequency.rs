//! Hashed term-frequency embeddings
//!
//! Each sentence becomes a bag of lowercase, non-stopword terms, hashed into
//! a fixed number of buckets. Two sentences sharing vocabulary get a positive
//! cosine similarity; identical sentences get identical vectors.

use std::hash::Hasher;

use rustc_hash::{FxHashMap, FxHasher};

use super::{Embedding, EmbeddingProvider};
use crate::errors::EmbeddingError;
use crate::nlp::stopwords::StopwordFilter;

/// Default number of hash buckets
pub const DEFAULT_DIMENSIONS: usize = 512;

const MODEL_ID: &str = "term-frequency-fx-v1";

/// Deterministic bag-of-words embedder
#[derive(Debug, Clone)]
pub struct TermFrequencyEmbedder {
    dimensions: usize,
    stopwords: StopwordFilter,
    /// Dampen repeated terms with `1 + ln(tf)`
    sublinear_tf: bool,
}

impl Default for TermFrequencyEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl TermFrequencyEmbedder {
    /// Create an embedder with English stopwords
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            stopwords: StopwordFilter::english(),
            sublinear_tf: true,
        }
    }

    /// Replace the stopword filter
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Use raw term counts instead of `1 + ln(tf)`
    pub fn with_sublinear_tf(mut self, sublinear: bool) -> Self {
        self.sublinear_tf = sublinear;
        self
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Embed a single sentence
    pub fn embed_one(&self, sentence: &str) -> Embedding {
        let mut counts: FxHashMap<String, u32> = FxHashMap::default();
        for term in terms(sentence) {
            if !self.stopwords.is_stopword(&term) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let mut vector = vec![0.0f32; self.dimensions];
        for (term, tf) in counts {
            let weight = if self.sublinear_tf {
                1.0 + (tf as f32).ln()
            } else {
                tf as f32
            };
            vector[self.bucket(&term)] += weight;
        }
        vector
    }

    fn bucket(&self, term: &str) -> usize {
        let mut hasher = FxHasher::default();
        hasher.write(term.as_bytes());
        (hasher.finish() % self.dimensions as u64) as usize
    }
}

impl EmbeddingProvider for TermFrequencyEmbedder {
    fn embed(&self, sentences: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        Ok(sentences.iter().map(|s| self.embed_one(s)).collect())
    }

    fn model_id(&self) -> &str {
        MODEL_ID
    }
}

/// Lowercase alphanumeric terms of a sentence
fn terms(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
