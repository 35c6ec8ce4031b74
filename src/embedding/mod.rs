//! Sentence embeddings
//!
//! The pipeline only depends on [`EmbeddingProvider`]: one vector per input
//! sentence, in the same order. A deterministic term-frequency embedder is
//! bundled so the crate works without an external model.

pub mod cache;
pub mod term_frequency;

use std::sync::Arc;

use crate::errors::EmbeddingError;

/// A dense sentence vector
pub type Embedding = Vec<f32>;

/// Maps sentences to fixed-dimension vectors.
///
/// # Contract
///
/// - Returns exactly one vector per input sentence, in input order.
/// - All vectors share one dimension.
/// - Deterministic for a fixed model version.
/// - Failures are reported as [`EmbeddingError`]; implementations must not
///   substitute zero vectors for sentences they could not embed.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of sentences
    fn embed(&self, sentences: &[&str]) -> Result<Vec<Embedding>, EmbeddingError>;

    /// Identifier of the model (and version) producing the vectors
    fn model_id(&self) -> &str;
}

impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for &T {
    fn embed(&self, sentences: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        (**self).embed(sentences)
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for Box<T> {
    fn embed(&self, sentences: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        (**self).embed(sentences)
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<T> {
    fn embed(&self, sentences: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        (**self).embed(sentences)
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
