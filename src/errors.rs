//! Error types for the summarization pipeline
//!
//! Only genuine failures live here. Conditions the pipeline recovers from
//! (empty input, degenerate graphs, unconverged PageRank) are reported as
//! [`SummaryDiagnostic`](crate::pipeline::artifacts::SummaryDiagnostic)s on
//! the output instead.

use std::time::Duration;

use thiserror::Error;

use crate::pipeline::errors::PipelineSpecError;

/// Failure reported by an [`EmbeddingProvider`](crate::embedding::EmbeddingProvider).
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The model could not be loaded or initialized.
    #[error("embedding model `{model}` could not be loaded: {reason}")]
    ModelLoad { model: String, reason: String },

    /// The embedding service did not answer in time.
    #[error("embedding request timed out after {0:?}")]
    Timeout(Duration),

    /// Any other backend failure.
    #[error("embedding backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that abort a summarization request.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The embedding collaborator failed; its error is passed through unchanged.
    #[error(transparent)]
    EmbeddingUnavailable(#[from] EmbeddingError),

    /// The provider returned a different number of vectors than sentences.
    #[error("embedding provider returned {actual} vectors for {expected} sentences")]
    EmbeddingCountMismatch { expected: usize, actual: usize },

    /// Embedding vectors disagree on dimensionality.
    #[error("embedding {index} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// The document exceeds the configured sentence limit.
    #[error("document has {sentences} sentences, limit is {limit}")]
    InputTooLarge { sentences: usize, limit: usize },

    /// No stopword list exists for the requested language.
    #[error("unsupported stopword language: {0}")]
    UnsupportedLanguage(String),

    /// The summarizer spec failed validation.
    #[error("invalid summarizer spec ({} error(s)): {}", .0.len(), first_message(.0))]
    InvalidSpec(Vec<PipelineSpecError>),

    /// The summarizer spec is not valid JSON for the schema.
    #[error("failed to parse summarizer spec: {0}")]
    SpecParse(#[from] serde_json::Error),
}

fn first_message(errors: &[PipelineSpecError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

/// Result type alias for summarization operations
pub type Result<T> = std::result::Result<T, SummaryError>;
