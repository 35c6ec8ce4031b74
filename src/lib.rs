//! # textrank_digest
//!
//! Extractive summarization of free-text documents with sentence-level
//! TextRank.
//!
//! A document is split into sentences, each sentence is embedded through an
//! [`EmbeddingProvider`], and PageRank over the cosine-similarity graph picks
//! the most central sentences. The summary keeps those sentences in their
//! original reading order.
//!
//! ```
//! let text = "Banks issue circulars. Circulars reach every bank. The weather was mild.";
//! let summary = textrank_digest::summarize(text, 1).unwrap();
//! assert!(!summary.is_empty());
//! ```

pub mod embedding;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

// Re-export commonly used types
pub use errors::{EmbeddingError, Result, SummaryError};
pub use types::{Document, DocumentId, NodeRecord, Sentence, SummaryConfig};

// Re-export main functionality
pub use embedding::{
    cache::EmbeddingCache, term_frequency::TermFrequencyEmbedder, Embedding, EmbeddingProvider,
};
pub use graph::{builder::SimilarityGraphBuilder, csr::CsrGraph, similarity::SimilarityMatrix};
pub use nlp::{segmenter::SentenceSegmenter, stopwords::StopwordFilter};
pub use pagerank::{standard::StandardPageRank, PageRankResult};
pub use pipeline::{
    artifacts::{SummaryDiagnostic, SummaryOutput},
    observer::{NoopObserver, PipelineObserver, StageTimingObserver},
    runner::{DefaultSummarizer, Summarizer},
    spec::SummarySpec,
};
pub use summarizer::selector::{select_summary, SentenceSelector, Summary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize `raw_text` to at most `top_n` sentences with the built-in
/// term-frequency embedder and default settings.
pub fn summarize(raw_text: &str, top_n: usize) -> Result<String> {
    DefaultSummarizer::default().summarize(raw_text, top_n)
}
