//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`Summarizer`] owns one instance of every stage and an
//! [`EmbeddingProvider`]. Calling [`Summarizer::run`] executes the stages in
//! order (segment, embed, graph, rank, select), notifying a
//! [`PipelineObserver`] at each boundary.
//!
//! Every stage is a pure function of its input, so one summarizer can serve
//! many documents concurrently; see [`Summarizer::summarize_batch`].

use rayon::prelude::*;

use crate::embedding::cache::{CachedEmbeddings, EmbeddingCache};
use crate::embedding::term_frequency::TermFrequencyEmbedder;
use crate::embedding::{Embedding, EmbeddingProvider};
use crate::errors::{Result, SummaryError};
use crate::graph::builder::SimilarityGraphBuilder;
use crate::nlp::segmenter::SentenceSegmenter;
use crate::pagerank::standard::StandardPageRank;
use crate::pipeline::artifacts::SummaryOutput;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_EMBED,
    STAGE_GRAPH, STAGE_RANK, STAGE_SEGMENT, STAGE_SELECT,
};
use crate::summarizer::selector::SentenceSelector;
use crate::types::{Document, Sentence, SummaryConfig};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Extractive summarizer over a pluggable embedding provider
#[derive(Debug, Clone)]
pub struct Summarizer<E> {
    embedder: E,
    segmenter: SentenceSegmenter,
    graph_builder: SimilarityGraphBuilder,
    ranker: StandardPageRank,
    config: SummaryConfig,
}

/// Summarizer using the built-in term-frequency embedder
pub type DefaultSummarizer = Summarizer<TermFrequencyEmbedder>;

impl Default for DefaultSummarizer {
    fn default() -> Self {
        Summarizer::new(TermFrequencyEmbedder::default())
    }
}

impl<E: EmbeddingProvider> Summarizer<E> {
    /// Create a summarizer with default configuration
    pub fn new(embedder: E) -> Self {
        Self::with_config(embedder, SummaryConfig::default())
    }

    /// Create a summarizer whose stages are configured from `config`
    pub fn with_config(embedder: E, config: SummaryConfig) -> Self {
        Self {
            embedder,
            segmenter: SentenceSegmenter::with_delimiters(config.delimiters.iter().copied()),
            graph_builder: SimilarityGraphBuilder::new()
                .with_parallel_threshold(config.parallel_threshold),
            ranker: StandardPageRank::from_config(&config),
            config,
        }
    }

    /// Replace the sentence segmenter
    pub fn with_segmenter(mut self, segmenter: SentenceSegmenter) -> Self {
        self.config.delimiters = segmenter.delimiters().to_vec();
        self.segmenter = segmenter;
        self
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Summarize `raw_text` down to at most `top_n` sentences
    pub fn summarize(&self, raw_text: &str, top_n: usize) -> Result<String> {
        Ok(self.run(raw_text, top_n, &mut NoopObserver)?.summary)
    }

    /// Summarize using the configured `top_n`
    pub fn summarize_default(&self, raw_text: &str) -> Result<String> {
        self.summarize(raw_text, self.config.top_n)
    }

    /// Execute the full pipeline and return the detailed output.
    ///
    /// Embedding failures abort the run; an empty document, a degenerate
    /// graph or an unconverged ranker only add diagnostics.
    pub fn run(
        &self,
        raw_text: &str,
        top_n: usize,
        observer: &mut impl PipelineObserver,
    ) -> Result<SummaryOutput> {
        self.execute(raw_text, top_n, observer, |texts| self.embed_sentences(texts))
    }

    /// Summarize a document, reusing cached embeddings when its sentences
    /// are unchanged since they were computed.
    pub fn summarize_document(
        &self,
        document: &Document,
        top_n: usize,
        cache: &mut EmbeddingCache,
    ) -> Result<SummaryOutput> {
        let model_id = self.embedder.model_id();

        self.execute(&document.raw_text, top_n, &mut NoopObserver, |texts| {
            if let Some(hit) = cache.lookup(&document.id, model_id, texts) {
                #[cfg(feature = "tracing")]
                tracing::debug!(document = %document.id, "embedding cache hit");
                return Ok(hit.vectors.clone());
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(document = %document.id, "embedding cache miss");
            let vectors = self.embed_sentences(texts)?;
            cache.insert(
                document.id.clone(),
                CachedEmbeddings {
                    model_id: model_id.to_string(),
                    sentences: texts.iter().map(|s| s.to_string()).collect(),
                    vectors: vectors.clone(),
                },
            );
            Ok(vectors)
        })
    }

    /// Summarize many documents in parallel.
    ///
    /// Results are returned in input order; one failing document does not
    /// affect the others.
    pub fn summarize_batch(
        &self,
        documents: &[Document],
        top_n: usize,
    ) -> Vec<Result<SummaryOutput>> {
        documents
            .par_iter()
            .map(|doc| self.run(&doc.raw_text, top_n, &mut NoopObserver))
            .collect()
    }

    /// Call the provider and check it honoured the one-vector-per-sentence contract
    fn embed_sentences(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        let vectors = self.embedder.embed(texts).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(model = self.embedder.model_id(), error = %err, "embedding failed");
            SummaryError::from(err)
        })?;

        if vectors.len() != texts.len() {
            return Err(SummaryError::EmbeddingCountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }
        Ok(vectors)
    }

    fn execute<F>(
        &self,
        raw_text: &str,
        top_n: usize,
        observer: &mut impl PipelineObserver,
        embed: F,
    ) -> Result<SummaryOutput>
    where
        F: FnOnce(&[&str]) -> Result<Vec<Embedding>>,
    {
        // Stage 1: Segment
        let sentences: Vec<Sentence> = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let sentences = self.segmenter.segment(raw_text);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(sentences.len())
                .build();
            observer.on_stage_end(STAGE_SEGMENT, &report);
            observer.on_sentences(&sentences);
            sentences
        };

        if sentences.is_empty() {
            return Ok(SummaryOutput::empty());
        }
        if let Some(limit) = self.config.max_sentences {
            if sentences.len() > limit {
                return Err(SummaryError::InputTooLarge {
                    sentences: sentences.len(),
                    limit,
                });
            }
        }

        // Stage 2: Embed
        let embeddings = {
            trace_stage!(STAGE_EMBED);
            observer.on_stage_start(STAGE_EMBED);
            let clock = StageClock::start();
            let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
            let embeddings = embed(&texts)?;
            observer.on_stage_end(STAGE_EMBED, &StageReport::new(clock.elapsed()));
            embeddings
        };

        // Stage 3: Build similarity graph
        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = self.graph_builder.build(&embeddings)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.len())
                .edges(graph.positive_pairs())
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(&graph);
            graph
        };

        // Stage 4: Rank
        let rank = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let rank = self.ranker.rank(&graph);
            let report = StageReportBuilder::new(clock.elapsed())
                .iterations(rank.iterations)
                .converged(rank.converged)
                .residual(rank.delta)
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_rank(&rank);
            rank
        };

        #[cfg(feature = "tracing")]
        if rank.degenerate {
            tracing::debug!(
                sentences = sentences.len(),
                "no similar sentence pairs, selecting leading sentences"
            );
        }

        // Stage 5: Select
        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let summary = SentenceSelector::new(top_n).select(&sentences, &rank.scores);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(summary.len())
            .build();
        observer.on_stage_end(STAGE_SELECT, &report);

        Ok(SummaryOutput::from_parts(summary, rank, sentences.len()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EmbeddingError;
    use crate::pipeline::artifacts::SummaryDiagnostic;
    use crate::pipeline::observer::{StageTimingObserver, STAGES};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds by looking up fixed vectors keyed on sentence text
    struct TableEmbedder {
        table: Vec<(&'static str, Embedding)>,
        calls: AtomicUsize,
    }

    impl TableEmbedder {
        fn new(table: Vec<(&'static str, Embedding)>) -> Self {
            Self {
                table,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl EmbeddingProvider for TableEmbedder {
        fn embed(&self, sentences: &[&str]) -> std::result::Result<Vec<Embedding>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(sentences
                .iter()
                .map(|s| {
                    self.table
                        .iter()
                        .find(|(k, _)| k == s)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_else(|| vec![0.0, 0.0, 0.0])
                })
                .collect())
        }

        fn model_id(&self) -> &str {
            "table-v1"
        }
    }

    struct FailingEmbedder;

    impl EmbeddingProvider for FailingEmbedder {
        fn embed(&self, _: &[&str]) -> std::result::Result<Vec<Embedding>, EmbeddingError> {
            Err(EmbeddingError::ModelLoad {
                model: "broken".into(),
                reason: "weights missing".into(),
            })
        }

        fn model_id(&self) -> &str {
            "broken"
        }
    }

    struct ShortEmbedder;

    impl EmbeddingProvider for ShortEmbedder {
        fn embed(&self, _: &[&str]) -> std::result::Result<Vec<Embedding>, EmbeddingError> {
            Ok(vec![vec![1.0]])
        }

        fn model_id(&self) -> &str {
            "short"
        }
    }

    fn topic_table() -> TableEmbedder {
        // "rust" and "safety" cluster together; "weather" is off-topic
        TableEmbedder::new(vec![
            ("Rust is a systems language", vec![1.0, 0.2, 0.0]),
            ("Rust guarantees memory safety", vec![0.9, 0.4, 0.0]),
            ("It rained yesterday", vec![0.0, 0.0, 1.0]),
            ("Safety comes from ownership", vec![0.8, 0.5, 0.1]),
        ])
    }

    const TOPIC_TEXT: &str = "Rust is a systems language. Rust guarantees memory safety. \
                              It rained yesterday. Safety comes from ownership.";

    #[test]
    fn test_off_topic_sentence_dropped() {
        let summarizer = Summarizer::new(topic_table());
        let out = summarizer.run(TOPIC_TEXT, 3, &mut NoopObserver).unwrap();

        assert_eq!(out.selected_indices(), vec![0, 1, 3]);
        assert_eq!(
            out.summary,
            "Rust is a systems language Rust guarantees memory safety Safety comes from ownership"
        );
        assert!(out.converged);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_embedding_failure_propagates() {
        let err = Summarizer::new(FailingEmbedder)
            .summarize("One. Two.", 1)
            .unwrap_err();

        match err {
            SummaryError::EmbeddingUnavailable(EmbeddingError::ModelLoad { model, .. }) => {
                assert_eq!(model, "broken")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_text_skips_embedding() {
        let out = Summarizer::new(FailingEmbedder)
            .run("  ", 3, &mut NoopObserver)
            .unwrap();

        assert_eq!(out.summary, "");
        assert!(out.has_diagnostic(&SummaryDiagnostic::EmptyInput));
    }

    #[test]
    fn test_embedding_count_mismatch() {
        let err = Summarizer::new(ShortEmbedder)
            .summarize("One. Two. Three.", 1)
            .unwrap_err();

        assert!(matches!(
            err,
            SummaryError::EmbeddingCountMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_max_sentences_limit() {
        let cfg = SummaryConfig {
            max_sentences: Some(2),
            ..SummaryConfig::default()
        };
        let err = Summarizer::with_config(topic_table(), cfg)
            .summarize(TOPIC_TEXT, 1)
            .unwrap_err();

        assert!(matches!(
            err,
            SummaryError::InputTooLarge {
                sentences: 4,
                limit: 2
            }
        ));
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let mut obs = StageTimingObserver::new();
        Summarizer::new(topic_table())
            .run(TOPIC_TEXT, 2, &mut obs)
            .unwrap();

        let stages: Vec<&str> = obs.reports().iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, STAGES.to_vec());

        let graph = obs.report(STAGE_GRAPH).unwrap();
        assert_eq!(graph.nodes, Some(4));
        let rank = obs.report(STAGE_RANK).unwrap();
        assert_eq!(rank.converged, Some(true));
    }

    #[test]
    fn test_unconverged_rank_is_diagnostic_not_error() {
        let cfg = SummaryConfig {
            max_iterations: 1,
            convergence_threshold: 1e-15,
            ..SummaryConfig::default()
        };
        let out = Summarizer::with_config(topic_table(), cfg)
            .run(TOPIC_TEXT, 2, &mut NoopObserver)
            .unwrap();

        assert!(!out.converged);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.selected.len(), 2);
        assert!(matches!(
            out.diagnostics.as_slice(),
            [SummaryDiagnostic::ConvergenceNotReached { iterations: 1, .. }]
        ));
    }

    #[test]
    fn test_cache_reuses_embeddings() {
        let summarizer = Summarizer::new(topic_table());
        let mut cache = EmbeddingCache::new();
        let doc = Document::new(11_i64, TOPIC_TEXT);

        let first = summarizer.summarize_document(&doc, 2, &mut cache).unwrap();
        let second = summarizer.summarize_document(&doc, 2, &mut cache).unwrap();

        assert_eq!(first, second);
        assert_eq!(summarizer.embedder().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_refreshes_when_text_changes() {
        let summarizer = Summarizer::new(topic_table());
        let mut cache = EmbeddingCache::new();

        let doc = Document::new(11_i64, TOPIC_TEXT);
        summarizer.summarize_document(&doc, 2, &mut cache).unwrap();

        let edited = Document::new(11_i64, "Rust is a systems language. It rained yesterday.");
        let out = summarizer.summarize_document(&edited, 2, &mut cache).unwrap();

        assert_eq!(out.sentence_count, 2);
        assert_eq!(summarizer.embedder().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get(&edited.id).unwrap().sentences.len(), 2);
    }

    #[test]
    fn test_failed_embedding_is_not_cached() {
        let summarizer = Summarizer::new(FailingEmbedder);
        let mut cache = EmbeddingCache::new();
        let doc = Document::new("n1", "One. Two.");

        assert!(summarizer.summarize_document(&doc, 1, &mut cache).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let summarizer = Summarizer::default();
        let docs: Vec<Document> = (0..8)
            .map(|i| {
                Document::new(
                    i as i64,
                    format!(
                        "Node {i} stores circular text. Circular text mentions banks. \
                         Banks issue circulars. Weather was mild on day {i}."
                    ),
                )
            })
            .collect();

        let batch = summarizer.summarize_batch(&docs, 2);
        assert_eq!(batch.len(), docs.len());
        for (doc, result) in docs.iter().zip(batch) {
            let expected = summarizer.summarize(&doc.raw_text, 2).unwrap();
            assert_eq!(result.unwrap().summary, expected);
        }
    }

    #[test]
    fn test_custom_segmenter_updates_config() {
        let summarizer =
            Summarizer::default().with_segmenter(SentenceSegmenter::terminal_punctuation());
        assert_eq!(summarizer.config().delimiters, vec!['.', '!', '?']);
        assert_eq!(summarizer.summarize("Hi! Bye?", 5).unwrap(), "Hi Bye");
    }
}
