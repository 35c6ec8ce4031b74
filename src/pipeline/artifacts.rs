//! Pipeline output artifacts.
//!
//! [`SummaryOutput`] is the public-facing result of one summarization run:
//! the summary text plus the scores and diagnostics that produced it.

use serde::Serialize;

use crate::pagerank::PageRankResult;
use crate::summarizer::selector::{SelectedSentence, Summary};

/// Recoverable conditions observed during a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryDiagnostic {
    /// The text contained no sentences
    EmptyInput,
    /// No two sentences were similar; scores fell back to uniform
    DegenerateGraph,
    /// PageRank stopped at the iteration cap
    ConvergenceNotReached { iterations: usize, delta: f64 },
}

/// Result of summarizing one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryOutput {
    /// Selected sentences joined in document order
    pub summary: String,
    /// Selected sentences with their scores, in document order
    pub selected: Vec<SelectedSentence>,
    /// Centrality score of every sentence
    pub scores: Vec<f64>,
    /// Number of sentences in the document
    pub sentence_count: usize,
    /// PageRank iterations performed
    pub iterations: usize,
    pub converged: bool,
    pub degenerate: bool,
    pub diagnostics: Vec<SummaryDiagnostic>,
}

impl SummaryOutput {
    /// Output for a document without sentences
    pub fn empty() -> Self {
        Self {
            converged: true,
            diagnostics: vec![SummaryDiagnostic::EmptyInput],
            ..Self::default()
        }
    }

    /// Assemble the output from ranking and selection results
    pub fn from_parts(summary: Summary, rank: PageRankResult, sentence_count: usize) -> Self {
        let mut diagnostics = Vec::new();
        if rank.degenerate {
            diagnostics.push(SummaryDiagnostic::DegenerateGraph);
        }
        if !rank.converged {
            diagnostics.push(SummaryDiagnostic::ConvergenceNotReached {
                iterations: rank.iterations,
                delta: rank.delta,
            });
        }

        Self {
            summary: summary.text(),
            selected: summary.sentences,
            scores: rank.scores,
            sentence_count,
            iterations: rank.iterations,
            converged: rank.converged,
            degenerate: rank.degenerate,
            diagnostics,
        }
    }

    /// Document indices of the selected sentences
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().map(|s| s.sentence.index).collect()
    }

    pub fn has_diagnostic(&self, diagnostic: &SummaryDiagnostic) -> bool {
        self.diagnostics.iter().any(|d| {
            std::mem::discriminant(d) == std::mem::discriminant(diagnostic)
        })
    }

    /// Serialize to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
