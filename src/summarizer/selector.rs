//! Top-N sentence selection for extractive summaries
//!
//! Sentences are ranked by centrality score (ties go to the earlier
//! sentence), the best `top_n` are kept, and the survivors are put back in
//! document order.

use serde::Serialize;

use crate::pagerank::rank_order;
use crate::types::Sentence;

/// Default number of sentences in a summary
pub const DEFAULT_TOP_N: usize = 3;

/// A selected sentence with its scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedSentence {
    /// The sentence
    pub sentence: Sentence,
    /// Centrality score
    pub score: f64,
    /// Position in the score ranking (0 = best)
    pub rank: usize,
}

/// Selected sentences in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub sentences: Vec<SelectedSentence>,
}

impl Summary {
    /// Sentence texts joined with single spaces
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Document indices of the selected sentences
    pub fn indices(&self) -> Vec<usize> {
        self.sentences.iter().map(|s| s.sentence.index).collect()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Picks the highest-scoring sentences
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    top_n: usize,
}

impl Default for SentenceSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl SentenceSelector {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Set number of sentences to select
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Select sentences by score.
    ///
    /// `scores[i]` belongs to `sentences[i]`; a missing score counts as 0.
    pub fn select(&self, sentences: &[Sentence], scores: &[f64]) -> Summary {
        if self.top_n == 0 || sentences.is_empty() {
            return Summary::default();
        }

        let padded: Vec<f64> = (0..sentences.len())
            .map(|i| scores.get(i).copied().unwrap_or(0.0))
            .collect();

        let mut selected: Vec<SelectedSentence> = rank_order(&padded)
            .into_iter()
            .take(self.top_n)
            .enumerate()
            .map(|(rank, i)| SelectedSentence {
                sentence: sentences[i].clone(),
                score: padded[i],
                rank,
            })
            .collect();

        // Reading order, not rank order
        selected.sort_by_key(|s| s.sentence.index);

        Summary {
            sentences: selected,
        }
    }
}

/// Select the `top_n` best sentences and join them in document order
pub fn select_summary(sentences: &[String], scores: &[f64], top_n: usize) -> String {
    let sentences: Vec<Sentence> = sentences
        .iter()
        .enumerate()
        .map(|(i, text)| Sentence::new(i, text.as_str(), 0, text.len()))
        .collect();
    SentenceSelector::new(top_n).select(&sentences, scores).text()
}
