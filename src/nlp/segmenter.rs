//! Sentence segmentation
//!
//! Splits raw text on a configurable set of sentence-terminal characters.
//! No abbreviation or locale handling is applied: the same input
//! always produces the same sentences.

use crate::types::Sentence;

/// Splits text into trimmed, non-empty sentences
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    delimiters: Vec<char>,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter {
    /// Create a segmenter that splits on periods
    pub fn new() -> Self {
        Self {
            delimiters: vec!['.'],
        }
    }

    /// Create a segmenter that splits on `.`, `!` and `?`
    pub fn terminal_punctuation() -> Self {
        Self::with_delimiters(['.', '!', '?'])
    }

    /// Create a segmenter with custom delimiter characters
    pub fn with_delimiters(delimiters: impl IntoIterator<Item = char>) -> Self {
        Self {
            delimiters: delimiters.into_iter().collect(),
        }
    }

    /// Delimiters this segmenter splits on
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Split text into trimmed sentence slices in document order
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.spans(text)
            .into_iter()
            .map(|(start, end)| &text[start..end])
            .collect()
    }

    /// Split text into [`Sentence`]s with stable indices and byte offsets
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        self.spans(text)
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| Sentence::new(index, &text[start..end], start, end))
            .collect()
    }

    /// Byte ranges of the trimmed, non-empty pieces between delimiters
    fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut piece_start = 0;

        for (i, c) in text.char_indices() {
            if self.delimiters.contains(&c) {
                push_trimmed(text, piece_start, i, &mut spans);
                piece_start = i + c.len_utf8();
            }
        }
        push_trimmed(text, piece_start, text.len(), &mut spans);

        spans
    }
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    let piece = &text[start..end];
    let trimmed = piece.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = piece.len() - piece.trim_start().len();
    spans.push((start + lead, start + lead + trimmed.len()));
}
