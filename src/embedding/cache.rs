//! Per-document embedding cache
//!
//! Owned and invalidated by the caller. An entry remembers the sentence
//! texts it was computed for and is only reused while the document still
//! segments to exactly those sentences.

use rustc_hash::FxHashMap;

use super::Embedding;
use crate::types::DocumentId;

/// Embeddings computed for one document
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEmbeddings {
    /// Model that produced the vectors
    pub model_id: String,
    /// Sentence texts, in document order
    pub sentences: Vec<String>,
    /// One vector per sentence
    pub vectors: Vec<Embedding>,
}

impl CachedEmbeddings {
    /// Whether this entry was computed for these sentences by this model
    pub fn matches<S: AsRef<str>>(&self, model_id: &str, sentences: &[S]) -> bool {
        self.model_id == model_id
            && self.sentences.len() == sentences.len()
            && self
                .sentences
                .iter()
                .zip(sentences)
                .all(|(cached, current)| {
                    let current: &str = current.as_ref();
                    cached.as_str() == current
                })
    }
}

/// Cache of sentence embeddings keyed by document identity
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: FxHashMap<DocumentId, CachedEmbeddings>,
    hits: u64,
    misses: u64,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a reusable entry, counting the hit or miss
    pub fn lookup<S: AsRef<str>>(
        &mut self,
        id: &DocumentId,
        model_id: &str,
        sentences: &[S],
    ) -> Option<&CachedEmbeddings> {
        match self.entries.get(id) {
            Some(entry) if entry.matches(model_id, sentences) => {
                self.hits += 1;
                Some(entry)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Get an entry without checking it against the current text
    pub fn get(&self, id: &DocumentId) -> Option<&CachedEmbeddings> {
        self.entries.get(id)
    }

    /// Store (or replace) the entry for a document
    pub fn insert(&mut self, id: DocumentId, entry: CachedEmbeddings) {
        self.entries.insert(id, entry);
    }

    /// Drop the entry for a document, returning it if present
    pub fn invalidate(&mut self, id: &DocumentId) -> Option<CachedEmbeddings> {
        self.entries.remove(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
