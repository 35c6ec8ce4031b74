//! Summarization components
//!
//! Provides top-N extractive sentence selection over centrality scores.

pub mod selector;
