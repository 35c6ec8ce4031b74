//! Core data types: documents, sentences and summarizer configuration

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a document, used as the embedding cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for DocumentId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// The raw text content of one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub raw_text: String,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Build a document from a string property of a graph node.
    ///
    /// Returns `None` if the property is missing or not a string.
    pub fn from_node(node: &NodeRecord, property: &str) -> Option<Self> {
        node.text_property(property)
            .map(|text| Self::new(node.id, text))
    }
}

/// A node as handed over by the graph database browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl NodeRecord {
    /// Get a property value if it is a string
    pub fn text_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }
}

/// A segment of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Position in the document (0-based)
    pub index: usize,
    /// Trimmed sentence text, never empty
    pub text: String,
    /// Byte offset of the trimmed text in the document
    pub start: usize,
    /// Byte offset one past the end of the trimmed text
    pub end: usize,
}

impl Sentence {
    pub fn new(index: usize, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            index,
            text: text.into(),
            start,
            end,
        }
    }
}

/// Configuration for the summarization pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// PageRank damping factor
    pub damping: f64,
    /// Iteration cap for PageRank
    pub max_iterations: usize,
    /// L1 convergence threshold for PageRank
    pub convergence_threshold: f64,
    /// Number of sentences to keep
    pub top_n: usize,
    /// Sentence-terminal delimiter characters
    pub delimiters: Vec<char>,
    /// Sentence count at which similarity rows are computed in parallel
    pub parallel_threshold: usize,
    /// Reject documents with more sentences than this
    pub max_sentences: Option<usize>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            top_n: 3,
            delimiters: vec!['.'],
            parallel_threshold: 256,
            max_sentences: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id_from_node_id() {
        assert_eq!(DocumentId::from(42_i64).as_str(), "42");
        assert_eq!(DocumentId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_document_from_node_property() {
        let node: NodeRecord = serde_json::from_value(json!({
            "id": 7,
            "labels": ["Circular"],
            "properties": {
                "number": "C-12",
                "content": "First point. Second point.",
                "pages": 3
            }
        }))
        .unwrap();

        let doc = Document::from_node(&node, "content").unwrap();
        assert_eq!(doc.id, DocumentId::from(7_i64));
        assert_eq!(doc.raw_text, "First point. Second point.");

        assert!(Document::from_node(&node, "pages").is_none());
        assert!(Document::from_node(&node, "missing").is_none());
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let cfg: SummaryConfig = serde_json::from_str(r#"{ "top_n": 5 }"#).unwrap();
        assert_eq!(cfg.top_n, 5);
        assert_eq!(cfg.damping, 0.85);
        assert_eq!(cfg.delimiters, vec!['.']);
    }
}
