//! Summarizer specification types.
//!
//! A [`SummarySpec`] is the JSON form of the summarizer configuration. Every
//! section is optional; omitted values fall back to [`SummaryConfig`]
//! defaults. Specs are checked by the
//! [`ValidationEngine`](super::validation::ValidationEngine) before they are
//! resolved into a config.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "segmenter": { "delimiters": [".", "!", "?"] },
//!   "rank": { "damping": 0.85, "max_iterations": 100, "threshold": 1e-6 },
//!   "select": { "top_n": 3 },
//!   "runtime": { "max_sentences": 5000 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::validation::ValidationEngine;
use crate::errors::{Result, SummaryError};
use crate::types::SummaryConfig;

/// Current spec version
pub const SPEC_VERSION: u32 = 1;

/// Top-level summarizer specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySpec {
    /// Spec version (currently `1`).
    pub v: u32,

    #[serde(default)]
    pub segmenter: SegmenterSpec,

    #[serde(default)]
    pub rank: RankSpec,

    #[serde(default)]
    pub select: SelectSpec,

    /// Runtime execution limits.
    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Sentence segmentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmenterSpec {
    #[serde(default)]
    pub delimiters: Option<Vec<char>>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// PageRank settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankSpec {
    #[serde(default)]
    pub damping: Option<f64>,

    #[serde(default)]
    pub max_iterations: Option<usize>,

    /// L1 convergence threshold.
    #[serde(default)]
    pub threshold: Option<f64>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Sentence selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectSpec {
    #[serde(default)]
    pub top_n: Option<usize>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Runtime execution limits (fail-fast guards).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Maximum number of sentences before rejecting a document.
    #[serde(default)]
    pub max_sentences: Option<usize>,

    /// Sentence count at which similarity rows are computed in parallel.
    #[serde(default)]
    pub parallel_threshold: Option<usize>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl SummarySpec {
    /// Parse a spec from JSON without validating it
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate with the default rules and merge over [`SummaryConfig::default`].
    ///
    /// Warnings do not block resolution; any error does.
    pub fn resolve(&self) -> Result<SummaryConfig> {
        let report = ValidationEngine::with_defaults().validate(self);
        if report.has_errors() {
            return Err(SummaryError::InvalidSpec(report.errors().cloned().collect()));
        }

        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(%warning, "summarizer spec warning");
        }

        Ok(self.merge_into(SummaryConfig::default()))
    }

    /// Overlay the values this spec sets onto `base`
    pub fn merge_into(&self, mut base: SummaryConfig) -> SummaryConfig {
        if let Some(delimiters) = &self.segmenter.delimiters {
            base.delimiters = delimiters.clone();
        }
        if let Some(damping) = self.rank.damping {
            base.damping = damping;
        }
        if let Some(max_iterations) = self.rank.max_iterations {
            base.max_iterations = max_iterations;
        }
        if let Some(threshold) = self.rank.threshold {
            base.convergence_threshold = threshold;
        }
        if let Some(top_n) = self.select.top_n {
            base.top_n = top_n;
        }
        if let Some(limit) = self.runtime.max_sentences {
            base.max_sentences = Some(limit);
        }
        if let Some(threshold) = self.runtime.parallel_threshold {
            base.parallel_threshold = threshold;
        }
        base
    }
}

impl SummaryConfig {
    /// Parse, validate and resolve a JSON spec
    pub fn from_json(json: &str) -> Result<Self> {
        SummarySpec::from_json(json)?.resolve()
    }
}
