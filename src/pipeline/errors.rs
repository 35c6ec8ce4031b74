//! Structured errors produced by spec validation.

use serde::Serialize;
use thiserror::Error;

use super::error_code::ErrorCode;

/// One problem found in a [`SummarySpec`](super::spec::SummarySpec).
///
/// `path` is a JSON pointer to the offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("[{code}] {path}: {message}")]
pub struct PipelineSpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a suggestion for fixing the problem
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
