//! Summarization pipeline
//!
//! Stages run in a fixed order (segment, embed, graph, rank, select) under
//! [`runner::Summarizer`]. Configuration can be loaded from a validated JSON
//! [`spec::SummarySpec`], and [`observer::PipelineObserver`] exposes stage
//! boundaries for timing and debugging.

pub mod artifacts;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod validation;
