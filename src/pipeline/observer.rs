//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::graph::similarity::SimilarityMatrix;
use crate::pagerank::PageRankResult;
use crate::types::Sentence;

pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_EMBED: &str = "embed";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";

/// All stages in execution order
pub const STAGES: [&str; 5] = [
    STAGE_SEGMENT,
    STAGE_EMBED,
    STAGE_GRAPH,
    STAGE_RANK,
    STAGE_SELECT,
];

/// Measurements taken for one stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
    pub residual: Option<f64>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}

/// Fluent construction of a [`StageReport`] with optional metrics
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Wall-clock timer for a stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Callbacks invoked by the pipeline runner.
///
/// Every method has an empty default, so observers implement only what
/// they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Sentences produced by the segmenter
    fn on_sentences(&mut self, _sentences: &[Sentence]) {}

    /// Similarity graph before ranking
    fn on_graph(&mut self, _graph: &SimilarityMatrix) {}

    /// Ranker output
    fn on_rank(&mut self, _result: &PageRankResult) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records a [`StageReport`] per completed stage
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in completion order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for a stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all stage durations
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .nodes(4)
            .edges(6)
            .iterations(12)
            .converged(true)
            .residual(1e-7)
            .build();

        assert_eq!(report.elapsed, Duration::from_millis(3));
        assert_eq!(report.nodes, Some(4));
        assert_eq!(report.edges, Some(6));
        assert_eq!(report.iterations, Some(12));
        assert_eq!(report.converged, Some(true));
        assert_eq!(report.residual, Some(1e-7));
    }

    #[test]
    fn test_timing_observer_records_stages() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_SEGMENT, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_RANK, &StageReport::new(Duration::from_millis(2)));

        assert_eq!(obs.reports().len(), 2);
        assert!(obs.report(STAGE_RANK).is_some());
        assert!(obs.report(STAGE_EMBED).is_none());
        assert_eq!(obs.total(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
