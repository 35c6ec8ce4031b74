//! Validation engine for summarizer specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummarySpec`](super::spec::SummarySpec) and collects every diagnostic
//! into a [`ValidationReport`]. It never short-circuits on the first error,
//! so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use textrank_digest::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::PipelineSpecError;
use super::spec::*;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: PipelineSpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: PipelineSpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: PipelineSpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`SummarySpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so one engine can be shared
/// across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_range"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`SummarySpec`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(ConvergenceRule));
        engine.add_rule(Box::new(DelimitersRule));
        engine.add_rule(Box::new(TopNRule));
        engine.add_rule(Box::new(RuntimeLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &SummarySpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version ────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            PipelineSpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("spec version {} is not supported", spec.v),
            )
            .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Damping strictly inside (0, 1) ──────────────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        match spec.rank.damping {
            Some(d) if !(d > 0.0 && d < 1.0) => vec![ValidationDiagnostic::error(
                PipelineSpecError::new(
                    ErrorCode::OutOfRange,
                    "/rank/damping",
                    format!("damping must be in (0, 1), got {d}"),
                )
                .with_hint("The conventional value is 0.85"),
            )],
            _ => vec![],
        }
    }
}

// ─── 3. Threshold and iteration cap ─────────────────────────────────────────

struct ConvergenceRule;

impl ValidationRule for ConvergenceRule {
    fn name(&self) -> &str {
        "convergence"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if let Some(t) = spec.rank.threshold {
            if !(t.is_finite() && t > 0.0) {
                out.push(ValidationDiagnostic::error(
                    PipelineSpecError::new(
                        ErrorCode::OutOfRange,
                        "/rank/threshold",
                        format!("threshold must be a positive finite number, got {t}"),
                    )
                    .with_hint("Try 1e-6"),
                ));
            }
        }

        if spec.rank.max_iterations == Some(0) {
            out.push(ValidationDiagnostic::error(
                PipelineSpecError::new(
                    ErrorCode::OutOfRange,
                    "/rank/max_iterations",
                    "max_iterations must be at least 1",
                )
                .with_hint("Try 100"),
            ));
        }

        out
    }
}

// ─── 4. Segmenter needs at least one delimiter ──────────────────────────────

struct DelimitersRule;

impl ValidationRule for DelimitersRule {
    fn name(&self) -> &str {
        "delimiters"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        match &spec.segmenter.delimiters {
            Some(d) if d.is_empty() => vec![ValidationDiagnostic::error(
                PipelineSpecError::new(
                    ErrorCode::InvalidValue,
                    "/segmenter/delimiters",
                    "delimiter set must not be empty",
                )
                .with_hint("Use [\".\"] or [\".\", \"!\", \"?\"]"),
            )],
            _ => vec![],
        }
    }
}

// ─── 5. top_n of zero always yields an empty summary ────────────────────────

struct TopNRule;

impl ValidationRule for TopNRule {
    fn name(&self) -> &str {
        "top_n"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        if spec.select.top_n == Some(0) {
            vec![ValidationDiagnostic::warning(PipelineSpecError::new(
                ErrorCode::OutOfRange,
                "/select/top_n",
                "top_n is 0; every summary will be empty",
            ))]
        } else {
            vec![]
        }
    }
}

// ─── 6. Runtime limits must be positive when set ────────────────────────────

struct RuntimeLimitsRule;

impl ValidationRule for RuntimeLimitsRule {
    fn name(&self) -> &str {
        "runtime_limits"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let checks = [
            ("max_sentences", spec.runtime.max_sentences),
            ("parallel_threshold", spec.runtime.parallel_threshold),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == Some(0))
            .map(|(field, _)| {
                ValidationDiagnostic::error(PipelineSpecError::new(
                    ErrorCode::OutOfRange,
                    format!("/runtime/{field}"),
                    format!("{field} must be greater than 0"),
                ))
            })
            .collect()
    }
}

// ─── 7. Unknown fields (strict → error, lenient → warning) ──────────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let sections = [
            ("", &spec.unknown_fields),
            ("/segmenter", &spec.segmenter.unknown_fields),
            ("/rank", &spec.rank.unknown_fields),
            ("/select", &spec.select.unknown_fields),
            ("/runtime", &spec.runtime.unknown_fields),
        ];

        let mut out = Vec::new();
        for (prefix, fields) in sections {
            let mut names: Vec<&String> = fields.keys().collect();
            names.sort();
            for name in names {
                let err = PipelineSpecError::new(
                    ErrorCode::UnknownField,
                    format!("{prefix}/{name}"),
                    format!("unknown field \"{name}\""),
                );
                out.push(if spec.strict {
                    ValidationDiagnostic::error(err)
                } else {
                    ValidationDiagnostic::warning(err)
                });
            }
        }
        out
    }
}
