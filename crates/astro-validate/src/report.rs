//! Validation report types

use crate::types::{Rule, Severity};
use std::fmt;

/// Why a rule did not hold
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// The gap between `first` and `second` differs from the first gap
    SpacingMismatch {
        first: String,
        second: String,
        expected: f64,
        actual: f64,
    },
    /// The sphere of `index` is not closer to the origin than its polyhedron
    OrderingViolation {
        index: u32,
        sphere: String,
        polyhedron: String,
        sphere_distance: f64,
        polyhedron_distance: f64,
    },
    /// A polyhedron with more faces is not further out than one with fewer
    MonotonicityViolation {
        fewer: String,
        fewer_faces: u32,
        fewer_distance: f64,
        more: String,
        more_faces: u32,
        more_distance: f64,
    },
    /// A sphere moved away from its recorded distance
    DriftDetected {
        index: u32,
        sphere: String,
        expected: f64,
        actual: f64,
    },
    /// `object` lies off the consensus line; `outliers` counts all such objects
    NotCollinear {
        object: String,
        deviation: f64,
        outliers: usize,
    },
}

impl Finding {
    /// Stable machine-readable name
    pub fn code(&self) -> &'static str {
        match self {
            Finding::SpacingMismatch { .. } => "spacing_mismatch",
            Finding::OrderingViolation { .. } => "ordering_violation",
            Finding::MonotonicityViolation { .. } => "monotonicity_violation",
            Finding::DriftDetected { .. } => "drift_detected",
            Finding::NotCollinear { .. } => "not_collinear",
        }
    }

    /// The object the finding is about
    pub fn object(&self) -> &str {
        match self {
            Finding::SpacingMismatch { second, .. } => second,
            Finding::OrderingViolation { sphere, .. } => sphere,
            Finding::MonotonicityViolation { more, .. } => more,
            Finding::DriftDetected { sphere, .. } => sphere,
            Finding::NotCollinear { object, .. } => object,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::SpacingMismatch {
                first,
                second,
                expected,
                actual,
            } => write!(
                f,
                "gap between '{}' and '{}' is {:.4}, expected {:.4}",
                first, second, actual, expected
            ),
            Finding::OrderingViolation {
                index,
                sphere,
                polyhedron,
                sphere_distance,
                polyhedron_distance,
            } => write!(
                f,
                "index {}: sphere '{}' ({:.4}) is not closer to the origin than polyhedron '{}' ({:.4})",
                index, sphere, sphere_distance, polyhedron, polyhedron_distance
            ),
            Finding::MonotonicityViolation {
                fewer,
                fewer_faces,
                fewer_distance,
                more,
                more_faces,
                more_distance,
            } => write!(
                f,
                "'{}' ({} faces) at {:.4} is not further out than '{}' ({} faces) at {:.4}",
                more, more_faces, more_distance, fewer, fewer_faces, fewer_distance
            ),
            Finding::DriftDetected {
                index,
                sphere,
                expected,
                actual,
            } => write!(
                f,
                "index {}: sphere '{}' is {:.4} from the origin, expected {:.4}",
                index, sphere, actual, expected
            ),
            Finding::NotCollinear {
                object,
                deviation,
                outliers,
            } => {
                write!(f, "'{}' is {:.4} off the common line", object, deviation)?;
                if *outliers > 1 {
                    write!(f, " ({} objects off the line)", outliers)?;
                }
                Ok(())
            }
        }
    }
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Fail(Finding),
    Warn(Finding),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn finding(&self) -> Option<&Finding> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail(finding) | Outcome::Warn(finding) => Some(finding),
        }
    }

    /// Wrap a finding according to the rule's severity
    pub fn for_rule(rule: Rule, finding: Finding) -> Self {
        match rule.severity() {
            Severity::Error => Outcome::Fail(finding),
            Severity::Warning => Outcome::Warn(finding),
        }
    }
}

/// A rule paired with its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct RuleResult {
    pub rule: Rule,
    pub outcome: Outcome,
}

/// Overall verdict of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    WarnOnly,
    Fail,
}

impl Status {
    /// Process exit code for the CLI; 1 is left to configuration and IO errors
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Pass => 0,
            Status::Fail => 2,
            Status::WarnOnly => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::WarnOnly => "warn",
            Status::Fail => "fail",
        }
    }
}

/// Ordered per-rule results of one validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub results: Vec<RuleResult>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule, outcome: Outcome) {
        self.results.push(RuleResult { rule, outcome });
    }

    /// Outcome of a specific rule, if it was evaluated
    pub fn outcome(&self, rule: Rule) -> Option<&Outcome> {
        self.results
            .iter()
            .find(|r| r.rule == rule)
            .map(|r| &r.outcome)
    }

    pub fn status(&self) -> Status {
        if self.fail_count() > 0 {
            Status::Fail
        } else if self.warn_count() > 0 {
            Status::WarnOnly
        } else {
            Status::Pass
        }
    }

    /// Check if the arrangement is publishable (no failures)
    pub fn is_valid(&self) -> bool {
        self.fail_count() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Fail(_)))
    }

    pub fn fail_count(&self) -> usize {
        self.failures().count()
    }

    pub fn warn_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Warn(_)))
            .count()
    }

    pub fn pass_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_pass()).count()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        if self.pass_count() == self.results.len() {
            return format!("All {} rule(s) passed.", self.results.len());
        }

        format!(
            "{} rule(s): {} passed, {} failed, {} warning(s)",
            self.results.len(),
            self.pass_count(),
            self.fail_count(),
            self.warn_count(),
        )
    }
}
