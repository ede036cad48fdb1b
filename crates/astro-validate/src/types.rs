//! Rule and tolerance definitions

use astro_core::{AstroError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Severity of a rule that does not hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The fixed set of arrangement rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Consecutive objects along the axis are equally far apart
    EvenSpacing,
    /// Each sphere is closer to the origin than the polyhedron of the same index
    SphereInsidePolyhedron,
    /// Polyhedra with more faces are further from the origin
    FaceCountMonotonic,
    /// Sphere distances match the recorded baseline
    SphereDistanceStable,
    /// All objects lie on one line
    Collinear,
}

impl Rule {
    /// Every rule, in the order reports list them
    pub const ALL: [Rule; 5] = [
        Rule::EvenSpacing,
        Rule::SphereInsidePolyhedron,
        Rule::FaceCountMonotonic,
        Rule::SphereDistanceStable,
        Rule::Collinear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rule::EvenSpacing => "even_spacing",
            Rule::SphereInsidePolyhedron => "sphere_inside_polyhedron",
            Rule::FaceCountMonotonic => "face_count_monotonic",
            Rule::SphereDistanceStable => "sphere_distance_stable",
            Rule::Collinear => "collinear",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rule::EvenSpacing => "objects are evenly spaced",
            Rule::SphereInsidePolyhedron => {
                "spheres are closer to the origin than the polyhedron with the same index"
            }
            Rule::FaceCountMonotonic => "polyhedra with more faces are further from the origin",
            Rule::SphereDistanceStable => "sphere distances from the origin stay the same",
            Rule::Collinear => "objects lie on one straight line",
        }
    }

    /// Collinearity only ever warns
    pub fn severity(&self) -> Severity {
        match self {
            Rule::Collinear => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric tolerances used by the rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Allowed difference between neighbour gaps
    pub spacing: f64,
    /// Allowed distance of an object from the consensus line
    pub collinearity: f64,
    /// Allowed difference between a sphere's distance and its baseline
    pub drift: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_TOLERANCE,
            collinearity: DEFAULT_TOLERANCE,
            drift: DEFAULT_TOLERANCE,
        }
    }
}

impl Tolerances {
    /// Reject negative or non-finite tolerances
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("spacing", self.spacing),
            ("collinearity", self.collinearity),
            ("drift", self.drift),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AstroError::ConfigError(format!(
                    "tolerance.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
