//! Arrangement auto-fix
//!
//! Rebuilds the arrangement as an evenly spaced row along +X: spheres
//! first by distance, then polyhedra by face count. The furthest sphere
//! keeps its distance from the origin.

use crate::config::{Baseline, ValidatorConfig};
use crate::evaluator::ArrangementValidator;
use crate::report::ValidationReport;
use crate::types::Rule;
use astro_core::{Arrangement, AstroError, Result, SceneObject, Vec3};
use std::cmp::Ordering;

/// Moves shorter than this are not reported
const MOVE_EPSILON: f64 = 1e-9;

/// A single object move that was or would be applied
#[derive(Debug, Clone, PartialEq)]
pub struct FixAction {
    pub object: String,
    pub from: Vec3,
    pub to: Vec3,
}

/// Report of a fix run
#[derive(Debug)]
pub struct FixReport {
    pub actions: Vec<FixAction>,
    /// Validation of the arrangement after the fix
    pub remaining: ValidationReport,
}

/// Repositions objects so the arrangement satisfies the ordering rules
pub struct ArrangementFixer<'a> {
    config: &'a ValidatorConfig,
    baseline: Option<&'a Baseline>,
}

impl<'a> ArrangementFixer<'a> {
    /// Create a new fixer
    pub fn new(config: &'a ValidatorConfig) -> Self {
        Self {
            config,
            baseline: None,
        }
    }

    /// Validate against this baseline after fixing
    pub fn with_baseline(mut self, baseline: &'a Baseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Target position for every object, in placement order
    pub fn plan(&self, arrangement: &Arrangement) -> Result<Vec<(String, Vec3)>> {
        let mut spheres: Vec<&SceneObject> = arrangement.spheres().collect();
        if spheres.is_empty() {
            return Err(AstroError::FixUnavailable(
                "arrangement has no spheres to measure spacing from".to_string(),
            ));
        }
        spheres.sort_by(|a, b| by_distance(a, b));

        let radius = spheres
            .last()
            .map(|s| s.distance_from_origin())
            .unwrap_or_default();
        if radius <= 0.0 {
            return Err(AstroError::FixUnavailable(
                "every sphere sits at the origin".to_string(),
            ));
        }
        let spacing = radius / spheres.len() as f64;

        let mut polyhedra: Vec<&SceneObject> = arrangement.polyhedra().collect();
        polyhedra.sort_by(|a, b| a.face_count.cmp(&b.face_count).then_with(|| by_distance(a, b)));

        Ok(spheres
            .into_iter()
            .chain(polyhedra)
            .enumerate()
            .map(|(k, obj)| (obj.id.clone(), Vec3::X * (spacing * (k + 1) as f64)))
            .collect())
    }

    /// Apply the fix to the arrangement and re-validate it.
    ///
    /// An arrangement whose spacing, ordering and line rules already hold is
    /// left where it is.
    pub fn fix(&self, arrangement: &mut Arrangement) -> Result<FixReport> {
        let current = self.validate(arrangement);
        if !needs_fix(&current) {
            tracing::debug!("arrangement already in order, nothing to move");
            return Ok(FixReport {
                actions: Vec::new(),
                remaining: current,
            });
        }

        let plan = self.plan(arrangement)?;
        let mut actions = Vec::new();

        for (id, to) in plan {
            let from = arrangement
                .get(&id)
                .map(|o| o.position)
                .ok_or_else(|| AstroError::ObjectNotFound(id.clone()))?;
            if from.distance(&to) <= MOVE_EPSILON {
                continue;
            }

            arrangement.set_position(&id, to)?;
            tracing::info!(object = %id, %from, %to, "moved");
            actions.push(FixAction { object: id, from, to });
        }

        let remaining = self.validate(arrangement);
        Ok(FixReport { actions, remaining })
    }

    /// Dry run: fix a copy and leave the arrangement untouched
    pub fn dry_run(&self, arrangement: &Arrangement) -> Result<FixReport> {
        let mut cloned = arrangement.clone();
        self.fix(&mut cloned)
    }

    fn validate(&self, arrangement: &Arrangement) -> ValidationReport {
        let mut validator = ArrangementValidator::new(arrangement, self.config);
        if let Some(baseline) = self.baseline {
            validator = validator.with_baseline(baseline);
        }
        validator.validate()
    }
}

/// Drift is never a reason to move objects: the layout cannot restore it.
fn needs_fix(report: &ValidationReport) -> bool {
    [
        Rule::EvenSpacing,
        Rule::SphereInsidePolyhedron,
        Rule::FaceCountMonotonic,
        Rule::Collinear,
    ]
    .into_iter()
    .any(|rule| report.outcome(rule).is_some_and(|outcome| !outcome.is_pass()))
}

fn by_distance(a: &SceneObject, b: &SceneObject) -> Ordering {
    a.distance_from_origin()
        .total_cmp(&b.distance_from_origin())
        .then_with(|| a.id.cmp(&b.id))
}
