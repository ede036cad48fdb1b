//! Arrangement rule evaluation

use crate::config::{Baseline, ValidatorConfig};
use crate::geometry::detect_axis;
use crate::report::{Finding, Outcome, ValidationReport};
use crate::types::Rule;
use astro_core::{Arrangement, SceneObject, Vec3};

/// Evaluates the arrangement rules against one arrangement
pub struct ArrangementValidator<'a> {
    arrangement: &'a Arrangement,
    config: &'a ValidatorConfig,
    baseline: Option<&'a Baseline>,
}

impl<'a> ArrangementValidator<'a> {
    /// Create a new validator
    pub fn new(arrangement: &'a Arrangement, config: &'a ValidatorConfig) -> Self {
        Self {
            arrangement,
            config,
            baseline: None,
        }
    }

    /// Check sphere distances against recorded values
    pub fn with_baseline(mut self, baseline: &'a Baseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Run every rule in order and return a validation report
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        for rule in Rule::ALL {
            let outcome = self.evaluate(rule);
            match outcome.finding() {
                Some(finding) => tracing::debug!(rule = rule.name(), %finding, "rule did not hold"),
                None => tracing::debug!(rule = rule.name(), "rule passed"),
            }
            report.push(rule, outcome);
        }

        report
    }

    /// Evaluate a single rule
    pub fn evaluate(&self, rule: Rule) -> Outcome {
        let finding = match rule {
            Rule::EvenSpacing => self.check_even_spacing(),
            Rule::SphereInsidePolyhedron => self.check_sphere_inside_polyhedron(),
            Rule::FaceCountMonotonic => self.check_face_count_monotonic(),
            Rule::SphereDistanceStable => self.check_sphere_distance_stable(),
            Rule::Collinear => self.check_collinear(),
        };

        match finding {
            Some(finding) => Outcome::for_rule(rule, finding),
            None => Outcome::Pass,
        }
    }

    /// Objects ordered along the detected axis.
    ///
    /// Without an axis (fewer than two distinct positions) the order is by
    /// distance from the origin.
    pub fn ordered_along_axis(&self) -> Vec<&'a SceneObject> {
        let mut ordered = self.arrangement.by_distance();
        let points: Vec<Vec3> = ordered.iter().map(|o| o.position).collect();

        if let Some(axis) = detect_axis(&points, self.config.tolerance.collinearity) {
            ordered.sort_by(|a, b| {
                axis.project(a.position)
                    .total_cmp(&axis.project(b.position))
                    .then_with(|| {
                        a.distance_from_origin()
                            .total_cmp(&b.distance_from_origin())
                    })
                    .then_with(|| a.id.cmp(&b.id))
            });
        }

        ordered
    }

    fn check_even_spacing(&self) -> Option<Finding> {
        let ordered = self.ordered_along_axis();
        if ordered.len() < 3 {
            return None;
        }

        let gaps: Vec<f64> = ordered
            .windows(2)
            .map(|w| w[0].position.distance(&w[1].position))
            .collect();
        let expected = gaps[0];

        gaps.iter()
            .enumerate()
            .skip(1)
            // A NaN difference counts as a mismatch
            .find(|(_, gap)| !((**gap - expected).abs() <= self.config.tolerance.spacing))
            .map(|(k, gap)| Finding::SpacingMismatch {
                first: ordered[k].id.clone(),
                second: ordered[k + 1].id.clone(),
                expected,
                actual: *gap,
            })
    }

    fn check_sphere_inside_polyhedron(&self) -> Option<Finding> {
        self.arrangement
            .pairs()
            .into_iter()
            .find(|(_, sphere, polyhedron)| {
                sphere.distance_from_origin() >= polyhedron.distance_from_origin()
            })
            .map(|(index, sphere, polyhedron)| Finding::OrderingViolation {
                index,
                sphere: sphere.id.clone(),
                polyhedron: polyhedron.id.clone(),
                sphere_distance: sphere.distance_from_origin(),
                polyhedron_distance: polyhedron.distance_from_origin(),
            })
    }

    fn check_face_count_monotonic(&self) -> Option<Finding> {
        let mut polyhedra: Vec<(&SceneObject, u32, f64)> = self
            .arrangement
            .polyhedra()
            .filter_map(|p| p.face_count.map(|faces| (p, faces, p.distance_from_origin())))
            .collect();
        polyhedra.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| a.2.total_cmp(&b.2))
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        // Farthest polyhedron among those with strictly fewer faces than the
        // current group, and the farthest within the current group.
        let mut farthest_below: Option<(&SceneObject, u32, f64)> = None;
        let mut group_farthest: Option<(&SceneObject, u32, f64)> = None;

        for entry in polyhedra {
            let (current, faces, distance) = entry;

            if let Some(group) = group_farthest {
                if group.1 != faces {
                    farthest_below = match farthest_below {
                        Some(below) if below.2 >= group.2 => Some(below),
                        _ => Some(group),
                    };
                }
            }

            if let Some((fewer, fewer_faces, fewer_distance)) = farthest_below {
                if distance <= fewer_distance {
                    return Some(Finding::MonotonicityViolation {
                        fewer: fewer.id.clone(),
                        fewer_faces,
                        fewer_distance,
                        more: current.id.clone(),
                        more_faces: faces,
                        more_distance: distance,
                    });
                }
            }

            // Sorted by distance within a face count, so the latest is the farthest
            group_farthest = Some(entry);
        }

        None
    }

    fn check_sphere_distance_stable(&self) -> Option<Finding> {
        let baseline = match self.baseline {
            Some(baseline) => baseline,
            None => {
                tracing::debug!("no baseline, sphere distances not checked");
                return None;
            }
        };

        for (index, _) in baseline.iter() {
            if !self.arrangement.spheres().any(|s| s.index == index) {
                tracing::debug!(index, "baseline entry has no sphere in the scene");
            }
        }

        for sphere in self.sorted_spheres() {
            let expected = match baseline.expected(sphere.index) {
                Some(expected) => expected,
                None => {
                    tracing::debug!(sphere = %sphere.id, "no recorded distance, skipping");
                    continue;
                }
            };
            let actual = sphere.distance_from_origin();
            if (actual - expected).abs() > self.config.tolerance.drift {
                return Some(Finding::DriftDetected {
                    index: sphere.index,
                    sphere: sphere.id.clone(),
                    expected,
                    actual,
                });
            }
        }

        None
    }

    fn check_collinear(&self) -> Option<Finding> {
        if self.arrangement.len() < 3 {
            return None;
        }

        let ordered = self.arrangement.by_distance();
        let points: Vec<Vec3> = ordered.iter().map(|o| o.position).collect();
        let tolerance = self.config.tolerance.collinearity;
        let axis = detect_axis(&points, tolerance)?;

        let outliers: Vec<(&SceneObject, f64)> = ordered
            .into_iter()
            .map(|o| (o, axis.deviation(o.position)))
            .filter(|(_, deviation)| *deviation > tolerance)
            .collect();

        outliers.first().map(|(object, deviation)| Finding::NotCollinear {
            object: object.id.clone(),
            deviation: *deviation,
            outliers: outliers.len(),
        })
    }

    fn sorted_spheres(&self) -> Vec<&'a SceneObject> {
        let mut spheres: Vec<&SceneObject> = self.arrangement.spheres().collect();
        spheres.sort_by(|a, b| a.index.cmp(&b.index));
        spheres
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tolerances;
    use approx::assert_relative_eq;

    fn x(v: f64) -> Vec3 {
        Vec3::new(v, 0.0, 0.0)
    }

    /// Spheres and polyhedra interleaved one unit apart along +X
    fn even_line(pairs: u32) -> Arrangement {
        let mut objects = Vec::new();
        for i in 0..pairs {
            let base = (2 * i + 1) as f64;
            objects.push(SceneObject::sphere(format!("pSphere{}", i), i, x(base)));
            objects.push(SceneObject::polyhedron(
                format!("pSolid{}", i),
                i,
                x(base + 1.0),
                4 + 2 * i,
            ));
        }
        Arrangement::new(objects).unwrap()
    }

    fn config(tolerance: f64) -> ValidatorConfig {
        ValidatorConfig {
            tolerance: Tolerances {
                spacing: tolerance,
                collinearity: tolerance,
                drift: tolerance,
            },
        }
    }

    #[test]
    fn test_well_formed_arrangement_passes() {
        let arrangement = even_line(3);
        let config = ValidatorConfig::default();
        let baseline = Baseline::record(&arrangement);

        let report = ArrangementValidator::new(&arrangement, &config)
            .with_baseline(&baseline)
            .validate();

        assert_eq!(report.results.len(), 5);
        assert!(report.results.iter().all(|r| r.outcome.is_pass()));
        let rules: Vec<_> = report.results.iter().map(|r| r.rule).collect();
        assert_eq!(rules, Rule::ALL.to_vec());
    }

    #[test]
    fn test_even_spacing_passes_for_synthetic_lines() {
        let config = config(1e-6);
        for (dir, step, start) in [
            (Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0),
            (Vec3::new(0.0, -1.0, 0.0), 2.5, 0.5),
            (Vec3::new(1.0, 2.0, 2.0).normalized(), 0.75, 3.0),
        ] {
            for n in 1..=4u32 {
                let mut objects = Vec::new();
                for i in 0..n {
                    let s = start + step * (2 * i) as f64;
                    objects.push(SceneObject::sphere(format!("s{}", i), i, dir * s));
                    objects.push(SceneObject::polyhedron(
                        format!("p{}", i),
                        i,
                        dir * (s + step),
                        4 + i,
                    ));
                }
                let arrangement = Arrangement::new(objects).unwrap();
                let validator = ArrangementValidator::new(&arrangement, &config);
                assert_eq!(validator.evaluate(Rule::EvenSpacing), Outcome::Pass);
            }
        }
    }

    #[test]
    fn test_even_spacing_along_line_not_through_origin() {
        let objects = vec![
            SceneObject::sphere("a", 0, Vec3::new(-1.0, 5.0, 0.0)),
            SceneObject::polyhedron("b", 0, Vec3::new(1.0, 5.0, 0.0), 4),
            SceneObject::sphere("c", 1, Vec3::new(3.0, 5.0, 0.0)),
            SceneObject::polyhedron("d", 1, Vec3::new(5.0, 5.0, 0.0), 6),
        ];
        let arrangement = Arrangement::new(objects).unwrap();
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert_eq!(validator.evaluate(Rule::EvenSpacing), Outcome::Pass);
    }

    #[test]
    fn test_spacing_mismatch_names_pair() {
        let mut arrangement = even_line(2);
        arrangement.set_position("pSolid1", x(4.5)).unwrap();
        let config = config(0.01);

        let outcome = ArrangementValidator::new(&arrangement, &config).evaluate(Rule::EvenSpacing);
        match outcome {
            Outcome::Fail(Finding::SpacingMismatch {
                first,
                second,
                expected,
                actual,
            }) => {
                assert_eq!(first, "pSphere1");
                assert_eq!(second, "pSolid1");
                assert_relative_eq!(expected, 1.0);
                assert_relative_eq!(actual, 1.5);
            }
            other => panic!("expected spacing mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_spacing_within_tolerance() {
        let mut arrangement = even_line(2);
        arrangement.set_position("pSolid1", x(4.05)).unwrap();
        let config = config(0.1);
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert!(validator.evaluate(Rule::EvenSpacing).is_pass());
    }

    #[test]
    fn test_two_objects_are_always_evenly_spaced() {
        let arrangement = even_line(1);
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert!(validator.evaluate(Rule::EvenSpacing).is_pass());
        assert!(validator.evaluate(Rule::Collinear).is_pass());
    }

    #[test]
    fn test_sphere_outside_polyhedron_fails_with_index() {
        let arrangement = Arrangement::new(vec![
            SceneObject::sphere("pSphere0", 0, x(3.0)),
            SceneObject::polyhedron("pSolid0", 0, x(2.0), 4),
            SceneObject::sphere("pSphere1", 1, x(4.0)),
            SceneObject::polyhedron("pSolid1", 1, x(5.0), 6),
        ])
        .unwrap();
        let config = ValidatorConfig::default();

        let outcome = ArrangementValidator::new(&arrangement, &config)
            .evaluate(Rule::SphereInsidePolyhedron);
        assert!(matches!(
            outcome,
            Outcome::Fail(Finding::OrderingViolation { index: 0, .. })
        ));
    }

    #[test]
    fn test_sphere_at_same_distance_as_polyhedron_fails() {
        let arrangement = Arrangement::new(vec![
            SceneObject::sphere("pSphere0", 0, x(2.0)),
            SceneObject::polyhedron("pSolid0", 0, Vec3::new(0.0, 2.0, 0.0), 4),
        ])
        .unwrap();
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert!(!validator.evaluate(Rule::SphereInsidePolyhedron).is_pass());
    }

    fn polyhedra_at(faces_and_distances: &[(u32, f64)]) -> Arrangement {
        let mut objects = Vec::new();
        for (i, (faces, distance)) in faces_and_distances.iter().enumerate() {
            let i = i as u32;
            objects.push(SceneObject::sphere(format!("pSphere{}", i), i, x(0.1 * (i + 1) as f64)));
            objects.push(SceneObject::polyhedron(
                format!("pSolid{}", i),
                i,
                x(*distance),
                *faces,
            ));
        }
        Arrangement::new(objects).unwrap()
    }

    #[test]
    fn test_face_count_inversion() {
        let arrangement = polyhedra_at(&[(4, 3.0), (6, 2.0), (8, 5.0)]);
        let config = ValidatorConfig::default();

        let outcome = ArrangementValidator::new(&arrangement, &config)
            .evaluate(Rule::FaceCountMonotonic);
        match outcome {
            Outcome::Fail(Finding::MonotonicityViolation {
                fewer,
                fewer_faces,
                more,
                more_faces,
                ..
            }) => {
                assert_eq!(fewer, "pSolid0");
                assert_eq!(fewer_faces, 4);
                assert_eq!(more, "pSolid1");
                assert_eq!(more_faces, 6);
            }
            other => panic!("expected monotonicity violation, got {:?}", other),
        }
    }

    #[test]
    fn test_face_count_monotonic_passes() {
        let arrangement = polyhedra_at(&[(8, 5.0), (4, 2.0), (6, 3.0)]);
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert!(validator.evaluate(Rule::FaceCountMonotonic).is_pass());
    }

    #[test]
    fn test_face_count_inversion_across_groups() {
        let arrangement = polyhedra_at(&[(4, 2.0), (6, 6.0), (8, 5.5)]);
        let config = ValidatorConfig::default();

        let outcome = ArrangementValidator::new(&arrangement, &config)
            .evaluate(Rule::FaceCountMonotonic);
        match outcome {
            Outcome::Fail(Finding::MonotonicityViolation { fewer, more, .. }) => {
                assert_eq!(fewer, "pSolid1");
                assert_eq!(more, "pSolid2");
            }
            other => panic!("expected monotonicity violation, got {:?}", other),
        }
    }

    #[test]
    fn test_uneven_spacing_with_huge_coordinates() {
        let arrangement = Arrangement::new(vec![
            SceneObject::sphere("pSphere0", 0, x(1e200)),
            SceneObject::polyhedron("pSolid0", 0, x(2e200), 4),
            SceneObject::sphere("pSphere1", 1, x(3e200)),
            SceneObject::polyhedron("pSolid1", 1, x(5e200), 6),
        ])
        .unwrap();
        let config = ValidatorConfig::default();

        let outcome = ArrangementValidator::new(&arrangement, &config).evaluate(Rule::EvenSpacing);
        assert!(matches!(outcome, Outcome::Fail(Finding::SpacingMismatch { .. })));
    }

    #[test]
    fn test_equal_face_counts_impose_no_order() {
        let arrangement = polyhedra_at(&[(6, 4.0), (6, 2.0), (12, 5.0)]);
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert!(validator.evaluate(Rule::FaceCountMonotonic).is_pass());
    }

    #[test]
    fn test_inversion_against_farthest_of_a_tied_group() {
        // The 12-face solid beats the closer 6-face solid but not the farther one
        let arrangement = polyhedra_at(&[(6, 4.0), (6, 2.0), (12, 3.0)]);
        let config = ValidatorConfig::default();

        let outcome = ArrangementValidator::new(&arrangement, &config)
            .evaluate(Rule::FaceCountMonotonic);
        assert!(matches!(
            outcome,
            Outcome::Fail(Finding::MonotonicityViolation { ref fewer, ref more, .. })
                if fewer == "pSolid0" && more == "pSolid2"
        ));
    }

    #[test]
    fn test_drift_detected() {
        let arrangement = Arrangement::new(vec![
            SceneObject::sphere("pSphere0", 0, Vec3::new(0.0, 5.2, 0.0)),
            SceneObject::polyhedron("pSolid0", 0, Vec3::new(0.0, 8.0, 0.0), 4),
        ])
        .unwrap();
        let mut baseline = Baseline::new();
        baseline.insert(0, 5.0);
        let config = config(0.1);

        let outcome = ArrangementValidator::new(&arrangement, &config)
            .with_baseline(&baseline)
            .evaluate(Rule::SphereDistanceStable);
        match outcome {
            Outcome::Fail(Finding::DriftDetected {
                index,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(index, 0);
                assert_relative_eq!(expected, 5.0);
                assert_relative_eq!(actual, 5.2, epsilon = 1e-12);
            }
            other => panic!("expected drift, got {:?}", other),
        }
    }

    #[test]
    fn test_drift_within_tolerance_and_unrecorded_spheres() {
        let arrangement = even_line(2);
        let mut baseline = Baseline::new();
        baseline.insert(0, 1.05);
        baseline.insert(9, 100.0);
        let config = config(0.1);

        let validator = ArrangementValidator::new(&arrangement, &config).with_baseline(&baseline);
        assert!(validator.evaluate(Rule::SphereDistanceStable).is_pass());
    }

    #[test]
    fn test_no_baseline_passes_stability() {
        let arrangement = even_line(2);
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert!(validator.evaluate(Rule::SphereDistanceStable).is_pass());
    }

    #[test]
    fn test_offset_object_warns() {
        let arrangement = Arrangement::new(vec![
            SceneObject::sphere("pSphere0", 0, x(1.0)),
            SceneObject::polyhedron("pSolid0", 0, x(2.0), 4),
            SceneObject::sphere("pSphere1", 1, x(3.0)),
            SceneObject::polyhedron("pSolid1", 1, Vec3::new(4.0, 1.0, 0.0), 6),
        ])
        .unwrap();
        let config = ValidatorConfig::default();

        let report = ArrangementValidator::new(&arrangement, &config).validate();
        match report.outcome(Rule::Collinear) {
            Some(Outcome::Warn(Finding::NotCollinear {
                object,
                deviation,
                outliers,
            })) => {
                assert_eq!(object, "pSolid1");
                assert_relative_eq!(*deviation, 1.0, epsilon = 1e-12);
                assert_eq!(*outliers, 1);
            }
            other => panic!("expected collinearity warning, got {:?}", other),
        }
        assert!(report.warn_count() == 1);
    }

    #[test]
    fn test_collinearity_never_fails() {
        let arrangement = Arrangement::new(vec![
            SceneObject::sphere("pSphere0", 0, x(1.0)),
            SceneObject::polyhedron("pSolid0", 0, Vec3::new(0.0, 2.0, 0.0), 4),
            SceneObject::sphere("pSphere1", 1, Vec3::new(0.0, 0.0, 3.0)),
            SceneObject::polyhedron("pSolid1", 1, Vec3::new(-4.0, -4.0, 0.0), 6),
        ])
        .unwrap();
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert!(matches!(validator.evaluate(Rule::Collinear), Outcome::Warn(_)));
    }

    #[test]
    fn test_validate_is_deterministic() {
        let mut arrangement = even_line(3);
        arrangement.set_position("pSphere2", Vec3::new(5.0, 0.3, 0.0)).unwrap();
        let config = ValidatorConfig::default();
        let validator = ArrangementValidator::new(&arrangement, &config);
        assert_eq!(validator.validate(), validator.validate());
    }

    #[test]
    fn test_empty_arrangement_passes() {
        let arrangement = Arrangement::new(Vec::new()).unwrap();
        let config = ValidatorConfig::default();
        let report = ArrangementValidator::new(&arrangement, &config).validate();
        assert_eq!(report.pass_count(), 5);
    }
}
