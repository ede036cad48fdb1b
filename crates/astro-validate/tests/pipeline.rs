//! Load, validate, fix and save a scene end to end

use astro_scene::{load_scene, load_scene_string, SceneDocument};
use astro_validate::{
    compute_scene_diff, has_changes, ArrangementFixer, ArrangementValidator, Baseline, Finding,
    Outcome, Rule, Status, ValidatorConfig,
};

const SCRAMBLED: &str = r#"# Publish candidate
[scene]
name = "Orrery"

[objects.pSphere0]
position = [3.0, 0.0, 0.0]

[objects.pSolid0]
position = [2.0, 0.0, 0.0]
faces = 4

[objects.pSphere1]
position = [0.0, 1.0, 0.0]

[objects.pSolid1]
position = [0.0, 0.0, 6.0]
faces = 6
"#;

#[test]
fn test_scrambled_scene_fails_then_fix_passes() {
    let config = ValidatorConfig::default();
    let (mut arrangement, _) = load_scene_string(SCRAMBLED).unwrap();

    let report = ArrangementValidator::new(&arrangement, &config).validate();
    assert_eq!(report.status(), Status::Fail);
    assert!(matches!(
        report.outcome(Rule::SphereInsidePolyhedron),
        Some(Outcome::Fail(Finding::OrderingViolation { index: 0, .. }))
    ));
    assert!(matches!(report.outcome(Rule::Collinear), Some(Outcome::Warn(_))));

    let fix = ArrangementFixer::new(&config).fix(&mut arrangement).unwrap();
    assert_eq!(fix.remaining.status(), Status::Pass);

    let mut doc = SceneDocument::parse(SCRAMBLED).unwrap();
    for action in &fix.actions {
        doc.patch_position(&action.object, action.to).unwrap();
    }
    let fixed_text = doc.to_string();
    assert!(fixed_text.starts_with("# Publish candidate"));

    let diff = compute_scene_diff(SCRAMBLED, &fixed_text);
    assert!(has_changes(&diff));
    assert!(diff.contains("  faces = 6"));

    let (reloaded, _) = load_scene_string(&fixed_text).unwrap();
    let again = ArrangementValidator::new(&reloaded, &config).validate();
    assert!(again.results.iter().all(|r| r.outcome.is_pass()));
}

#[test]
fn test_recorded_baseline_detects_later_drift() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("orrery.toml");
    let baseline_path = dir.path().join("baseline.toml");

    let good = r#"
[scene]
name = "Orrery"

[objects.pSphere0]
position = [1.0, 0.0, 0.0]

[objects.pSolid0]
position = [2.0, 0.0, 0.0]
faces = 4

[objects.pSphere1]
position = [3.0, 0.0, 0.0]

[objects.pSolid1]
position = [4.0, 0.0, 0.0]
faces = 8
"#;
    std::fs::write(&scene_path, good).unwrap();
    let (arrangement, _) = load_scene(&scene_path).unwrap();
    Baseline::record(&arrangement).save(&baseline_path).unwrap();

    let mut doc = SceneDocument::from_file(&scene_path).unwrap();
    doc.patch_position("pSphere1", astro_core::Vec3::new(3.2, 0.0, 0.0))
        .unwrap();
    doc.save(&scene_path).unwrap();

    let config = ValidatorConfig::load_string("[tolerance]\ndrift = 0.1\nspacing = 0.5").unwrap();
    let baseline = Baseline::load_file(&baseline_path).unwrap();
    let (drifted, _) = load_scene(&scene_path).unwrap();

    let report = ArrangementValidator::new(&drifted, &config)
        .with_baseline(&baseline)
        .validate();
    match report.outcome(Rule::SphereDistanceStable) {
        Some(Outcome::Fail(Finding::DriftDetected { index, sphere, .. })) => {
            assert_eq!(*index, 1);
            assert_eq!(sphere, "pSphere1");
        }
        other => panic!("expected drift, got {:?}", other),
    }
    assert!(report.outcome(Rule::EvenSpacing).unwrap().is_pass());
}
