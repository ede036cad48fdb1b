//! Scene validation command

use anyhow::{Context, Result};
use astro_core::Arrangement;
use astro_scene::{load_scene, SceneDocument};
use astro_validate::{
    compute_scene_diff, ArrangementFixer, ArrangementValidator, Baseline, FixAction, Outcome,
    ValidationReport, ValidatorConfig,
};
use std::fs;

const DEFAULT_CONFIG: &str = "astro.toml";

pub struct ValidateArgs {
    pub scene: String,
    pub config: Option<String>,
    pub baseline: Option<String>,
    pub fix: bool,
    pub dry_run: bool,
    pub output_diff: bool,
    pub format: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ValidatorConfig::load_file(path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => ValidatorConfig::load_or_default(DEFAULT_CONFIG)?,
    };

    let baseline = match &args.baseline {
        Some(path) => Some(
            Baseline::load_file(path).with_context(|| format!("Failed to load baseline {}", path))?,
        ),
        None => None,
    };

    let (mut arrangement, _scene_file) = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene))?;
    tracing::debug!(objects = arrangement.len(), scene = %args.scene, "scene loaded");

    let json = args.format == "json";

    let (report, fix_output) = if args.fix || args.dry_run {
        let mut fixer = ArrangementFixer::new(&config);
        if let Some(baseline) = &baseline {
            fixer = fixer.with_baseline(baseline);
        }

        let before = fs::read_to_string(&args.scene)
            .with_context(|| format!("Failed to read scene {}", args.scene))?;
        let (remaining, mut output, doc) =
            fix_scene(&fixer, &mut arrangement, &before, args.dry_run, args.output_diff)?;

        if !args.dry_run && !output.actions.is_empty() {
            doc.save(&args.scene)?;
            output.saved = true;
        }
        (remaining, Some(output))
    } else {
        let mut validator = ArrangementValidator::new(&arrangement, &config);
        if let Some(baseline) = &baseline {
            validator = validator.with_baseline(baseline);
        }
        (validator.validate(), None)
    };

    if json {
        print_report_json(&report, fix_output.as_ref())?;
    } else {
        if let Some(output) = &fix_output {
            print_fix_text(output, &args.scene);
        }
        print_report_text(&report);
    }

    for result in &report.results {
        if let Outcome::Warn(finding) = &result.outcome {
            tracing::warn!(rule = result.rule.name(), "{}", finding);
        }
    }

    let code = report.status().exit_code();
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// What a fix or dry run did to the scene file
struct FixOutput {
    actions: Vec<FixAction>,
    dry_run: bool,
    saved: bool,
    diff: Option<String>,
}

/// Run the fixer (or a dry run) and patch the moves into the scene text
fn fix_scene(
    fixer: &ArrangementFixer,
    arrangement: &mut Arrangement,
    before: &str,
    dry_run: bool,
    output_diff: bool,
) -> Result<(ValidationReport, FixOutput, SceneDocument)> {
    let fix_report = if dry_run {
        fixer.dry_run(arrangement)?
    } else {
        fixer.fix(arrangement)?
    };

    let mut doc = SceneDocument::parse(before)?;
    for action in &fix_report.actions {
        doc.patch_position(&action.object, action.to)?;
    }
    let diff = output_diff.then(|| compute_scene_diff(before, &doc.to_string()));

    let output = FixOutput {
        actions: fix_report.actions,
        dry_run,
        saved: false,
        diff,
    };
    Ok((fix_report.remaining, output, doc))
}

fn print_fix_text(output: &FixOutput, scene: &str) {
    let verb = if output.dry_run {
        println!("Dry run results:");
        "would be moved"
    } else {
        println!("Fix results:");
        "moved"
    };

    if output.actions.is_empty() {
        println!("  Arrangement already in place.");
    } else {
        for action in &output.actions {
            println!(
                "  {} {}: {} -> {}",
                action.object, verb, action.from, action.to
            );
        }
    }

    if output.saved {
        println!("\nScene saved to {}", scene);
    }

    if let Some(diff) = &output.diff {
        println!("\nDiff:");
        print!("{}", diff);
    }
    println!();
}

fn print_report_text(report: &ValidationReport) {
    println!("{}", report.summary());
    println!();

    for result in &report.results {
        match &result.outcome {
            Outcome::Pass => println!("  [PASS ] {}", result.rule),
            Outcome::Fail(finding) => println!("  [FAIL ] {}: {}", result.rule, finding),
            Outcome::Warn(finding) => println!("  [WARN ] {}: {}", result.rule, finding),
        }
    }
}

fn print_report_json(report: &ValidationReport, fix: Option<&FixOutput>) -> Result<()> {
    let output = report_json(report, fix);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn report_json(report: &ValidationReport, fix: Option<&FixOutput>) -> serde_json::Value {
    let rules: Vec<serde_json::Value> = report
        .results
        .iter()
        .map(|r| {
            let (result, finding) = match &r.outcome {
                Outcome::Pass => ("pass", None),
                Outcome::Fail(f) => ("fail", Some(f)),
                Outcome::Warn(f) => ("warn", Some(f)),
            };
            serde_json::json!({
                "rule": r.rule.name(),
                "description": r.rule.description(),
                "result": result,
                "code": finding.map(|f| f.code()),
                "object": finding.map(|f| f.object()),
                "message": finding.map(|f| f.to_string()),
            })
        })
        .collect();

    let mut output = serde_json::json!({
        "status": report.status().as_str(),
        "valid": report.is_valid(),
        "summary": report.summary(),
        "failures": report.fail_count(),
        "warnings": report.warn_count(),
        "rules": rules,
    });

    if let Some(fix) = fix {
        let actions: Vec<serde_json::Value> = fix
            .actions
            .iter()
            .map(|a| {
                serde_json::json!({
                    "object": a.object,
                    "from": a.from.to_array(),
                    "to": a.to.to_array(),
                })
            })
            .collect();
        output["fix"] = serde_json::json!({
            "dry_run": fix.dry_run,
            "saved": fix.saved,
            "actions": actions,
            "diff": fix.diff,
        });
    }

    output
}
