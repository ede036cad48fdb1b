//! Astro Validate - Arrangement rules and auto-fix
//!
//! This crate checks the spatial arrangement of spheres and polyhedra
//! against five fixed rules and can reposition objects to satisfy them.

mod config;
mod diff;
mod evaluator;
mod fixer;
pub mod geometry;
mod report;
mod types;

pub use config::{Baseline, ValidatorConfig};
pub use diff::{compute_scene_diff, has_changes};
pub use evaluator::ArrangementValidator;
pub use fixer::{ArrangementFixer, FixAction, FixReport};
pub use report::{Finding, Outcome, RuleResult, Status, ValidationReport};
pub use types::{Rule, Severity, Tolerances};
