//! Baseline recording command

use anyhow::{Context, Result};
use astro_scene::load_scene;
use astro_validate::Baseline;

pub fn run(scene: &str, output: &str) -> Result<()> {
    let (arrangement, _) =
        load_scene(scene).with_context(|| format!("Failed to load scene {}", scene))?;

    let baseline = Baseline::record(&arrangement);
    baseline
        .save(output)
        .with_context(|| format!("Failed to write baseline {}", output))?;

    println!(
        "Recorded {} sphere distance(s) to {}",
        baseline.len(),
        output
    );
    for (index, distance) in baseline.iter() {
        println!("  sphere {}: {:.4}", index, distance);
    }

    Ok(())
}
