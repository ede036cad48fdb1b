//! Per-object distance listing

use anyhow::{Context, Result};
use astro_core::SceneObject;
use astro_scene::load_scene;
use serde::Serialize;

#[derive(Serialize)]
struct ObjectRow<'a> {
    id: &'a str,
    kind: &'static str,
    index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    faces: Option<u32>,
    position: [f64; 3],
    distance: f64,
}

impl<'a> From<&'a SceneObject> for ObjectRow<'a> {
    fn from(obj: &'a SceneObject) -> Self {
        Self {
            id: &obj.id,
            kind: obj.kind.as_str(),
            index: obj.index,
            faces: obj.face_count,
            position: obj.position.to_array(),
            distance: obj.distance_from_origin(),
        }
    }
}

pub fn run(scene: &str, format: &str) -> Result<()> {
    let (arrangement, scene_file) =
        load_scene(scene).with_context(|| format!("Failed to load scene {}", scene))?;

    let rows: Vec<ObjectRow> = arrangement
        .by_distance()
        .into_iter()
        .map(ObjectRow::from)
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Scene '{}': {} object(s), {} pair(s)",
        scene_file.scene.name,
        arrangement.len(),
        arrangement.pairs().len()
    );
    println!();
    println!(
        "  {:<20} {:<11} {:>5} {:>5} {:>10}",
        "object", "kind", "index", "faces", "distance"
    );
    for row in &rows {
        let faces = row.faces.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<20} {:<11} {:>5} {:>5} {:>10.4}",
            row.id, row.kind, row.index, faces, row.distance
        );
    }

    Ok(())
}
