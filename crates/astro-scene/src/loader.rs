//! Scene loading from TOML files

use crate::format::{ObjectDef, SceneFile};
use astro_core::{infer_index, infer_kind, Arrangement, AstroError, ObjectKind, Result, SceneObject};
use std::fs;
use std::path::Path;

/// Load an arrangement from a scene file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(Arrangement, SceneFile)> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading scene");
    let content = fs::read_to_string(path)?;
    load_scene_string(&content)
}

/// Load an arrangement from a TOML string
pub fn load_scene_string(content: &str) -> Result<(Arrangement, SceneFile)> {
    let scene_file: SceneFile = toml::from_str(content)?;
    let arrangement = scene_file_to_arrangement(&scene_file)?;
    Ok((arrangement, scene_file))
}

/// Convert the objects of a scene file into a checked arrangement
pub fn scene_file_to_arrangement(scene_file: &SceneFile) -> Result<Arrangement> {
    let objects = scene_file
        .objects
        .iter()
        .map(|(name, def)| object_from_def(name, def))
        .collect::<Result<Vec<_>>>()?;

    Arrangement::new(objects)
}

fn object_from_def(name: &str, def: &ObjectDef) -> Result<SceneObject> {
    let kind = match &def.kind {
        Some(kind) => ObjectKind::parse(kind).ok_or_else(|| AstroError::UnknownKind {
            object: name.to_string(),
            kind: kind.clone(),
        })?,
        None => infer_kind(name).ok_or_else(|| AstroError::UnknownKind {
            object: name.to_string(),
            kind: "<unspecified>".to_string(),
        })?,
    };

    let index = def
        .index
        .or_else(|| infer_index(name))
        .ok_or_else(|| AstroError::MissingIndex(name.to_string()))?;

    let face_count = match kind {
        ObjectKind::Polyhedron => def.faces,
        ObjectKind::Sphere => {
            if def.faces.is_some() {
                tracing::debug!(object = name, "ignoring face count on sphere");
            }
            None
        }
    };

    Ok(SceneObject {
        id: name.to_string(),
        kind,
        index,
        position: def.position,
        face_count,
    })
}
