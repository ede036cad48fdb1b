//! Scene file format definitions

use astro_core::Vec3;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Root structure of a scene TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    pub scene: SceneMetadata,
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectDef>,
}

/// Scene metadata
#[derive(Debug, Clone, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Definition of an object in a scene file.
///
/// `kind` and `index` may be left out when the object name follows the
/// host convention (`pSphere<N>`, `pSolid<N>`).
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDef {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub index: Option<u32>,
    /// Host transforms default to the origin
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub faces: Option<u32>,
}
