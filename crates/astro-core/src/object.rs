//! Scene objects as seen by the validator

use crate::types::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name prefix the host application gives sphere transforms
const SPHERE_PREFIX: &str = "pSphere";
/// Name prefix the host application gives polyhedron ("platonic solid") transforms
const POLYHEDRON_PREFIX: &str = "pSolid";

/// The kind of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Sphere,
    Polyhedron,
}

impl ObjectKind {
    /// Parse a kind name as written in scene files
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" => Some(ObjectKind::Sphere),
            "polyhedron" | "solid" => Some(ObjectKind::Polyhedron),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Sphere => "sphere",
            ObjectKind::Polyhedron => "polyhedron",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infer an object's kind from its host name (`pSphere3`, `|group|pSolid1`)
pub fn infer_kind(name: &str) -> Option<ObjectKind> {
    if name.contains(SPHERE_PREFIX) {
        Some(ObjectKind::Sphere)
    } else if name.contains(POLYHEDRON_PREFIX) {
        Some(ObjectKind::Polyhedron)
    } else {
        None
    }
}

/// Infer an object's pairing index from the trailing digits of its name
pub fn infer_index(name: &str) -> Option<u32> {
    let digits = name.len() - name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    name[name.len() - digits..].parse().ok()
}

/// A single sphere or polyhedron extracted from the host scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: String,
    pub kind: ObjectKind,
    /// Pairs a sphere with the polyhedron of the same index
    pub index: u32,
    pub position: Vec3,
    /// Number of faces, polyhedra only
    pub face_count: Option<u32>,
}

impl SceneObject {
    pub fn sphere(id: impl Into<String>, index: u32, position: Vec3) -> Self {
        Self {
            id: id.into(),
            kind: ObjectKind::Sphere,
            index,
            position,
            face_count: None,
        }
    }

    pub fn polyhedron(id: impl Into<String>, index: u32, position: Vec3, face_count: u32) -> Self {
        Self {
            id: id.into(),
            kind: ObjectKind::Polyhedron,
            index,
            position,
            face_count: Some(face_count),
        }
    }

    pub fn is_sphere(&self) -> bool {
        self.kind == ObjectKind::Sphere
    }

    pub fn is_polyhedron(&self) -> bool {
        self.kind == ObjectKind::Polyhedron
    }

    /// Distance from the origin (0,0,0)
    pub fn distance_from_origin(&self) -> f64 {
        self.position.length()
    }
}
