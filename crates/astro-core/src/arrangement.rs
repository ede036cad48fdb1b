//! A structurally checked set of scene objects

use crate::error::{AstroError, Result};
use crate::object::{ObjectKind, SceneObject};
use crate::types::Vec3;
use std::collections::{BTreeMap, BTreeSet};

/// All spheres and polyhedra of one scene, arranged around the origin.
///
/// Construction checks the structure of the input (unique ids, one sphere
/// and one polyhedron per index, face counts on polyhedra). Objects are
/// kept sorted by id so every pass over them is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    objects: Vec<SceneObject>,
}

impl Arrangement {
    /// Build an arrangement, rejecting malformed input
    pub fn new(mut objects: Vec<SceneObject>) -> Result<Self> {
        objects.sort_by(|a, b| a.id.cmp(&b.id));

        for pair in objects.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(AstroError::DuplicateObject(pair[0].id.clone()));
            }
        }

        let mut spheres = BTreeSet::new();
        let mut polyhedra = BTreeSet::new();

        for obj in &objects {
            if !obj.position.is_finite() {
                return Err(AstroError::NonFinitePosition(obj.id.clone()));
            }

            let seen = match obj.kind {
                ObjectKind::Sphere => &mut spheres,
                ObjectKind::Polyhedron => {
                    if obj.face_count.is_none() {
                        return Err(AstroError::MissingFaceCount(obj.id.clone()));
                    }
                    &mut polyhedra
                }
            };

            if !seen.insert(obj.index) {
                return Err(AstroError::DuplicateIndex {
                    kind: obj.kind.to_string(),
                    index: obj.index,
                });
            }
        }

        if let Some(index) = spheres.difference(&polyhedra).next() {
            return Err(AstroError::UnpairedIndex {
                kind: ObjectKind::Sphere.to_string(),
                index: *index,
            });
        }
        if let Some(index) = polyhedra.difference(&spheres).next() {
            return Err(AstroError::UnpairedIndex {
                kind: ObjectKind::Polyhedron.to_string(),
                index: *index,
            });
        }

        tracing::debug!(
            objects = objects.len(),
            pairs = spheres.len(),
            "arrangement built"
        );

        Ok(Self { objects })
    }

    /// All objects, sorted by id
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects
            .binary_search_by(|o| o.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.objects[i])
    }

    /// Move an object. Only positions may change after construction.
    pub fn set_position(&mut self, id: &str, position: Vec3) -> Result<()> {
        if !position.is_finite() {
            return Err(AstroError::NonFinitePosition(id.to_string()));
        }
        let i = self
            .objects
            .binary_search_by(|o| o.id.as_str().cmp(id))
            .map_err(|_| AstroError::ObjectNotFound(id.to_string()))?;
        self.objects[i].position = position;
        Ok(())
    }

    pub fn spheres(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.is_sphere())
    }

    pub fn polyhedra(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.is_polyhedron())
    }

    /// Sphere/polyhedron pairs ordered by index
    pub fn pairs(&self) -> Vec<(u32, &SceneObject, &SceneObject)> {
        let mut by_index: BTreeMap<u32, (Option<&SceneObject>, Option<&SceneObject>)> =
            BTreeMap::new();
        for obj in &self.objects {
            let slot = by_index.entry(obj.index).or_default();
            match obj.kind {
                ObjectKind::Sphere => slot.0 = Some(obj),
                ObjectKind::Polyhedron => slot.1 = Some(obj),
            }
        }

        by_index
            .into_iter()
            .filter_map(|(index, pair)| match pair {
                (Some(s), Some(p)) => Some((index, s, p)),
                _ => None,
            })
            .collect()
    }

    /// Objects ordered by distance from the origin, ties broken by id
    pub fn by_distance(&self) -> Vec<&SceneObject> {
        let mut sorted: Vec<&SceneObject> = self.objects.iter().collect();
        sorted.sort_by(|a, b| {
            a.distance_from_origin()
                .total_cmp(&b.distance_from_origin())
                .then_with(|| a.id.cmp(&b.id))
        });
        sorted
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
