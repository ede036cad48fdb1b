//! Astro Core - Foundational types for the arrangement validator
//!
//! This crate provides the types every other Astro crate depends on:
//! - `Vec3` - 3D points and vectors
//! - `SceneObject`, `ObjectKind` - spheres and polyhedra read from a scene
//! - `Arrangement` - a structurally checked set of objects around the origin
//! - Error types and Result alias

mod arrangement;
mod error;
mod object;
mod types;

pub use arrangement::Arrangement;
pub use error::{AstroError, Result};
pub use object::{infer_index, infer_kind, ObjectKind, SceneObject};
pub use types::Vec3;
