//! Astro Scene - TOML scene files
//!
//! This crate reads arrangements out of scene files and writes fixed
//! positions back into them without disturbing the rest of the file.

mod format;
mod loader;
pub mod patcher;

pub use format::{ObjectDef, SceneFile, SceneMetadata};
pub use loader::{load_scene, load_scene_string, scene_file_to_arrangement};
pub use patcher::SceneDocument;
