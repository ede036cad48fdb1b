//! Structure-preserving TOML scene patcher
//!
//! Uses `toml_edit` to rewrite only object positions, leaving comments,
//! formatting and ordering of everything else untouched. The fixer saves
//! through this so a fixed scene produces a minimal diff.

use astro_core::{AstroError, Result, Vec3};
use std::fmt;
use std::fs;
use std::path::Path;

/// A parsed scene document that can be patched position-by-position
pub struct SceneDocument {
    doc: toml_edit::DocumentMut,
}

impl SceneDocument {
    /// Parse a scene file into an editable document
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a TOML string into an editable document
    pub fn parse(content: &str) -> Result<Self> {
        let doc: toml_edit::DocumentMut = content
            .parse()
            .map_err(|e| AstroError::TomlParseError(format!("{}", e)))?;
        Ok(Self { doc })
    }

    /// Set `objects.<id>.position`, creating the key if the object had none
    pub fn patch_position(&mut self, id: &str, position: Vec3) -> Result<()> {
        let objects = self
            .doc
            .get_mut("objects")
            .and_then(|v| v.as_table_like_mut())
            .ok_or_else(|| AstroError::SceneError("No [objects] table in scene file".to_string()))?;

        let object = objects
            .get_mut(id)
            .and_then(|v| v.as_table_like_mut())
            .ok_or_else(|| AstroError::SceneError(format!("Object '{}' not found in scene file", id)))?;

        let array: toml_edit::Array = position.to_array().iter().copied().collect();
        object.insert("position", toml_edit::Item::Value(toml_edit::Value::Array(array)));

        Ok(())
    }

    /// Write the document to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl fmt::Display for SceneDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}
