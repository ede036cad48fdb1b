//! Error types for Astro

use thiserror::Error;

/// The main error type for Astro operations.
///
/// These are configuration and input errors. Geometric rule failures are
/// never errors; they are entries in a validation report.
#[derive(Debug, Error)]
pub enum AstroError {
    #[error("Duplicate object id: {0}")]
    DuplicateObject(String),

    #[error("Unknown kind '{kind}' for object '{object}'")]
    UnknownKind { object: String, kind: String },

    #[error("Missing index for object '{0}'")]
    MissingIndex(String),

    #[error("Missing face count for polyhedron '{0}'")]
    MissingFaceCount(String),

    #[error("Duplicate {kind} index: {index}")]
    DuplicateIndex { kind: String, index: u32 },

    #[error("Unpaired {kind} index: {index} has no counterpart")]
    UnpairedIndex { kind: String, index: u32 },

    #[error("Non-finite position for object '{0}'")]
    NonFinitePosition(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Fix unavailable: {0}")]
    FixUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

impl AstroError {
    /// True for errors caused by the scene or configuration content, as
    /// opposed to IO or serialization failures.
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            AstroError::IoError(_) | AstroError::TomlSerError(_) | AstroError::FixUnavailable(_)
        )
    }
}

/// Result type alias for Astro operations
pub type Result<T> = std::result::Result<T, AstroError>;

impl From<toml::de::Error> for AstroError {
    fn from(err: toml::de::Error) -> Self {
        AstroError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for AstroError {
    fn from(err: toml::ser::Error) -> Self {
        AstroError::TomlSerError(err.to_string())
    }
}
