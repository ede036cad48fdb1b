//! Validator configuration and sphere distance baselines

use crate::types::Tolerances;
use astro_core::{Arrangement, AstroError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Settings for a validation run, loaded from `astro.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub tolerance: Tolerances,
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_string(&content)
    }

    /// Load configuration from a file if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using default tolerances");
            Ok(Self::default())
        }
    }

    /// Load configuration from a TOML string
    pub fn load_string(content: &str) -> Result<Self> {
        let config: ValidatorConfig = toml::from_str(content).map_err(|e| {
            AstroError::ConfigError(format!("Failed to parse config TOML: {}", e))
        })?;
        config.tolerance.validate()?;
        Ok(config)
    }
}

/// One recorded sphere distance
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BaselineEntry {
    index: u32,
    distance: f64,
}

/// TOML file format for baselines
#[derive(Debug, Default, Serialize, Deserialize)]
struct BaselineFile {
    #[serde(default)]
    sphere: Vec<BaselineEntry>,
}

/// Expected distance from the origin for each sphere, keyed by index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    distances: BTreeMap<u32, f64>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current distance of every sphere in the arrangement
    pub fn record(arrangement: &Arrangement) -> Self {
        let distances = arrangement
            .spheres()
            .map(|s| (s.index, s.distance_from_origin()))
            .collect();
        Self { distances }
    }

    pub fn insert(&mut self, index: u32, distance: f64) {
        self.distances.insert(index, distance);
    }

    /// Expected distance for the sphere with this index
    pub fn expected(&self, index: u32) -> Option<f64> {
        self.distances.get(&index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.distances.iter().map(|(i, d)| (*i, *d))
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_string(&content)
    }

    pub fn load_string(content: &str) -> Result<Self> {
        let file: BaselineFile = toml::from_str(content).map_err(|e| {
            AstroError::ConfigError(format!("Failed to parse baseline TOML: {}", e))
        })?;

        let mut baseline = Self::new();
        for entry in file.sphere {
            if !entry.distance.is_finite() || entry.distance < 0.0 {
                return Err(AstroError::ConfigError(format!(
                    "baseline distance for sphere {} must be a non-negative number",
                    entry.index
                )));
            }
            if baseline.distances.insert(entry.index, entry.distance).is_some() {
                return Err(AstroError::ConfigError(format!(
                    "baseline lists sphere {} more than once",
                    entry.index
                )));
            }
        }
        Ok(baseline)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = BaselineFile {
            sphere: self
                .iter()
                .map(|(index, distance)| BaselineEntry { index, distance })
                .collect(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
