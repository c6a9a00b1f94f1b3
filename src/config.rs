//! # World Configuration
//!
//! Every generation parameter is fixed when a world is created. `WorldConfig` gathers
//! them and can be loaded from a JSON file; any field left out takes its default.
//!
//! ```json
//! { "seed": 42, "smooth_factor": 32.0, "water_level": null }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The path that was being read
        path: String,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a `WorldConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside the range the generator can work with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters for terrain generation and meshing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed of the noise generator.
    pub seed: u32,
    /// Extent of a chunk along x and z, in blocks.
    pub chunk_size: usize,
    /// Extent of a chunk along y, in blocks.
    pub chunk_height: usize,
    /// Divisor applied to world coordinates before sampling noise. Larger is smoother.
    pub smooth_factor: f64,
    /// The y level flooded with water wherever the terrain stays below it.
    pub water_level: Option<usize>,
    /// Chunk-grid offset `(X, Z)` of the world's chunk.
    pub origin: [i32; 2],
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            chunk_size: 16,
            chunk_height: 16,
            smooth_factor: 20.0,
            water_level: Some(3),
            origin: [0, 0],
        }
    }
}

impl WorldConfig {
    /// Reads and validates a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a chunk the generator can fill.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 || self.chunk_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk dimensions must be non-zero, got {}x{}",
                self.chunk_size, self.chunk_height
            )));
        }
        if !self.smooth_factor.is_finite() || self.smooth_factor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "smooth_factor must be a positive number, got {}",
                self.smooth_factor
            )));
        }
        if let Some(level) = self.water_level {
            if level >= self.chunk_height {
                return Err(ConfigError::Invalid(format!(
                    "water_level {level} is outside a chunk of height {}",
                    self.chunk_height
                )));
            }
        }
        Ok(())
    }
}
