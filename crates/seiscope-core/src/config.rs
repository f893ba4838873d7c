//! TOML configuration for a Love-wave study.
//!
//! ```toml
//! [medium]
//! preset = "crust_over_mantle"   # or give all six parameters explicitly
//! frequency_hz = 0.1             # optional override
//!
//! [search]                       # optional
//! samples = 4000
//!
//! [field]                        # optional
//! nx = 100
//! time = 0.0
//! modes = [1, 2]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use seiscope_media::{presets, LayeredMedium, MediumError, MediumSpec};

use crate::solver::love::roots::SearchParams;
use crate::types::FieldGrid;

/// Errors from loading a study configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid medium: {0}")]
    Medium(#[from] MediumError),
}

/// Top-level study configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StudyConfig {
    pub medium: MediumConfig,
    #[serde(default)]
    pub search: SearchParams,
    #[serde(default)]
    pub field: Option<FieldConfig>,
}

/// Medium given by preset name or by explicit parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MediumConfig {
    Preset {
        preset: String,
        #[serde(default)]
        frequency_hz: Option<f64>,
    },
    Explicit(MediumSpec),
}

impl MediumConfig {
    /// Resolve presets and validate.
    pub fn build(&self) -> Result<LayeredMedium, MediumError> {
        match self {
            MediumConfig::Preset { preset, frequency_hz } => {
                let medium = presets::preset(preset)?;
                match frequency_hz {
                    Some(f) => medium.with_frequency(*f),
                    None => Ok(medium),
                }
            }
            MediumConfig::Explicit(spec) => spec.build(),
        }
    }
}

/// Displacement snapshot settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    #[serde(default = "default_nx")]
    pub nx: usize,
    #[serde(default = "default_nz")]
    pub nz_layer: usize,
    #[serde(default = "default_half_space_depth")]
    pub half_space_depth: f64,
    #[serde(default = "default_nz")]
    pub nz_half_space: usize,
    /// Snapshot time (s).
    #[serde(default)]
    pub time: f64,
    /// 1-based mode indices; empty means every mode found.
    #[serde(default)]
    pub modes: Vec<usize>,
}

fn default_x_max() -> f64 {
    FieldGrid::default().x_max
}

fn default_nx() -> usize {
    FieldGrid::default().nx
}

fn default_nz() -> usize {
    FieldGrid::default().nz_layer
}

fn default_half_space_depth() -> f64 {
    FieldGrid::default().half_space_depth
}

impl FieldConfig {
    pub fn grid(&self) -> FieldGrid {
        FieldGrid {
            x_max: self.x_max,
            nx: self.nx,
            nz_layer: self.nz_layer,
            half_space_depth: self.half_space_depth,
            nz_half_space: self.nz_half_space,
        }
    }
}

impl StudyConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StudyConfig = toml::from_str(content)?;
        // Surface medium errors at load time rather than at first use.
        config.medium.build()?;
        Ok(config)
    }
}

/// Load and validate a TOML study configuration file.
pub fn load_config(path: &Path) -> Result<StudyConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    StudyConfig::from_toml_str(&content)
}
