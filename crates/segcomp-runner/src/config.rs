//! YAML configuration for the `segcomp` binary.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```yaml
//! tiles_dir: tiles
//! sampling: nearest
//! smoothing_passes: 5
//! section_length_m: 100
//! chart_size: [1280, 720]
//! map_size: [900, 900]
//! dashboard_cell_size: [640, 480]
//! api_base_url: https://www.strava.com/api/v3
//! contour:
//!   major_step_m: 50
//!   minor_step_m: 10
//!   refine_factor: 6
//! ```

use segcomp_dem::Sampling;
use segcomp_render::MapStyle;
use segcomp_routes::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// How elevations are read from a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingOpt {
    #[default]
    Nearest,
    Bilinear,
}

impl From<SamplingOpt> for Sampling {
    fn from(value: SamplingOpt) -> Self {
        match value {
            SamplingOpt::Nearest => Sampling::Nearest,
            SamplingOpt::Bilinear => Sampling::Bilinear,
        }
    }
}

/// Contour line settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ContourConfig {
    pub major_step_m: f64,
    pub minor_step_m: f64,
    pub refine_factor: usize,
}

impl Default for ContourConfig {
    fn default() -> Self {
        let style = MapStyle::default();
        ContourConfig {
            major_step_m: style.major_step_m,
            minor_step_m: style.minor_step_m,
            refine_factor: style.refine_factor,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SegcompConfig {
    /// Directory holding `.hgt` / `.tif` tiles.
    pub tiles_dir: PathBuf,
    pub sampling: SamplingOpt,
    /// Moving-average passes applied to each profile.
    pub smoothing_passes: usize,
    /// Resampling interval of the comparison chart.
    pub section_length_m: f64,
    pub chart_size: (u32, u32),
    pub map_size: (u32, u32),
    pub dashboard_cell_size: (u32, u32),
    pub api_base_url: String,
    pub contour: ContourConfig,
}

impl Default for SegcompConfig {
    fn default() -> Self {
        SegcompConfig {
            tiles_dir: PathBuf::from("tiles"),
            sampling: SamplingOpt::Nearest,
            smoothing_passes: 5,
            section_length_m: 100.0,
            chart_size: (1280, 720),
            map_size: (900, 900),
            dashboard_cell_size: (640, 480),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            contour: ContourConfig::default(),
        }
    }
}

impl SegcompConfig {
    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parse and validate YAML text. Blank text gives the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: SegcompConfig = if text.trim().is_empty() {
            SegcompConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.section_length_m > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "section_length_m must be positive, got {}",
                self.section_length_m
            )));
        }
        if !(self.contour.major_step_m > 0.0) || !(self.contour.minor_step_m > 0.0) {
            return Err(ConfigError::Invalid(
                "contour steps must be positive".to_string(),
            ));
        }
        if self.contour.refine_factor == 0 {
            return Err(ConfigError::Invalid(
                "contour.refine_factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn map_style(&self) -> MapStyle {
        MapStyle {
            major_step_m: self.contour.major_step_m,
            minor_step_m: self.contour.minor_step_m,
            refine_factor: self.contour.refine_factor,
        }
    }
}
