use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::colour_mapping::kinds::ColourMapKinds;
use crate::core::data::complex::ComplexPoint;
use crate::core::data::viewport_params::{ViewportParams, ViewportParamsError};

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    InvalidViewport(ViewportParamsError),
    InvalidNavigation(NavigationConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationConfigError {
    InvalidZoomFactor { zoom_factor: f64 },
    NonFinitePanStep { pan_step_pixels: f64 },
}

impl fmt::Display for NavigationConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoomFactor { zoom_factor } => write!(
                f,
                "zoom factor must be a positive finite number, got {}",
                zoom_factor
            ),
            Self::NonFinitePanStep { pan_step_pixels } => {
                write!(f, "pan step must be finite, got {}", pan_step_pixels)
            }
        }
    }
}

impl Error for NavigationConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config at {}: {}", path.display(), source)
            }
            Self::InvalidViewport(err) => write!(f, "invalid viewport in config: {}", err),
            Self::InvalidNavigation(err) => write!(f, "invalid navigation in config: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidViewport(err) => Some(err),
            Self::InvalidNavigation(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Initial view. Validated only when turned into [`ViewportParams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
    pub center_offset: ComplexPoint,
    pub max_iterations: u32,
}

/// Step sizes for the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Screen pixels moved per pan, divided by the current zoom.
    pub pan_step_pixels: f64,
    pub zoom_factor: f64,
    pub iteration_step: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub kind: ColourMapKinds,
    /// Only used by the random palette.
    pub seed: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            zoom: 200.0,
            center_offset: ComplexPoint { re: 0.6, im: 0.0 },
            max_iterations: 500,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            pan_step_pixels: 30.0,
            zoom_factor: 1.5,
            iteration_step: 25,
        }
    }
}

impl NavigationConfig {
    pub fn validate(&self) -> Result<(), NavigationConfigError> {
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 0.0) {
            return Err(NavigationConfigError::InvalidZoomFactor {
                zoom_factor: self.zoom_factor,
            });
        }

        if !self.pan_step_pixels.is_finite() {
            return Err(NavigationConfigError::NonFinitePanStep {
                pan_step_pixels: self.pan_step_pixels,
            });
        }

        Ok(())
    }
}

impl Config {
    /// Reads a JSON config. Navigation steps are checked here; the viewport
    /// is checked by [`Config::viewport_params`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config
            .navigation
            .validate()
            .map_err(ConfigError::InvalidNavigation)?;

        Ok(config)
    }

    /// Defaults when `path` is `None`, otherwise [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn viewport_params(&self) -> Result<ViewportParams, ConfigError> {
        let viewport = &self.viewport;

        ViewportParams::new(
            viewport.width,
            viewport.height,
            viewport.zoom,
            viewport.center_offset,
            viewport.max_iterations,
        )
        .map_err(ConfigError::InvalidViewport)
    }
}
