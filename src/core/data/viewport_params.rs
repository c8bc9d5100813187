use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::data::complex::ComplexPoint;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportParamsError {
    InvalidSize { width: u32, height: u32 },
    InvalidZoom { zoom: f64 },
    NonFiniteOffset { offset: ComplexPoint },
    ZeroMaxIterations,
}

impl fmt::Display for ViewportParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "viewport size must be positive: {}x{}", width, height)
            }
            Self::InvalidZoom { zoom } => {
                write!(f, "zoom must be a positive finite number, got {}", zoom)
            }
            Self::NonFiniteOffset { offset } => {
                write!(
                    f,
                    "centre offset must be finite, got ({}, {})",
                    offset.re, offset.im
                )
            }
            Self::ZeroMaxIterations => {
                write!(f, "maximum iterations must be greater than zero")
            }
        }
    }
}

impl Error for ViewportParamsError {}

/// Immutable snapshot of everything one field computation needs.
///
/// Produced by the input side between computations and handed to the
/// computation by value, so an in-flight job never observes a later edit.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportParams {
    pub width: u32,
    pub height: u32,
    /// Pixels per unit of the complex plane.
    pub zoom: f64,
    /// Subtracted from the scaled pixel position, so a positive `re` moves
    /// the view towards negative real values.
    pub center_offset: ComplexPoint,
    pub max_iterations: u32,
}

impl ViewportParams {
    pub fn new(
        width: u32,
        height: u32,
        zoom: f64,
        center_offset: ComplexPoint,
        max_iterations: u32,
    ) -> Result<Self, ViewportParamsError> {
        let params = Self {
            width,
            height,
            zoom,
            center_offset,
            max_iterations,
        };

        params.validate()?;

        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ViewportParamsError> {
        if self.width == 0 || self.height == 0 {
            return Err(ViewportParamsError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(ViewportParamsError::InvalidZoom { zoom: self.zoom });
        }

        if !self.center_offset.is_finite() {
            return Err(ViewportParamsError::NonFiniteOffset {
                offset: self.center_offset,
            });
        }

        if self.max_iterations == 0 {
            return Err(ViewportParamsError::ZeroMaxIterations);
        }

        Ok(())
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
