use crate::core::actions::compute_field::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::ComplexPoint;
use crate::core::data::point::Pixel;
use crate::core::data::progression_field::Progression;
use crate::core::data::viewport_params::ViewportParams;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

/// Squared modulus beyond which an orbit is known to diverge (|z| >= 2).
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Iterates `z -> z² + c` from `z = 0` and reports when the orbit escapes.
///
/// Returns `Some(n / max_iterations)` for the 1-based iteration `n` at which
/// `|z|² >= 4` first holds, or `None` if the orbit stays bounded for all
/// `max_iterations` iterations. A `max_iterations` of zero never iterates and
/// yields `None`.
#[must_use]
pub fn escape_time(c: ComplexPoint, max_iterations: u32) -> Progression {
    let mut zr = 0.0_f64;
    let mut zi = 0.0_f64;
    let mut zr2 = 0.0_f64;
    let mut zi2 = 0.0_f64;

    for iteration in 1..=max_iterations {
        zi = 2.0 * zr * zi + c.im;
        zr = zr2 - zi2 + c.re;

        zr2 = zr * zr;
        zi2 = zi * zi;

        if zr2 + zi2 >= ESCAPE_RADIUS_SQUARED {
            return Some(f64::from(iteration) / f64::from(max_iterations));
        }
    }

    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    params: ViewportParams,
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Output = Progression;

    fn compute(&self, pixel: Pixel) -> Self::Output {
        let c = pixel_to_complex_coords(pixel, &self.params);

        escape_time(c, self.params.max_iterations)
    }
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(params: ViewportParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &ViewportParams {
        &self.params
    }
}
