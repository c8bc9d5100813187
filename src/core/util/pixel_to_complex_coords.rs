use crate::core::data::complex::ComplexPoint;
use crate::core::data::point::Pixel;
use crate::core::data::viewport_params::ViewportParams;

/// Maps a pixel to the complex plane for the given viewport.
///
/// The pixel is first centred on the viewport, then scaled by `zoom` and
/// shifted by `center_offset`. Validated params are finite, so there is no
/// error case.
#[must_use]
pub fn pixel_to_complex_coords(pixel: Pixel, params: &ViewportParams) -> ComplexPoint {
    let centered_x = f64::from(pixel.x) - f64::from(params.width) / 2.0;
    let centered_y = f64::from(pixel.y) - f64::from(params.height) / 2.0;

    ComplexPoint {
        re: centered_x / params.zoom - params.center_offset.re,
        im: centered_y / params.zoom - params.center_offset.im,
    }
}
