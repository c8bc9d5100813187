//! Channel arithmetic shared by the palette colour maps.

use crate::core::data::colour::Colour;

/// Position of `value` inside `range`, where `range.0` maps to 0 and `range.1` to 1.
///
/// A zero-width range yields 0 instead of dividing by zero.
#[must_use]
pub fn normalize(value: f64, range: (f64, f64)) -> f64 {
    let (start, end) = range;

    if end - start == 0.0 {
        return 0.0;
    }

    (value - start) / (end - start)
}

/// Interpolates one colour channel between `min` (at `t = 0`) and `max` (at `t = 1`).
///
/// Forward ramps (`min <= max`) round to the nearest integer. Inverted ramps
/// (`min > max`) use `min - floor(t * (min - max))` instead, so the two
/// directions do not produce mirror-image values at the half steps. The
/// result is clamped to `0..=255`.
#[must_use]
pub fn to_component(t: f64, min: u8, max: u8) -> u8 {
    let min = f64::from(min);
    let max = f64::from(max);

    let value = if min > max {
        min - (t * (min - max)).floor()
    } else {
        min + (t * (max - min)).round()
    };

    value.clamp(0.0, 255.0) as u8
}

/// [`to_component`] over the full `0..=255` range.
#[must_use]
pub fn to_component_default(t: f64) -> u8 {
    to_component(t, 0, 255)
}

#[must_use]
pub fn interpolate_colour(start: Colour, end: Colour, t: f64) -> Colour {
    Colour {
        r: to_component(t, start.r, end.r),
        g: to_component(t, start.g, end.g),
        b: to_component(t, start.b, end.b),
    }
}
