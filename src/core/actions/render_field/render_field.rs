use crate::core::actions::render_field::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::core::data::progression_field::ProgressionField;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFieldError {
    SurfaceSizeMismatch {
        expected_size: usize,
        surface_size: usize,
    },
}

impl fmt::Display for RenderFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceSizeMismatch {
                expected_size,
                surface_size,
            } => {
                write!(
                    f,
                    "surface holds {} bytes but the field needs {} RGBA bytes",
                    surface_size, expected_size
                )
            }
        }
    }
}

impl Error for RenderFieldError {}

/// Paints `field` into an RGBA surface owned by the caller.
///
/// `dst` must hold exactly `width * height * 4` bytes. Alpha is always 255.
pub fn write_rgba<CMap>(
    field: &ProgressionField,
    colour_map: &CMap,
    dst: &mut [u8],
) -> Result<(), RenderFieldError>
where
    CMap: ColourMap + ?Sized,
{
    let expected_size = field.len() * BYTES_PER_PIXEL;

    if dst.len() != expected_size {
        return Err(RenderFieldError::SurfaceSizeMismatch {
            expected_size,
            surface_size: dst.len(),
        });
    }

    for (&progression, pixel) in field
        .values()
        .iter()
        .zip(dst.chunks_exact_mut(BYTES_PER_PIXEL))
    {
        let Colour { r, g, b } = colour_map.map(progression);

        pixel[0] = r;
        pixel[1] = g;
        pixel[2] = b;
        pixel[3] = 255;
    }

    Ok(())
}

/// Paints `field` into a freshly allocated RGBA [`PixelBuffer`].
#[must_use]
pub fn render_field<CMap>(field: &ProgressionField, colour_map: &CMap) -> PixelBuffer
where
    CMap: ColourMap + ?Sized,
{
    let mut buffer = vec![0; field.len() * BYTES_PER_PIXEL];

    for (&progression, pixel) in field
        .values()
        .iter()
        .zip(buffer.chunks_exact_mut(BYTES_PER_PIXEL))
    {
        let Colour { r, g, b } = colour_map.map(progression);
        pixel.copy_from_slice(&[r, g, b, 255]);
    }

    match PixelBuffer::from_data(field.width(), field.height(), buffer) {
        Ok(pixel_buffer) => pixel_buffer,
        Err(err) => unreachable!("buffer sized from the field: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::progression_field::Progression;

    #[derive(Debug)]
    struct StubColourMap {}

    impl ColourMap for StubColourMap {
        fn map(&self, progression: Progression) -> Colour {
            let value = progression.map_or(0, |p| (p * 100.0) as u8);
            Colour::new(value, value, value)
        }

        fn display_name(&self) -> &str {
            "Stub"
        }
    }

    fn field() -> ProgressionField {
        ProgressionField::from_values(3, 2, vec![Some(0.01), Some(0.02), None, Some(0.04), Some(0.05), Some(0.06)])
            .unwrap()
    }

    #[test]
    fn test_renders_rgba_with_opaque_alpha() {
        let buffer = render_field(&field(), &StubColourMap {});

        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 2);
        assert_eq!(
            buffer.buffer(),
            &vec![
                1, 1, 1, 255, 2, 2, 2, 255, 0, 0, 0, 255, //
                4, 4, 4, 255, 5, 5, 5, 255, 6, 6, 6, 255,
            ]
        );
    }

    #[test]
    fn test_buffer_length_is_four_bytes_per_pixel() {
        let buffer = render_field(&field(), &StubColourMap {});

        assert_eq!(buffer.buffer_size(), 3 * 2 * 4);
    }

    #[test]
    fn test_write_rgba_fills_external_surface() {
        let mut surface = vec![9; 24];

        write_rgba(&field(), &StubColourMap {}, &mut surface).unwrap();

        assert_eq!(&surface, render_field(&field(), &StubColourMap {}).buffer());
    }

    #[test]
    fn test_write_rgba_rejects_wrong_surface_size() {
        let mut surface = vec![0; 18];

        let result = write_rgba(&field(), &StubColourMap {}, &mut surface);

        assert_eq!(
            result,
            Err(RenderFieldError::SurfaceSizeMismatch {
                expected_size: 24,
                surface_size: 18,
            })
        );
    }

    #[test]
    fn test_accepts_boxed_dyn_colour_map() {
        let colour_map: Box<dyn ColourMap> = Box::new(StubColourMap {});

        let buffer = render_field(&field(), &colour_map);

        assert_eq!(buffer.buffer()[0..4], [1, 1, 1, 255]);
    }
}
