use crate::core::data::colour::Colour;
use crate::core::data::point::Pixel;
use std::error::Error;
use std::fmt;

pub const BYTES_PER_PIXEL: usize = 4;

fn dimensions_to_buffer_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Pixel,
        width: u32,
        height: u32,
    },
    BoundsMismatch {
        expected_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                expected_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "expected {} bytes of RGBA data, got {}",
                    expected_size, buffer_size
                )
            }
            Self::PixelOutsideBounds {
                pixel,
                width,
                height,
            } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} buffer",
                    pixel.x, pixel.y, width, height
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// RGBA8 frame, row-major, alpha always opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut buffer = vec![0; dimensions_to_buffer_size(width, height)];

        for pixel in buffer.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[3] = 255;
        }

        Self {
            width,
            height,
            buffer,
        }
    }

    pub fn from_data(
        width: u32,
        height: u32,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected_size = dimensions_to_buffer_size(width, height);

        if expected_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_pixel(&mut self, pixel: Pixel, colour: Colour) -> Result<(), PixelBufferError> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                width: self.width,
                height: self.height,
            });
        }

        let index = (pixel.y as usize * self.width as usize + pixel.x as usize) * BYTES_PER_PIXEL;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;
        self.buffer[index + 3] = 255;

        Ok(())
    }

    /// Iterates the RGB triples, dropping alpha.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|pixel| [pixel[0], pixel[1], pixel[2]])
    }
}
