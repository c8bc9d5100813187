use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes frames as binary PPM images.
#[derive(Debug, Clone, Copy, Default)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(filepath)?);

        write_ppm(buffer, &mut writer)?;
        writer.flush()
    }
}

/// Encodes `buffer` as P6 PPM. Alpha is dropped.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, writer: &mut W) -> std::io::Result<()> {
    // PPM header: P6 means binary RGB, then width, height and max_colour
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", buffer.width(), buffer.height())?;
    writeln!(writer, "255")?;

    for rgb in buffer.rgb_pixels() {
        writer.write_all(&rgb)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::point::Pixel;

    fn two_by_one() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set_pixel(Pixel { x: 0, y: 0 }, Colour::new(255, 0, 0)).unwrap();
        buffer.set_pixel(Pixel { x: 1, y: 0 }, Colour::new(1, 2, 3)).unwrap();
        buffer
    }

    #[test]
    fn test_write_ppm_header_and_rgb_payload() {
        let mut out = Vec::new();

        write_ppm(&two_by_one(), &mut out).unwrap();

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[255, 0, 0, 1, 2, 3]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_presenter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.ppm");

        PpmFilePresenter::new().present(&two_by_one(), &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(written.len(), b"P6\n2 1\n255\n".len() + 6);
    }

    #[test]
    fn test_presenter_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.ppm");

        assert!(PpmFilePresenter::new().present(&two_by_one(), &path).is_err());
    }
}
