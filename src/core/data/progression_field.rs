use std::error::Error;
use std::fmt;

use crate::core::data::point::Pixel;

/// Normalised escape time of one point.
///
/// `None` means the orbit stayed bounded for every iteration, so the point is
/// presumed to be inside the set. `Some(v)` is `iterations_used / max_iterations`
/// and lies in `(0, 1]`.
pub type Progression = Option<f64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionFieldError {
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ProgressionFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                width,
                height,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "progression field for {}x{} needs {} values, got {}",
                    width, height, expected, actual
                )
            }
        }
    }
}

impl Error for ProgressionFieldError {}

/// Row-major progressions for a whole viewport, indexed `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionField {
    width: u32,
    height: u32,
    values: Vec<Progression>,
}

impl ProgressionField {
    pub fn from_values(
        width: u32,
        height: u32,
        values: Vec<Progression>,
    ) -> Result<Self, ProgressionFieldError> {
        let expected = width as usize * height as usize;

        if values.len() != expected {
            return Err(ProgressionFieldError::LengthMismatch {
                width,
                height,
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            width,
            height,
            values,
        })
    }

    // callers produce exactly one value per pixel by construction
    pub(crate) fn from_row_major(width: u32, height: u32, values: Vec<Progression>) -> Self {
        debug_assert_eq!(values.len(), width as usize * height as usize);

        Self {
            width,
            height,
            values,
        }
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
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[Progression] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Progression> {
        self.values
    }

    #[must_use]
    pub fn get(&self, pixel: Pixel) -> Option<Progression> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return None;
        }

        let index = pixel.y as usize * self.width as usize + pixel.x as usize;
        self.values.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_valid() {
        let field = ProgressionField::from_values(3, 2, vec![None; 6]).unwrap();

        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 2);
        assert_eq!(field.len(), 6);
        assert!(!field.is_empty());
    }

    #[test]
    fn test_from_values_length_mismatch() {
        let result = ProgressionField::from_values(3, 2, vec![None; 5]);

        assert_eq!(
            result,
            Err(ProgressionFieldError::LengthMismatch {
                width: 3,
                height: 2,
                expected: 6,
                actual: 5,
            })
        );
    }

    #[test]
    fn test_get_is_row_major() {
        let values = vec![Some(0.1), Some(0.2), Some(0.3), Some(0.4), Some(0.5), None];
        let field = ProgressionField::from_values(3, 2, values).unwrap();

        assert_eq!(field.get(Pixel { x: 0, y: 0 }), Some(Some(0.1)));
        assert_eq!(field.get(Pixel { x: 2, y: 0 }), Some(Some(0.3)));
        assert_eq!(field.get(Pixel { x: 0, y: 1 }), Some(Some(0.4)));
        assert_eq!(field.get(Pixel { x: 2, y: 1 }), Some(None));
    }

    #[test]
    fn test_get_outside_field() {
        let field = ProgressionField::from_values(2, 2, vec![None; 4]).unwrap();

        assert_eq!(field.get(Pixel { x: 2, y: 0 }), None);
        assert_eq!(field.get(Pixel { x: 0, y: 2 }), None);
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = ProgressionFieldError::LengthMismatch {
            width: 3,
            height: 2,
            expected: 6,
            actual: 5,
        };

        assert_eq!(
            err.to_string(),
            "progression field for 3x2 needs 6 values, got 5"
        );
    }
}
