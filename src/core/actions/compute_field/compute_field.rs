use crate::core::actions::compute_field::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Pixel;
use crate::core::data::progression_field::ProgressionField;
use crate::core::data::viewport_params::ViewportParams;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

pub fn generate_field_serial<Alg: FractalAlgorithm>(
    width: u32,
    height: u32,
    algorithm: &Alg,
) -> Vec<Alg::Output> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Pixel { x, y }))
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}

/// Evaluates every pixel of the viewport on the calling thread, row by row.
#[must_use]
pub fn compute_field(params: &ViewportParams) -> ProgressionField {
    let algorithm = MandelbrotAlgorithm::new(*params);
    let values = generate_field_serial(params.width, params.height, &algorithm);

    ProgressionField::from_row_major(params.width, params.height, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::ComplexPoint;

    #[derive(Debug)]
    struct StubAlgorithm {}

    impl FractalAlgorithm for StubAlgorithm {
        type Output = u64;

        fn compute(&self, pixel: Pixel) -> Self::Output {
            u64::from(pixel.y) * 100 + u64::from(pixel.x)
        }
    }

    fn params(width: u32, height: u32) -> ViewportParams {
        ViewportParams::new(width, height, 200.0, ComplexPoint { re: 0.6, im: 0.0 }, 50).unwrap()
    }

    #[test]
    fn test_serial_is_row_major() {
        let results = generate_field_serial(3, 2, &StubAlgorithm {});

        assert_eq!(results, vec![0, 1, 2, 100, 101, 102]);
    }

    #[test]
    fn test_field_length_matches_viewport() {
        for (width, height) in [(1, 1), (1, 7), (7, 1), (13, 9), (64, 48)] {
            let field = compute_field(&params(width, height));

            assert_eq!(field.len(), (width * height) as usize);
            assert_eq!(field.width(), width);
            assert_eq!(field.height(), height);
        }
    }

    #[test]
    fn test_field_matches_per_pixel_evaluation() {
        let params = params(16, 12);
        let algorithm = MandelbrotAlgorithm::new(params);
        let field = compute_field(&params);

        for y in 0..params.height {
            for x in 0..params.width {
                let pixel = Pixel { x, y };
                assert_eq!(field.get(pixel), Some(algorithm.compute(pixel)));
            }
        }
    }

    #[test]
    fn test_field_is_deterministic() {
        let params = params(20, 10);

        assert_eq!(compute_field(&params), compute_field(&params));
    }
}
