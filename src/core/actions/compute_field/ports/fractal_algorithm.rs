use crate::core::data::point::Pixel;

pub trait FractalAlgorithm {
    type Output;

    fn compute(&self, pixel: Pixel) -> Self::Output;
}
