pub mod fractal_algorithm;
pub mod field_computer;
