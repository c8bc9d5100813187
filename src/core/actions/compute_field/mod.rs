pub mod compute_field;
pub mod compute_field_parallel_rayon;
pub mod mandelbrot_field_computer;
pub mod ports;
