pub mod colour;
pub mod complex;
pub mod pixel_buffer;
pub mod point;
pub mod progression_field;
pub mod viewport_params;
