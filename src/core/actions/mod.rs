pub mod cancellation;
pub mod compute_field;
pub mod render_field;
