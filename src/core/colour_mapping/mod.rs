pub mod factory;
pub mod interpolate;
pub mod kinds;
pub mod palette;
pub mod red_ramp;
