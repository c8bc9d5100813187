pub mod explore;
pub mod render;
