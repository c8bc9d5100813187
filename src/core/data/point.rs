/// A pixel coordinate inside a viewport, origin at the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
}
