#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

/// A point in either client (pointer event) or room coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Placement of the plan canvas inside the host's client area.
///
/// `left` / `top` are the canvas bounding-box origin in client pixels. The
/// plan canvas is never zoomed, so one client pixel is one room unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Convert a pointer position in client pixels to room coordinates.
    #[must_use]
    pub fn client_to_room(&self, client: Point) -> Point {
        Point { x: client.x - self.left, y: client.y - self.top }
    }
}
