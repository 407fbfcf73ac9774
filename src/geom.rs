//! Axis-aligned collision value types.

/// A point on (or off) the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle. Edges are half-open: a point on the right or
/// bottom edge is outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Point-in-rectangle test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width as i32
            && point.y >= self.y
            && point.y < self.y + self.height as i32
    }

    /// Rectangle-overlap test.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x >= self.x + self.width as i32
            || other.x + other.width as i32 <= self.x
            || other.y >= self.y + self.height as i32
            || other.y + other.height as i32 <= self.y)
    }
}
