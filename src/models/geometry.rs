//! Geometry primitives shared by the store, placement engine and compositor.

use serde::{Deserialize, Serialize};

/// Pixel size of a layer, measured once when its source is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Top-left offset in canvas space plus the paint-order key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z_index: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z_index: i32) -> Self {
        Self { x, y, z_index }
    }
}

/// An axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds of a layer of `size` placed at `(x, y)`.
    pub fn at(x: i32, y: i32, size: Dimensions) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    ///
    /// ```
    /// use spritestack::models::Bounds;
    ///
    /// let a = Bounds::new(0, 0, 20, 20);
    /// assert!(a.intersects(&Bounds::new(10, 10, 20, 20)));
    /// assert!(!a.intersects(&Bounds::new(20, 0, 20, 20)));
    /// ```
    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.width == 0 || self.height == 0 || other.width == 0 || other.height == 0 {
            return false;
        }
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }
}
