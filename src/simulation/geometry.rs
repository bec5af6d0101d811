//! Axis-aligned rectangles for collision tests.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Checks whether two rectangles share interior area.
    ///
    /// Rectangles that only touch along an edge do not overlap, and an empty
    /// rectangle never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Checks whether the rectangle touches or leaves the vertical band [0, height].
    pub fn outside_vertical(&self, height: f32) -> bool {
        self.y <= 0.0 || self.bottom() >= height
    }
}
