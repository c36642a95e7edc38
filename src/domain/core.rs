//! Core domain types and operations
//!
//! This module defines pure geometric types shared by the grid model, the
//! selection tracker and the platform layer. Nothing here knows about Win32.

/// A pointer position in overlay client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Edge-based rectangle (left, top, right, bottom)
///
/// Used for work areas (screen coordinates), selections and overlay cells
/// (overlay client coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Creates a new rectangle from its edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Degenerate rectangle covering a single point
    pub fn from_point(point: Point) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Returns the horizontal extent
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Returns the vertical extent
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when left <= right and top <= bottom
    pub fn is_normalized(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Smallest rectangle containing both `self` and `point`
    ///
    /// Every edge is re-derived with min/max, so the result is normalized
    /// whenever `self` is.
    pub fn expanded_to(&self, point: Point) -> Rect {
        Rect::new(
            self.left.min(point.x),
            self.top.min(point.y),
            self.right.max(point.x),
            self.bottom.max(point.y),
        )
    }
}

/// Final placement of a window: position plus size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Geometry {
    /// Creates a new geometry
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}
