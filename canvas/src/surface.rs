//! Drop-surface geometry: screen points and canvas-relative percentages.
//!
//! Every position stored for a placed object is a percentage of the drop
//! surface's rendered width/height, so the garden looks the same at any
//! resolution. `SurfaceRect` is the surface's bounding box in client pixels
//! as measured at event time; it converts pointer positions into that
//! percentage space.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::{Deserialize, Serialize};

use crate::consts::{PERCENT_MAX, PERCENT_MIN};

/// A point in either client-pixel or percentage space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether the point is exactly the origin.
    ///
    /// Browsers report `(0, 0)` on the synthetic drag event fired right
    /// before drag-end; callers use this to ignore it.
    #[must_use]
    pub fn is_origin(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }

    /// Clamp both components into the `[0, 100]` percentage range.
    #[must_use]
    pub fn clamped(self) -> Point {
        Point { x: clamp_percent(self.x), y: clamp_percent(self.y) }
    }
}

/// Clamp a single percentage into `[0, 100]`. NaN passes through unchanged.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(PERCENT_MIN, PERCENT_MAX)
}

/// Rendered bounds of the drop surface in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A surface with no area cannot map points to percentages.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Whether `client` lies strictly inside the rectangle.
    #[must_use]
    pub fn contains(&self, client: Point) -> bool {
        client.x > self.left
            && client.x < self.left + self.width
            && client.y > self.top
            && client.y < self.top + self.height
    }

    /// Convert a client-pixel point into unclamped surface percentages.
    ///
    /// Returns `None` when the surface has no area.
    #[must_use]
    pub fn to_percent(&self, client: Point) -> Option<Point> {
        if !self.has_area() {
            return None;
        }
        Some(Point {
            x: (client.x - self.left) / self.width * 100.0,
            y: (client.y - self.top) / self.height * 100.0,
        })
    }

    /// Convert a client-pixel point into surface percentages, subtracting a
    /// grab offset first and clamping the result into `[0, 100]`.
    #[must_use]
    pub fn to_clamped_percent(&self, client: Point, grab_offset: Point) -> Option<Point> {
        self.to_percent(client.offset_from(grab_offset))
            .map(Point::clamped)
    }
}
