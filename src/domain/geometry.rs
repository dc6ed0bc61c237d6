//! Points and the natural/display coordinate transform
//!
//! Shapes are always stored in natural (image pixel) coordinates. Pointer
//! input arrives in display coordinates and goes through
//! [`CoordinateTransform`] before it touches any shape.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// A 2D position in either natural or display space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `other` to `self`
    pub fn diff(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Translate this point by `delta`
    pub fn offset(self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }

    /// Manhattan distance between two points
    pub fn manhattan_distance(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True when `other` is strictly closer than `dist` (Manhattan)
    pub fn near(self, other: Point, dist: f64) -> bool {
        self.manhattan_distance(other) < dist
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(
            self.x + (other.x - self.x) / 2.0,
            self.y + (other.y - self.y) / 2.0,
        )
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Snapshot of the natural and display extents of the shown image
///
/// Recomputed wholesale whenever the image or its rendered size changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    pub natural_width: f64,
    pub natural_height: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl Default for CoordinateTransform {
    /// Identity transform
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl CoordinateTransform {
    pub fn new(
        natural_width: f64,
        natural_height: f64,
        display_width: f64,
        display_height: f64,
    ) -> Self {
        Self {
            natural_width,
            natural_height,
            display_width,
            display_height,
        }
    }

    /// Map a display-space point into natural space, rounding to whole pixels
    pub fn to_natural(&self, p: Point) -> Point {
        let x_scale = scale_factor(self.natural_width, self.display_width);
        let y_scale = scale_factor(self.natural_height, self.display_height);
        Point::new(round_half_up(p.x * x_scale), round_half_up(p.y * y_scale))
    }

    /// Map a natural-space point into display space, rounding to whole pixels
    pub fn to_display(&self, p: Point) -> Point {
        let x_scale = scale_factor(self.display_width, self.natural_width);
        let y_scale = scale_factor(self.display_height, self.natural_height);
        Point::new(round_half_up(p.x * x_scale), round_half_up(p.y * y_scale))
    }

    /// Project a display-space shape into natural space
    pub fn to_natural_shape(&self, shape: &Shape) -> Shape {
        shape.map_points(|p| self.to_natural(p))
    }

    /// Project a natural-space shape into display space
    pub fn to_display_shape(&self, shape: &Shape) -> Shape {
        shape.map_points(|p| self.to_display(p))
    }
}

/// Nearest integer, with halves going toward +infinity (-2.5 -> -2)
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// `numerator / denominator`, or 1.0 when either extent is unusable
fn scale_factor(numerator: f64, denominator: f64) -> f64 {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(numerator) && usable(denominator) {
        numerator / denominator
    } else {
        1.0
    }
}
