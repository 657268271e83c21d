//! Axis-aligned 2D bounding boxes.

use serde::{Deserialize, Serialize};

use crate::Point2;

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl Aabb2 {
    /// Create a box from two opposite corners in any order.
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Smallest box containing every point, `(min(x_i), min(y_i), max(x_i), max(y_i))`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.include_point(*p);
        }
        bb
    }

    /// Expand the bounding box to include a point.
    pub fn include_point(&mut self, p: Point2) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Expand to include another box.
    pub fn include_box(&mut self, other: &Aabb2) {
        if other.is_valid() {
            self.include_point(Point2::new(other.min_x, other.min_y));
            self.include_point(Point2::new(other.max_x, other.max_y));
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if the bounding box is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Closed containment: points on the boundary count as inside.
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Whether this box contains `other` entirely.
    pub fn contains_box(&self, other: &Aabb2) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Whether the interiors of two boxes overlap.
    pub fn intersects(&self, other: &Aabb2) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Box grown by `margin` on every side (shrunk for negative margins).
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// The four corners, counter-clockwise from the minimum corner.
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.min_x, self.min_y),
            Point2::new(self.max_x, self.min_y),
            Point2::new(self.max_x, self.max_y),
            Point2::new(self.min_x, self.max_y),
        ]
    }

    /// Area of the box (zero when empty).
    pub fn area(&self) -> f64 {
        if self.is_valid() {
            self.width() * self.height()
        } else {
            0.0
        }
    }
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let mut bb = Aabb2::empty();
        assert!(!bb.is_valid());

        bb.include_point(Point2::new(0.0, 0.0));
        bb.include_point(Point2::new(10.0, 5.0));

        assert!(bb.is_valid());
        assert!((bb.width() - 10.0).abs() < 1e-10);
        assert!((bb.height() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_contains_is_closed() {
        let bb = Aabb2::new(Point2::new(0.0, 0.0), Point2::new(4.0, 2.0));
        assert!(bb.contains(&Point2::new(4.0, 1.0)));
        assert!(bb.contains(&Point2::new(0.0, 0.0)));
        assert!(!bb.contains(&Point2::new(4.0001, 1.0)));
    }

    #[test]
    fn test_expanded_and_contains_box() {
        let bb = Aabb2::new(Point2::new(1.0, 1.0), Point2::new(3.0, 2.0));
        let grown = bb.expanded(0.5);
        assert!(grown.contains_box(&bb));
        assert!(!bb.contains_box(&grown));
        assert!((grown.area() - 3.0 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_touching_boxes_do_not_intersect() {
        let a = Aabb2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let b = Aabb2::new(Point2::new(1.0, 0.0), Point2::new(2.0, 1.0));
        let c = Aabb2::new(Point2::new(0.5, 0.5), Point2::new(2.0, 1.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }
}
