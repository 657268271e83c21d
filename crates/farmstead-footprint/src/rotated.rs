//! Rectangles at an arbitrary rotation about their center.

use serde::{Deserialize, Serialize};

use farmstead_math::{rotate_vec2, Aabb2, Point2, Tolerance, Vec2};

use crate::{Footprint, FootprintError, Result};

/// A rectangle given by its center, its extent along its own axes, and a
/// CCW rotation in degrees about the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    /// Center in the ground plane.
    pub center: Point2,
    /// Extent along the rectangle's own x axis.
    pub length: f64,
    /// Extent along the rectangle's own y axis.
    pub width: f64,
    /// Rotation of the own x axis from east, degrees CCW.
    pub angle_deg: f64,
}

impl RotatedRect {
    /// Describe a rotated rectangle. Dimensions are checked when corners
    /// are turned into a footprint.
    pub fn new(center: Point2, length: f64, width: f64, angle_deg: f64) -> Self {
        Self {
            center,
            length,
            width,
            angle_deg,
        }
    }

    /// Corners in counter-clockwise order, starting from the local
    /// `(-length/2, -width/2)` corner.
    pub fn corners(&self) -> [Point2; 4] {
        let hl = self.length / 2.0;
        let hw = self.width / 2.0;
        [
            Vec2::new(-hl, -hw),
            Vec2::new(hl, -hw),
            Vec2::new(hl, hw),
            Vec2::new(-hl, hw),
        ]
        .map(|offset| self.center + rotate_vec2(offset, self.angle_deg))
    }

    /// Conservative axis-aligned bounds of the corners.
    pub fn bounding_box(&self) -> Aabb2 {
        Aabb2::from_points(&self.corners())
    }

    /// Half the diagonal; every corner lies this far from the center.
    pub fn half_diagonal(&self) -> f64 {
        (self.length / 2.0).hypot(self.width / 2.0)
    }

    /// Closed counter-clockwise footprint of the corners.
    pub fn to_footprint(&self) -> Result<Footprint> {
        let tol = Tolerance::DEFAULT;
        let finite = self.center.x.is_finite()
            && self.center.y.is_finite()
            && self.angle_deg.is_finite();
        if !finite {
            return Err(FootprintError::NonFiniteVertex(0));
        }
        if !(self.length > tol.linear && self.width > tol.linear) {
            return Err(FootprintError::DegenerateRectangle {
                length: self.length,
                width: self.width,
            });
        }
        Footprint::composite_polygon(self.corners().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn barn() -> RotatedRect {
        RotatedRect::new(Point2::new(155.0, 100.0), 36.0, 26.0, 10.0)
    }

    #[test]
    fn test_zero_rotation_matches_axis_aligned() {
        let r = RotatedRect::new(Point2::new(5.0, 2.5), 10.0, 5.0, 0.0);
        let aligned = Footprint::rectangle(0.0, 0.0, 10.0, 5.0).unwrap();
        for (a, b) in r.corners().iter().zip(aligned.vertices()) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let start = barn();
        let turned = RotatedRect {
            angle_deg: start.angle_deg + 360.0,
            ..start
        };
        for (a, b) in start.corners().iter().zip(turned.corners().iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_barn_corners_at_half_diagonal() {
        let r = barn();
        let expected = (18.0f64 * 18.0 + 13.0 * 13.0).sqrt();
        assert_relative_eq!(r.half_diagonal(), expected);
        assert!((expected - 22.2).abs() < 0.01);

        let corners = r.corners();
        for c in &corners {
            assert_relative_eq!((c - r.center).norm(), expected, epsilon = 1e-9);
        }
        // Opposite corners are symmetric about the center.
        for i in 0..2 {
            let mid = Point2::from((corners[i].coords + corners[i + 2].coords) / 2.0);
            assert!((mid - r.center).norm() < 1e-9);
        }
    }

    #[test]
    fn test_half_diagonal_independent_of_angle() {
        for angle in [0.0, 10.0, 45.0, 90.0, 137.5, -30.0] {
            let r = RotatedRect { angle_deg: angle, ..barn() };
            for c in &r.corners() {
                assert_relative_eq!((c - r.center).norm(), r.half_diagonal(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_bounding_box_contains_corners_and_is_minimal() {
        for angle in [0.0, 10.0, 33.0, 90.0, 200.0] {
            let r = RotatedRect { angle_deg: angle, ..barn() };
            let bb = r.bounding_box();
            let corners = r.corners();
            assert!(corners.iter().all(|c| bb.contains(c)));
            // Every side of the box is touched by some corner.
            let touches = |f: &dyn Fn(&Point2) -> bool| corners.iter().any(f);
            assert!(touches(&|c| (c.x - bb.min_x).abs() < 1e-9));
            assert!(touches(&|c| (c.x - bb.max_x).abs() < 1e-9));
            assert!(touches(&|c| (c.y - bb.min_y).abs() < 1e-9));
            assert!(touches(&|c| (c.y - bb.max_y).abs() < 1e-9));
        }
    }

    #[test]
    fn test_rotated_bbox_over_covers_area() {
        let r = barn();
        assert!(r.bounding_box().area() > 36.0 * 26.0);
    }

    #[test]
    fn test_to_footprint_is_ccw() {
        let f = barn().to_footprint().unwrap();
        assert!(f.is_ccw());
        assert_relative_eq!(f.area(), 36.0 * 26.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        let flat = RotatedRect::new(Point2::origin(), 10.0, 0.0, 45.0);
        assert!(matches!(
            flat.to_footprint(),
            Err(FootprintError::DegenerateRectangle { .. })
        ));
        let negative = RotatedRect::new(Point2::origin(), -4.0, 2.0, 0.0);
        assert!(negative.to_footprint().is_err());
    }
}
