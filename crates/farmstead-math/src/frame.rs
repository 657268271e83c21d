//! World frame: X = east, Y = north, Z = up, origin at the lot's
//! south-west corner at grade. Angles are degrees, counter-clockwise
//! seen from above.

use crate::{Point2, Vec2, Vec3};

/// Unit vector pointing east.
pub const EAST: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Unit vector pointing north.
pub const NORTH: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Unit vector pointing up.
pub const UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Rotate a 2D offset by `angle_deg` degrees CCW.
pub fn rotate_vec2(v: Vec2, angle_deg: f64) -> Vec2 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Rotate `p` about `pivot` by `angle_deg` degrees CCW.
pub fn rotate_about(p: &Point2, pivot: &Point2, angle_deg: f64) -> Point2 {
    pivot + rotate_vec2(p - pivot, angle_deg)
}

/// Unit direction in the ground plane at `angle_deg` from east.
pub fn heading(angle_deg: f64) -> Vec2 {
    rotate_vec2(Vec2::new(1.0, 0.0), angle_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_vec2_quarter_turn() {
        let v = rotate_vec2(Vec2::new(1.0, 0.0), 90.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_about_full_turn_returns() {
        let pivot = Point2::new(2.0, 3.0);
        let p = Point2::new(7.0, -1.0);
        let q = rotate_about(&p, &pivot, 360.0);
        assert!((q - p).norm() < 1e-9);
    }

    #[test]
    fn test_frame_is_right_handed() {
        assert!((EAST.cross(&NORTH) - UP).norm() < 1e-12);
    }

    #[test]
    fn test_heading_north() {
        let h = heading(90.0);
        assert!(h.x.abs() < 1e-12 && (h.y - 1.0).abs() < 1e-12);
    }
}
