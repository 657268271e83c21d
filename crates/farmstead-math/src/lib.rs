#![warn(missing_docs)]

//! Math types for the farmstead geometry engine.
//!
//! Thin wrappers around nalgebra providing the domain types shared by every
//! other crate: points, vectors, rigid placements, tolerance constants,
//! axis-aligned boxes, and the feet/millimetre unit boundary.

use nalgebra::{Isometry3, Vector2, Vector3};

pub mod bbox;
pub mod frame;
pub mod units;

pub use bbox::Aabb2;
pub use frame::{rotate_about, rotate_vec2};
pub use units::{to_internal, to_real, FT_TO_MM};

/// A point in 3D space (internal units).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in the ground plane or in a drawing plane (internal units).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Rigid motion of the site: turns about a vertical axis and shifts.
///
/// Buildings are never scaled or tilted, so an isometry is all a
/// placement needs and always inverts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    iso: Isometry3<f64>,
}

impl Transform {
    /// Leaves every point where it is.
    pub fn identity() -> Self {
        Self {
            iso: Isometry3::identity(),
        }
    }

    /// Shift by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            iso: Isometry3::translation(dx, dy, dz),
        }
    }

    /// Turn about the vertical line through `pivot` by `angle_deg`, CCW seen
    /// from above.
    pub fn rotation_about_vertical(pivot: &Point2, angle_deg: f64) -> Self {
        Self::translation(pivot.x, pivot.y, 0.0)
            .then(&Self::turn(angle_deg))
            .then(&Self::translation(-pivot.x, -pivot.y, 0.0))
    }

    /// Local frame to site: turn about the local origin by `angle_deg`,
    /// then move the origin to `center`.
    pub fn placement(center: &Point2, angle_deg: f64) -> Self {
        Self::translation(center.x, center.y, 0.0).then(&Self::turn(angle_deg))
    }

    fn turn(angle_deg: f64) -> Self {
        Self {
            iso: Isometry3::rotation(Vec3::z() * angle_deg.to_radians()),
        }
    }

    /// `self` after `other`: the result applies `other` first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            iso: self.iso * other.iso,
        }
    }

    /// Move a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.iso * p
    }

    /// Move a ground-plane point.
    pub fn apply_point2(&self, p: &Point2) -> Point2 {
        let r = self.apply_point(&Point3::new(p.x, p.y, 0.0));
        Point2::new(r.x, r.y)
    }

    /// The motion that undoes this one.
    pub fn inverse(&self) -> Self {
        Self {
            iso: self.iso.inverse(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Comparison tolerances.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Distance, in internal units.
    pub linear: f64,
    /// Angle, in radians.
    pub angular: f64,
}

impl Tolerance {
    /// 1e-6 mm and 1e-9 rad.
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Whether two ground-plane points coincide.
    pub fn points2_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Whether a length is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
