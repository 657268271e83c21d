//! Conversion between the real-world unit (feet) and the internal unit (millimetres).
//!
//! Parameters are authored in feet; every geometry value produced by the
//! engine is in millimetres. Nothing outside this module knows the factor.

use crate::{Point2, Point3};

/// Millimetres per foot.
pub const FT_TO_MM: f64 = 304.8;

/// Convert a length in feet to internal millimetres.
#[inline]
pub fn to_internal(feet: f64) -> f64 {
    feet * FT_TO_MM
}

/// Convert an internal length in millimetres back to feet.
#[inline]
pub fn to_real(mm: f64) -> f64 {
    mm / FT_TO_MM
}

/// Ground-plane point from `(x, y)` in feet.
pub fn point2_ft(x: f64, y: f64) -> Point2 {
    Point2::new(to_internal(x), to_internal(y))
}

/// Point from `(x, y, z)` in feet.
pub fn point3_ft(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(to_internal(x), to_internal(y), to_internal(z))
}
