//! Pure derivation functions.
//!
//! Every roof-bearing component goes through [`ridge_height`] or
//! [`RoofHeights::derive`]; nothing stores a ridge height that could drift
//! from its eave, span and pitch.

use serde::{Deserialize, Serialize};

use farmstead_math::{Aabb2, Point2};

/// Steepest accepted pitch (rise over run). 48:12 is already a spire.
pub const MAX_PITCH: f64 = 4.0;

/// Most bays one building may be divided into.
pub const MAX_BAYS: usize = 10_000;

/// Rise of a symmetric gable over `span`: `(span / 2) * pitch`.
///
/// A pitch of zero is a flat roof and yields zero.
pub fn roof_rise(span: f64, pitch: f64) -> f64 {
    span / 2.0 * pitch
}

/// Ridge height of a symmetric gable: `eave + (span / 2) * pitch`.
pub fn ridge_height(eave: f64, span: f64, pitch: f64) -> f64 {
    eave + roof_rise(span, pitch)
}

/// Height of a roof plane at a horizontal distance from the eave line,
/// capped at the ridge. Negative distances run out over the overhang.
pub fn roof_height_at(eave: f64, pitch: f64, distance_from_eave_line: f64, ridge: f64) -> f64 {
    (eave + distance_from_eave_line * pitch).min(ridge)
}

/// The three heights every roof is described by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofHeights {
    /// Wall-plate height where the slope begins.
    pub eave: f64,
    /// Ridge minus eave.
    pub rise: f64,
    /// Height of the topmost line.
    pub ridge: f64,
}

impl RoofHeights {
    /// Derive the heights from eave height, span and pitch.
    pub fn derive(eave: f64, span: f64, pitch: f64) -> Self {
        let rise = roof_rise(span, pitch);
        Self {
            eave,
            rise,
            ridge: eave + rise,
        }
    }

    /// Whether the roof is flat (no rise).
    pub fn is_flat(&self) -> bool {
        self.rise == 0.0
    }

    /// Same heights multiplied by `factor` (unit conversion).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            eave: self.eave * factor,
            rise: self.rise * factor,
            ridge: self.ridge * factor,
        }
    }
}

/// Conservative axis-aligned box of a rotated shape's corners.
///
/// Over-excludes near the corners of non-aligned rectangles.
pub fn rotated_bounding_box(corners: &[Point2]) -> Aabb2 {
    Aabb2::from_points(corners)
}

/// What to do with the bay left over when the spacing does not divide the
/// length evenly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrailingBay {
    /// Keep the remainder as a short trailing bay.
    #[default]
    Keep,
    /// Fold a remainder narrower than `min` into the previous bay.
    Merge {
        /// Narrowest trailing bay kept on its own.
        min: f64,
    },
}

/// Grid line positions along a length, starting at zero and ending at
/// `length`, with regular bays of `spacing` and an irregular trailing bay.
///
/// A non-positive or non-finite spacing yields a single bay, as does a
/// spacing that would cut the length into more than [`MAX_BAYS`] bays.
/// Line `k` sits at exactly `k * spacing`.
pub fn bay_lines(length: f64, spacing: f64, trailing: TrailingBay) -> Vec<f64> {
    const EPS: f64 = 1e-9;
    if !(length > 0.0) {
        return vec![0.0];
    }
    if !(spacing > 0.0 && spacing.is_finite()) || spacing >= length - EPS {
        return vec![0.0, length];
    }

    let bays = ((length - EPS) / spacing).ceil();
    if !(bays <= MAX_BAYS as f64) {
        return vec![0.0, length];
    }
    let bays = bays as usize;

    let mut lines = Vec::with_capacity(bays + 1);
    lines.push(0.0);
    lines.extend(
        (1..bays)
            .map(|k| k as f64 * spacing)
            .take_while(|at| *at < length - EPS),
    );

    if let TrailingBay::Merge { min } = trailing {
        let last_inner = lines[lines.len() - 1];
        if lines.len() > 1 && length - last_inner < min - EPS {
            lines.pop();
        }
    }
    lines.push(length);
    lines
}
