#![warn(missing_docs)]

//! Exclusion-zone scatter for the farmstead geometry engine.
//!
//! Places up to a target number of circular features (trees) inside a
//! rectangular bound while keeping them out of a set of axis-aligned
//! exclusion rectangles. Placement runs in two phases: a perimeter phase
//! that samples inside a band along the edges, then an interior phase that
//! samples the whole area. Every point gets a bounded number of attempts;
//! a point that runs out is skipped, so the target is a ceiling.
//!
//! The random generator is seeded explicitly. The same configuration,
//! exclusions and seed always give the same trees.
//!
//! # Example
//!
//! ```
//! use farmstead_math::{Aabb2, Point2};
//! use farmstead_scatter::{scatter, ScatterConfig};
//!
//! let lot = Aabb2::new(Point2::new(0.0, 0.0), Point2::new(200.0, 220.0));
//! let house = Aabb2::new(Point2::new(64.0, 81.0), Point2::new(136.0, 119.0));
//! let result = scatter(&ScatterConfig::new(lot, 40), &[house], 42).unwrap();
//! assert!(result.trees.len() <= 40);
//! assert!(result.trees.iter().all(|t| !house.contains(&t.center)));
//! ```

mod engine;

pub use engine::scatter;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use farmstead_math::{Aabb2, Point2};

/// Errors from an invalid scatter configuration. Running out of retries is
/// never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScatterError {
    /// The outer bound has no area.
    #[error("scatter bounds are empty")]
    EmptyBounds,

    /// Radius range is negative, non-finite or inverted.
    #[error("invalid radius range [{min}, {max}]")]
    InvalidRadius {
        /// Smallest radius.
        min: f64,
        /// Largest radius.
        max: f64,
    },

    /// Perimeter fraction outside `[0, 1]`.
    #[error("perimeter fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),

    /// A distance setting that must be finite and non-negative.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidSetting {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Result type for scatter operations.
pub type Result<T> = std::result::Result<T, ScatterError>;

/// Scatter settings. Distances share the unit of the bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Outer bound. Every canopy stays at least `edge_margin` inside it.
    pub bounds: Aabb2,
    /// Upper bound on the number of features.
    pub target: usize,
    /// Smallest radius.
    pub radius_min: f64,
    /// Largest radius.
    pub radius_max: f64,
    /// Depth of the perimeter band.
    pub perimeter_buffer: f64,
    /// Share of the target attempted in the perimeter phase.
    pub perimeter_fraction: f64,
    /// Clear distance between a canopy and the outer bound.
    pub edge_margin: f64,
    /// Attempts per feature before it is skipped.
    pub max_retries: u32,
    /// Test the whole canopy circle against exclusions instead of the center.
    pub canopy_clearance: bool,
    /// Minimum clear gap between canopies; `None` lets canopies overlap.
    pub min_gap: Option<f64>,
}

impl ScatterConfig {
    /// Defaults for a tree scatter over `bounds` given in feet.
    pub fn new(bounds: Aabb2, target: usize) -> Self {
        Self {
            bounds,
            target,
            radius_min: 4.0,
            radius_max: 8.0,
            perimeter_buffer: 30.0,
            perimeter_fraction: 0.4,
            edge_margin: 3.0,
            max_retries: 5000,
            canopy_clearance: false,
            min_gap: None,
        }
    }

    /// Number of features attempted in the perimeter phase.
    pub fn perimeter_target(&self) -> usize {
        (self.target as f64 * self.perimeter_fraction).floor() as usize
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        if !(b.is_valid() && b.area() > 0.0 && b.area().is_finite()) {
            return Err(ScatterError::EmptyBounds);
        }
        let radius_ok = self.radius_min.is_finite()
            && self.radius_max.is_finite()
            && self.radius_min >= 0.0
            && self.radius_min <= self.radius_max;
        if !radius_ok {
            return Err(ScatterError::InvalidRadius {
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if !(0.0..=1.0).contains(&self.perimeter_fraction) {
            return Err(ScatterError::InvalidFraction(self.perimeter_fraction));
        }
        let distances = [
            ("perimeter_buffer", self.perimeter_buffer),
            ("edge_margin", self.edge_margin),
            ("min_gap", self.min_gap.unwrap_or(0.0)),
        ];
        for (name, value) in distances {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ScatterError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

/// One placed feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Canopy center.
    pub center: Point2,
    /// Canopy radius.
    pub radius: f64,
}

/// What a scatter run produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterResult {
    /// Placed features, perimeter phase first.
    pub trees: Vec<Tree>,
    /// Features placed in the perimeter phase.
    pub perimeter_count: usize,
    /// Features placed in the interior phase.
    pub interior_count: usize,
    /// Features skipped after exhausting their retries.
    pub skipped: usize,
}

impl ScatterResult {
    /// Scale every center and radius (unit conversion).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            trees: self
                .trees
                .iter()
                .map(|t| Tree {
                    center: Point2::from(t.center.coords * factor),
                    radius: t.radius * factor,
                })
                .collect(),
            perimeter_count: self.perimeter_count,
            interior_count: self.interior_count,
            skipped: self.skipped,
        }
    }
}
