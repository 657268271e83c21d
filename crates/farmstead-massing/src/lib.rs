#![warn(missing_docs)]

//! Massing models for the farmstead geometry engine.
//!
//! Every building becomes a [`BuildingVolume`]: a wall box of footprint by
//! eave height and a separate roof solid (a gable prism, or a thin slab for
//! flat roofs) grown by the eave and rake overhangs. Both are built in the
//! building's local frame and placed with one rigid transform, so the roof
//! can never drift from its walls.
//!
//! # Example
//!
//! ```
//! use farmstead_massing::build_volume;
//! use farmstead_params::ParameterSet;
//!
//! let params = ParameterSet::farmhouse();
//! let barn = params.resolve_building("Barn").unwrap();
//! let volume = build_volume(&barn).unwrap();
//! assert_eq!(volume.roof.faces.len(), 5);
//! assert!(volume.roof_footprint.strictly_contains(&volume.footprint));
//! ```

mod mesh;
mod solid;
mod volume;

pub use mesh::{Facet, TriangleMesh};
pub use solid::Solid;
pub use volume::{build_volume, ground_slab, BuildingVolume, RoofKind};

use farmstead_footprint::FootprintError;
use thiserror::Error;

/// Errors from solid construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MassingError {
    /// A dimension that must be positive and finite is not.
    #[error("invalid {name}: {value}")]
    InvalidDimension {
        /// Dimension name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The building outline could not be built.
    #[error(transparent)]
    Footprint(#[from] FootprintError),
}

/// Result type for massing operations.
pub type Result<T> = std::result::Result<T, MassingError>;
