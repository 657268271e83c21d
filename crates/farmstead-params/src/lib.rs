#![warn(missing_docs)]

//! Parameter set and dimension derivation for the farmstead geometry engine.
//!
//! A [`ParameterSet`] is the single source of truth for a compound: site,
//! roof defaults, buildings, plan features and the tree scatter settings.
//! It is authored in feet, validated once at construction, and read-only
//! afterwards. Everything downstream is derived from it through the pure
//! functions in [`derive`] and the resolution step in [`building`], which
//! is the only place values cross into internal millimetres.
//!
//! # Example
//!
//! ```
//! use farmstead_params::{ridge_height, ParameterSet};
//!
//! assert!((ridge_height(12.0, 30.0, 2.0 / 3.0) - 22.0).abs() < 1e-12);
//!
//! let params = ParameterSet::farmhouse();
//! let barn = params.resolve_building("Barn").unwrap();
//! assert!((barn.angle_deg - 100.0).abs() < 1e-12);
//! ```

pub mod building;
pub mod derive;
mod farmhouse;
pub mod set;
pub mod site;

pub use building::{BuildingGeometry, Face, Opening, UpperFloor, UpperWall};
pub use derive::{
    bay_lines, ridge_height, roof_height_at, roof_rise, rotated_bounding_box, RoofHeights,
    TrailingBay, MAX_BAYS,
};
pub use set::{
    BuildingParams, Cardinal, FeatureParams, FeatureShape, OpeningParams, OverhangParams,
    ParameterSet, Placement, RidgeAxis, RoofParams, SectionParams, SiteParams, StructureParams,
    TreeParams, UpperFloorParams, UpperWallParams, ZoneParams,
};

use farmstead_footprint::FootprintError;
use thiserror::Error;

/// Errors raised while building or validating a parameter set.
#[derive(Debug, Error)]
pub enum ParamError {
    /// A length that must be strictly positive is zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Dotted parameter path.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// A length that must not be negative is negative.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Dotted parameter path.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// NaN or infinite value.
    #[error("{name} is not finite")]
    NonFinite {
        /// Dotted parameter path.
        name: String,
    },

    /// Roof pitch outside `[0, MAX_PITCH]`.
    #[error("{name}: pitch {pitch} is outside [0, {max}]", max = derive::MAX_PITCH)]
    InvalidPitch {
        /// Dotted parameter path.
        name: String,
        /// Offending pitch (rise over run).
        pitch: f64,
    },

    /// A `min`/`max` pair with `min > max`.
    #[error("{name}: range [{min}, {max}] is empty")]
    InvalidRange {
        /// Dotted parameter path.
        name: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A value outside the interval it must lie in.
    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Dotted parameter path.
        name: String,
        /// Offending value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A fraction outside `[0, 1]`.
    #[error("{name} = {value} is not a fraction in [0, 1]")]
    InvalidFraction {
        /// Dotted parameter path.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// Two buildings share a name.
    #[error("duplicate building name: {0}")]
    DuplicateBuilding(String),

    /// No building with the requested name.
    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    /// A plan feature whose outline cannot be built.
    #[error("feature {name}: {source}")]
    InvalidFeature {
        /// Feature name.
        name: String,
        /// Underlying construction error.
        source: FootprintError,
    },

    /// Parameter file could not be parsed.
    #[error("failed to parse parameters: {0}")]
    Toml(#[from] toml::de::Error),

    /// Parameter set could not be written as TOML.
    #[error("failed to serialize parameters: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for parameter operations.
pub type Result<T> = std::result::Result<T, ParamError>;
