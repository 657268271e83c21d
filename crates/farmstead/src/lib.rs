#![warn(missing_docs)]

//! farmstead: parametric farmhouse compound geometry.
//!
//! One [`ParameterSet`] drives every drawing and solid of a compound:
//! site plan with a seeded tree scatter, floor plan, structural grid,
//! wall and roof massing, four elevations and any number of sections.
//! Nothing is cached; change a parameter and build again.
//!
//! # Example
//!
//! ```
//! use farmstead::{build_compound, BuildOptions, ParameterSet};
//!
//! let params = ParameterSet::farmhouse();
//! let compound = build_compound(&params, &BuildOptions::default()).unwrap();
//!
//! assert_eq!(compound.volumes.len(), params.buildings.len());
//! assert_eq!(compound.elevations.len(), 4);
//! ```

mod compound;
pub mod grid;
pub mod plan;
pub mod site;

pub use compound::{build_compound, BuildOptions, Compound};
pub use grid::{structural_grid, Column, GridLine, StructuralGrid};
pub use plan::{floor_plan, FloorPlan, UpperPlan};
pub use site::{plant_trees, scatter_config, site_plan, SitePlan};

// Re-export the layers for single-dependency users
pub use farmstead_drafting as drafting;
pub use farmstead_footprint as footprint;
pub use farmstead_massing as massing;
pub use farmstead_math as math;
pub use farmstead_params as params;
pub use farmstead_scatter as scatter;

pub use farmstead_drafting::{ViewDirection, ViewProfile};
pub use farmstead_footprint::{Footprint, FootprintCategory};
pub use farmstead_massing::BuildingVolume;
pub use farmstead_params::{BuildingGeometry, ParameterSet};

use farmstead_drafting::DraftingError;
use farmstead_footprint::FootprintError;
use farmstead_massing::MassingError;
use farmstead_params::ParamError;
use farmstead_scatter::ScatterError;
use thiserror::Error;

/// Errors from building a compound.
#[derive(Debug, Error)]
pub enum FarmsteadError {
    /// The parameter set is invalid.
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamError),

    /// An outline could not be built.
    #[error("footprint error: {0}")]
    Footprint(#[from] FootprintError),

    /// The scatter settings are invalid.
    #[error("scatter error: {0}")]
    Scatter(#[from] ScatterError),

    /// A solid could not be built.
    #[error("massing error: {0}")]
    Massing(#[from] MassingError),

    /// A view could not be drawn.
    #[error("drafting error: {0}")]
    Drafting(#[from] DraftingError),
}

/// Result type for compound builds.
pub type Result<T> = std::result::Result<T, FarmsteadError>;
