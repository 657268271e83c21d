//! The build pipeline: one parameter set in, every drawing and solid out.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use farmstead_drafting::{
    layout_sheet, project_elevation_with_options, section_view_with_options, ElevationOptions,
    SectionOptions, SectionPlane, ViewDirection, ViewProfile,
};
use farmstead_massing::{build_volume, ground_slab, BuildingVolume, Solid};
use farmstead_math::{to_internal, Aabb2};
use farmstead_params::{BuildingGeometry, ParameterSet};

use crate::grid::{structural_grid, StructuralGrid};
use crate::plan::{floor_plan, FloorPlan};
use crate::site::{plant_trees, site_plan, SitePlan};
use crate::Result;

/// Options for a build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    /// Scatter seed. `None` uses the parameter set's seed.
    pub seed: Option<u64>,
    /// Elevation settings.
    pub elevation: ElevationOptions,
    /// Section settings.
    pub section: SectionOptions,
    /// Space between views on the sheet.
    pub sheet_gap: f64,
    /// Depth of the ground slab below grade.
    pub ground_thickness: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            seed: None,
            elevation: ElevationOptions::default(),
            section: SectionOptions::default(),
            sheet_gap: to_internal(20.0),
            ground_thickness: to_internal(1.0),
        }
    }
}

/// Everything derived from one parameter set, in internal units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compound {
    /// Resolved buildings, in declaration order.
    pub buildings: Vec<BuildingGeometry>,
    /// Wall and roof solids per building.
    pub volumes: Vec<BuildingVolume>,
    /// Slab under the lot.
    pub ground: Solid,
    /// Site plan with trees.
    pub site: SitePlan,
    /// Floor plan linework.
    pub floor_plan: FloorPlan,
    /// Structural grid per building.
    pub grids: Vec<StructuralGrid>,
    /// Elevations in sheet order (west, south, east, north).
    pub elevations: Vec<ViewProfile>,
    /// Sections in declaration order.
    pub sections: Vec<ViewProfile>,
    /// Bounds of the laid-out sheet.
    pub sheet: Aabb2,
}

/// Build the whole compound.
///
/// Volumes are built in parallel; elevations run in parallel beside the
/// tree scatter. Results keep input order, so the output matches a
/// sequential build exactly.
pub fn build_compound(params: &ParameterSet, options: &BuildOptions) -> Result<Compound> {
    params.validate()?;
    let buildings = params.resolve_buildings();
    let lot = params.lot_bounds();

    let volumes = buildings
        .par_iter()
        .map(build_volume)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let (elevations, trees) = rayon::join(
        || {
            ViewDirection::LAYOUT_ORDER
                .par_iter()
                .map(|dir| project_elevation_with_options(&buildings, &lot, *dir, &options.elevation))
                .collect::<Vec<_>>()
        },
        || plant_trees(params, options.seed),
    );
    let trees = trees?;

    let sections = params
        .sections
        .par_iter()
        .map(|s| {
            section_view_with_options(&buildings, &lot, &SectionPlane::from_params(s), &options.section)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut rows = vec![elevations, sections];
    let sheet = layout_sheet(&mut rows, options.sheet_gap);
    let sections = rows.pop().unwrap_or_default();
    let elevations = rows.pop().unwrap_or_default();

    let grids = buildings
        .iter()
        .map(structural_grid)
        .collect::<Result<Vec<_>>>()?;

    let compound = Compound {
        ground: ground_slab(&lot, options.ground_thickness)?,
        site: site_plan(params, &buildings, trees)?,
        floor_plan: floor_plan(&buildings)?,
        grids,
        volumes,
        elevations,
        sections,
        sheet,
        buildings,
    };

    info!(
        buildings = compound.buildings.len(),
        elevations = compound.elevations.len(),
        sections = compound.sections.len(),
        trees = compound.site.trees.trees.len(),
        skipped = compound.site.trees.skipped,
        "built compound"
    );
    Ok(compound)
}
