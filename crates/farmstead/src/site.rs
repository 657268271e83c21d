//! Site plan: lot, setbacks, building and feature outlines, trees.

use serde::Serialize;
use tracing::debug;

use farmstead_footprint::Footprint;
use farmstead_math::{to_internal, Aabb2};
use farmstead_params::{BuildingGeometry, ParameterSet};
use farmstead_scatter::{scatter, ScatterConfig, ScatterResult};

use crate::Result;

/// Everything drawn on the site plan, in internal units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitePlan {
    /// Lot boundary.
    pub lot: Footprint,
    /// Setback line.
    pub setback: Footprint,
    /// Wall outlines, rotated where declared.
    pub buildings: Vec<Footprint>,
    /// Roof outlines including overhangs.
    pub roofs: Vec<Footprint>,
    /// Courtyard, porch, canopy, walls, drives and other plan features.
    pub features: Vec<Footprint>,
    /// Rectangles kept clear of trees.
    pub exclusions: Vec<Aabb2>,
    /// Placed trees.
    pub trees: ScatterResult,
}

/// Scatter settings for the whole lot, converted to internal units.
pub fn scatter_config(params: &ParameterSet) -> ScatterConfig {
    let t = &params.trees;
    ScatterConfig {
        radius_min: to_internal(t.radius_min),
        radius_max: to_internal(t.radius_max),
        perimeter_buffer: to_internal(t.perimeter_buffer),
        perimeter_fraction: t.perimeter_fraction,
        edge_margin: to_internal(t.edge_margin),
        max_retries: t.max_retries,
        canopy_clearance: t.canopy_clearance,
        min_gap: t.min_gap.map(to_internal),
        ..ScatterConfig::new(params.lot_bounds(), t.target)
    }
}

/// Plant trees over the lot, clear of every exclusion zone. `seed`
/// overrides the parameter set's seed.
pub fn plant_trees(params: &ParameterSet, seed: Option<u64>) -> Result<ScatterResult> {
    let zones = params.exclusion_zones()?;
    let seed = seed.unwrap_or(params.trees.seed);
    Ok(scatter(&scatter_config(params), &zones, seed)?)
}

/// Assemble the site plan from resolved buildings and placed trees.
pub fn site_plan(
    params: &ParameterSet,
    buildings: &[BuildingGeometry],
    trees: ScatterResult,
) -> Result<SitePlan> {
    let mut outlines = Vec::with_capacity(buildings.len());
    let mut roofs = Vec::with_capacity(buildings.len());
    for b in buildings {
        outlines.push(b.footprint()?);
        roofs.push(b.roof_footprint()?);
    }
    let plan = SitePlan {
        lot: params.lot_footprint()?,
        setback: params.setback_footprint()?,
        buildings: outlines,
        roofs,
        features: params.resolve_features()?,
        exclusions: params.exclusion_zones()?,
        trees,
    };
    debug!(
        buildings = plan.buildings.len(),
        features = plan.features.len(),
        zones = plan.exclusions.len(),
        trees = plan.trees.trees.len(),
        "assembled site plan"
    );
    Ok(plan)
}
