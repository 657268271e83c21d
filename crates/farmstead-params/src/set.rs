//! The parameter set and its validation.
//!
//! All lengths here are in feet. A parameter set is only ever handed out
//! after [`ParameterSet::validate`] has accepted it; values are rejected,
//! never clamped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use farmstead_footprint::FootprintCategory;

use crate::derive::{TrailingBay, MAX_BAYS, MAX_PITCH};
use crate::{ParamError, Result};

/// Lot extent and setbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteParams {
    /// East-west extent of the lot.
    pub lot_width: f64,
    /// North-south extent of the lot.
    pub lot_depth: f64,
    /// Setback from the south (street) edge.
    pub setback_front: f64,
    /// Setback from the east and west edges.
    pub setback_side: f64,
    /// Setback from the north edge.
    pub setback_rear: f64,
}

/// Roof defaults shared by every building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofParams {
    /// Overhang beyond the long (eave) walls.
    pub eave_overhang: f64,
    /// Overhang beyond the gable ends.
    pub rake_overhang: f64,
    /// Thickness of the slab drawn for flat roofs.
    #[serde(default = "default_flat_roof_thickness")]
    pub flat_roof_thickness: f64,
}

fn default_flat_roof_thickness() -> f64 {
    1.0
}

impl Default for RoofParams {
    fn default() -> Self {
        Self {
            eave_overhang: 0.0,
            rake_overhang: 0.0,
            flat_roof_thickness: default_flat_roof_thickness(),
        }
    }
}

/// Per-building override of the roof overhangs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverhangParams {
    /// Overhang beyond the long walls.
    pub eave: f64,
    /// Overhang beyond the gable ends.
    pub rake: f64,
}

/// Construction dimensions used by plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureParams {
    /// Exterior wall thickness, drawn inward from the footprint.
    pub wall_thickness: f64,
    /// Storey height used for upper-floor sections.
    pub floor_to_floor: f64,
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            wall_thickness: 10.0 / 12.0,
            floor_to_floor: 10.5,
        }
    }
}

/// Direction the ridge of a building runs before any extra rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RidgeAxis {
    /// Ridge runs east-west.
    #[default]
    EastWest,
    /// Ridge runs north-south.
    NorthSouth,
}

impl RidgeAxis {
    /// Angle of the axis from east, degrees CCW.
    pub fn base_angle(&self) -> f64 {
        match self {
            Self::EastWest => 0.0,
            Self::NorthSouth => 90.0,
        }
    }
}

/// How a building's footprint is located on the lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Axis-aligned box from two corners. Length follows the ridge axis.
    Corners {
        /// South-west corner `[x, y]`.
        min: [f64; 2],
        /// North-east corner `[x, y]`.
        max: [f64; 2],
    },
    /// Center plus dimensions along and across the ridge.
    Centered {
        /// Center `[x, y]`.
        center: [f64; 2],
        /// Extent along the ridge.
        length: f64,
        /// Extent across the ridge (the span).
        width: f64,
    },
}

/// A horizontal cardinal direction, used to name the facade an opening is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinal {
    /// +Y
    North,
    /// -Y
    South,
    /// +X
    East,
    /// -X
    West,
}

impl Cardinal {
    /// All four, clockwise from north.
    pub const ALL: [Cardinal; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit vector in the ground plane.
    pub fn unit(&self) -> [f64; 2] {
        match self {
            Self::North => [0.0, 1.0],
            Self::South => [0.0, -1.0],
            Self::East => [1.0, 0.0],
            Self::West => [-1.0, 0.0],
        }
    }
}

/// A window or door, placed on a facade.
///
/// `offset` is measured from the middle of the facade, positive toward the
/// east on north and south facades and toward the north on east and west
/// facades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningParams {
    /// Name for downstream labelling.
    pub name: String,
    /// Facade the opening is cut into.
    pub facade: Cardinal,
    /// Offset of the opening's middle from the middle of the facade.
    #[serde(default)]
    pub offset: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Bottom edge above grade (zero for doors).
    #[serde(default)]
    pub sill: f64,
    /// Top edge above grade.
    pub head: f64,
}

/// A wall on an upper floor, as a segment in building coordinates: each
/// point is `[along, across]`, measured along the ridge from the start wall
/// and across the span from the right-hand long wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperWallParams {
    /// Name for downstream labelling.
    pub name: String,
    /// First endpoint.
    pub from: [f64; 2],
    /// Second endpoint.
    pub to: [f64; 2],
}

/// The floor one storey up inside a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperFloorParams {
    /// Stretch along the ridge that carries a floor, `[start, end]`. The
    /// rest of the building is open to below.
    pub floored: [f64; 2],
    /// Walls and rails, in building coordinates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<UpperWallParams>,
}

/// One roofed building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingParams {
    /// Unique name.
    pub name: String,
    /// Location and size.
    pub placement: Placement,
    /// Direction of the ridge before `rotation`.
    #[serde(default)]
    pub ridge: RidgeAxis,
    /// Extra rotation about the center, degrees CCW.
    #[serde(default)]
    pub rotation: f64,
    /// Wall-plate height.
    pub eave_height: f64,
    /// Roof pitch as rise over run; zero for a flat roof.
    pub pitch: f64,
    /// Overrides the shared roof overhangs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhang: Option<OverhangParams>,
    /// Structural bay spacing along the ridge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bay_spacing: Option<f64>,
    /// Treatment of the leftover bay.
    #[serde(default)]
    pub trailing_bay: TrailingBay,
    /// Interior partitions across the span, measured along the ridge from
    /// the start of the building.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<f64>,
    /// Windows and doors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openings: Vec<OpeningParams>,
    /// Upper floor, if the building has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_floor: Option<UpperFloorParams>,
}

impl BuildingParams {
    /// Center, length along the ridge and width across it, in feet.
    pub fn dimensions(&self) -> ([f64; 2], f64, f64) {
        match &self.placement {
            Placement::Corners { min, max } => {
                let dx = (max[0] - min[0]).abs();
                let dy = (max[1] - min[1]).abs();
                let center = [(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0];
                match self.ridge {
                    RidgeAxis::EastWest => (center, dx, dy),
                    RidgeAxis::NorthSouth => (center, dy, dx),
                }
            }
            Placement::Centered {
                center,
                length,
                width,
            } => (*center, *length, *width),
        }
    }

    /// Ridge direction from east, degrees CCW.
    pub fn angle_deg(&self) -> f64 {
        self.ridge.base_angle() + self.rotation
    }
}

/// Shape of a plan-only feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureShape {
    /// Axis-aligned rectangle.
    Rect {
        /// South-west corner.
        min: [f64; 2],
        /// North-east corner.
        max: [f64; 2],
    },
    /// Closed outline, vertices in the author's order.
    Polygon {
        /// Vertices.
        points: Vec<[f64; 2]>,
    },
    /// Open path.
    Polyline {
        /// Vertices.
        points: Vec<[f64; 2]>,
    },
}

/// Courtyards, canopies, porches, drives: anything drawn on the site plan
/// without a roofed volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    /// Name, carried to the footprint label.
    pub name: String,
    /// Semantic category.
    pub category: FootprintCategory,
    /// Outline.
    pub shape: FeatureShape,
    /// When set, the feature's bounds grown by this margin exclude trees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_margin: Option<f64>,
}

/// Explicit tree exclusion zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneParams {
    /// Name for diagnostics.
    pub name: String,
    /// South-west corner.
    pub min: [f64; 2],
    /// North-east corner.
    pub max: [f64; 2],
}

/// A vertical section cut. Planes looking north or south sit at a fixed
/// `y`; planes looking east or west sit at a fixed `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionParams {
    /// Title, e.g. "Section A".
    pub name: String,
    /// Direction the viewer looks.
    pub looking: Cardinal,
    /// Fixed coordinate of the plane.
    pub position: f64,
}

/// Settings for the tree scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Upper bound on the number of trees.
    pub target: usize,
    /// Seed used when the caller does not pass one.
    pub seed: u64,
    /// Smallest canopy radius.
    pub radius_min: f64,
    /// Largest canopy radius.
    pub radius_max: f64,
    /// Depth of the perimeter band sampled in the first phase.
    pub perimeter_buffer: f64,
    /// Share of the target placed in the perimeter phase.
    pub perimeter_fraction: f64,
    /// Clear distance kept between a canopy and the lot edge.
    pub edge_margin: f64,
    /// Attempts per tree before it is skipped.
    pub max_retries: u32,
    /// Margin added around every building's bounds.
    pub building_margin: f64,
    /// Reject trees whose canopy, not just center, touches an exclusion zone.
    #[serde(default)]
    pub canopy_clearance: bool,
    /// Minimum clear gap between canopies. Unset allows overlap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_gap: Option<f64>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            target: 0,
            seed: 0,
            radius_min: 4.0,
            radius_max: 8.0,
            perimeter_buffer: 30.0,
            perimeter_fraction: 0.4,
            edge_margin: 3.0,
            max_retries: 5000,
            building_margin: 4.0,
            canopy_clearance: false,
            min_gap: None,
        }
    }
}

/// The single source of truth for a compound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Lot and setbacks.
    pub site: SiteParams,
    /// Roof defaults.
    #[serde(default)]
    pub roof: RoofParams,
    /// Wall and storey dimensions.
    #[serde(default)]
    pub structure: StructureParams,
    /// Tree scatter settings.
    #[serde(default)]
    pub trees: TreeParams,
    /// Roofed buildings.
    #[serde(default)]
    pub buildings: Vec<BuildingParams>,
    /// Plan-only features.
    #[serde(default)]
    pub features: Vec<FeatureParams>,
    /// Explicit tree exclusion zones.
    #[serde(default)]
    pub exclusions: Vec<ZoneParams>,
    /// Section cuts drawn with the elevations.
    #[serde(default)]
    pub sections: Vec<SectionParams>,
}

impl ParameterSet {
    /// Parse and validate a TOML parameter file.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let params: Self = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Write the set as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Look up a building by name.
    pub fn building(&self, name: &str) -> Option<&BuildingParams> {
        self.buildings.iter().find(|b| b.name == name)
    }

    /// Check every value. Fails on the first problem found.
    pub fn validate(&self) -> Result<()> {
        let site = &self.site;
        positive("site.lot_width", site.lot_width)?;
        positive("site.lot_depth", site.lot_depth)?;
        non_negative("site.setback_front", site.setback_front)?;
        non_negative("site.setback_side", site.setback_side)?;
        non_negative("site.setback_rear", site.setback_rear)?;
        within(
            "site.setback_front + site.setback_rear",
            site.setback_front + site.setback_rear,
            0.0,
            site.lot_depth,
        )?;
        within(
            "2 * site.setback_side",
            2.0 * site.setback_side,
            0.0,
            site.lot_width,
        )?;

        non_negative("roof.eave_overhang", self.roof.eave_overhang)?;
        non_negative("roof.rake_overhang", self.roof.rake_overhang)?;
        positive("roof.flat_roof_thickness", self.roof.flat_roof_thickness)?;
        non_negative("structure.wall_thickness", self.structure.wall_thickness)?;
        positive("structure.floor_to_floor", self.structure.floor_to_floor)?;

        let mut names = HashSet::new();
        for b in &self.buildings {
            if !names.insert(b.name.as_str()) {
                return Err(ParamError::DuplicateBuilding(b.name.clone()));
            }
            self.validate_building(b)?;
        }

        for f in &self.features {
            crate::site::feature_footprint(f)?;
            if let Some(m) = f.exclusion_margin {
                non_negative(&format!("features.{}.exclusion_margin", f.name), m)?;
            }
        }
        for z in &self.exclusions {
            let path = format!("exclusions.{}", z.name);
            for (i, v) in z.min.iter().chain(z.max.iter()).enumerate() {
                finite(&format!("{path}[{i}]"), *v)?;
            }
            ordered(&format!("{path}.x"), z.min[0], z.max[0])?;
            ordered(&format!("{path}.y"), z.min[1], z.max[1])?;
        }

        for sec in &self.sections {
            let path = format!("sections.{}.position", sec.name);
            let extent = match sec.looking {
                Cardinal::North | Cardinal::South => site.lot_depth,
                Cardinal::East | Cardinal::West => site.lot_width,
            };
            finite(&path, sec.position)?;
            within(&path, sec.position, 0.0, extent)?;
        }

        self.validate_trees()
    }

    fn validate_trees(&self) -> Result<()> {
        let t = &self.trees;
        positive("trees.radius_min", t.radius_min)?;
        finite("trees.radius_max", t.radius_max)?;
        ordered("trees.radius", t.radius_min, t.radius_max)?;
        non_negative("trees.perimeter_buffer", t.perimeter_buffer)?;
        non_negative("trees.edge_margin", t.edge_margin)?;
        non_negative("trees.building_margin", t.building_margin)?;
        if !(0.0..=1.0).contains(&t.perimeter_fraction) {
            return Err(ParamError::InvalidFraction {
                name: "trees.perimeter_fraction".into(),
                value: t.perimeter_fraction,
            });
        }
        if let Some(gap) = t.min_gap {
            non_negative("trees.min_gap", gap)?;
        }
        Ok(())
    }

    fn validate_building(&self, b: &BuildingParams) -> Result<()> {
        let path = |field: &str| format!("buildings.{}.{}", b.name, field);

        let (center, length, width) = b.dimensions();
        finite(&path("center.x"), center[0])?;
        finite(&path("center.y"), center[1])?;
        positive(&path("length"), length)?;
        positive(&path("width"), width)?;
        finite(&path("rotation"), b.rotation)?;
        positive(&path("eave_height"), b.eave_height)?;

        if !(b.pitch.is_finite() && (0.0..=MAX_PITCH).contains(&b.pitch)) {
            return Err(ParamError::InvalidPitch {
                name: path("pitch"),
                pitch: b.pitch,
            });
        }
        if let Some(o) = &b.overhang {
            non_negative(&path("overhang.eave"), o.eave)?;
            non_negative(&path("overhang.rake"), o.rake)?;
        }
        if b.pitch == 0.0 && self.roof.flat_roof_thickness >= b.eave_height {
            return Err(ParamError::OutOfRange {
                name: path("eave_height"),
                value: b.eave_height,
                min: self.roof.flat_roof_thickness,
                max: f64::INFINITY,
            });
        }
        if let Some(s) = b.bay_spacing {
            positive(&path("bay_spacing"), s)?;
            let narrowest = length / MAX_BAYS as f64;
            if s < narrowest {
                return Err(ParamError::OutOfRange {
                    name: path("bay_spacing"),
                    value: s,
                    min: narrowest,
                    max: f64::INFINITY,
                });
            }
        }
        if let TrailingBay::Merge { min } = b.trailing_bay {
            non_negative(&path("trailing_bay.min"), min)?;
        }
        for (i, p) in b.partitions.iter().enumerate() {
            finite(&path(&format!("partitions[{i}]")), *p)?;
            if !(*p > 0.0 && *p < length) {
                return Err(ParamError::OutOfRange {
                    name: path(&format!("partitions[{i}]")),
                    value: *p,
                    min: 0.0,
                    max: length,
                });
            }
        }
        for o in &b.openings {
            let op = |field: &str| path(&format!("openings.{}.{}", o.name, field));
            finite(&op("offset"), o.offset)?;
            positive(&op("width"), o.width)?;
            non_negative(&op("sill"), o.sill)?;
            finite(&op("head"), o.head)?;
            if o.head <= o.sill {
                return Err(ParamError::InvalidRange {
                    name: op("sill..head"),
                    min: o.sill,
                    max: o.head,
                });
            }
        }
        if let Some(upper) = &b.upper_floor {
            self.validate_upper_floor(b, upper)?;
        }
        Ok(())
    }

    fn validate_upper_floor(&self, b: &BuildingParams, upper: &UpperFloorParams) -> Result<()> {
        let path = |field: &str| format!("buildings.{}.upper_floor.{}", b.name, field);
        let (_, length, width) = b.dimensions();

        if self.structure.floor_to_floor >= b.eave_height {
            return Err(ParamError::OutOfRange {
                name: "structure.floor_to_floor".into(),
                value: self.structure.floor_to_floor,
                min: 0.0,
                max: b.eave_height,
            });
        }

        let [start, end] = upper.floored;
        inside(&path("floored[0]"), start, length)?;
        inside(&path("floored[1]"), end, length)?;
        if start >= end {
            return Err(ParamError::InvalidRange {
                name: path("floored"),
                min: start,
                max: end,
            });
        }

        for w in &upper.walls {
            let wp = |field: &str| path(&format!("walls.{}.{}", w.name, field));
            for (field, [along, across]) in [("from", w.from), ("to", w.to)] {
                inside(&wp(&format!("{field}[0]")), along, length)?;
                inside(&wp(&format!("{field}[1]")), across, width)?;
            }
            let run = (w.to[0] - w.from[0]).hypot(w.to[1] - w.from[1]);
            positive(&wp("length"), run)?;
        }
        Ok(())
    }
}

fn finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NonFinite { name: name.into() })
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::NonPositive {
            name: name.into(),
            value,
        })
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::Negative {
            name: name.into(),
            value,
        })
    }
}

fn ordered(name: &str, min: f64, max: f64) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(ParamError::InvalidRange {
            name: name.into(),
            min,
            max,
        })
    }
}

fn within(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value >= min && value < max {
        Ok(())
    } else {
        Err(ParamError::OutOfRange {
            name: name.into(),
            value,
            min,
            max,
        })
    }
}

/// Finite and within `[0, extent]`.
fn inside(name: &str, value: f64, extent: f64) -> Result<()> {
    finite(name, value)?;
    if (0.0..=extent).contains(&value) {
        Ok(())
    } else {
        Err(ParamError::OutOfRange {
            name: name.into(),
            value,
            min: 0.0,
            max: extent,
        })
    }
}
