//! Buildings resolved into internal units.
//!
//! [`BuildingGeometry`] is what every geometry producer consumes. Its local
//! frame has the origin at the footprint center, local x along the ridge
//! and local y across the span; [`BuildingGeometry::transform`] places that
//! frame on the lot.

use serde::{Deserialize, Serialize};

use farmstead_footprint::{Footprint, FootprintCategory, FootprintError, RotatedRect};
use farmstead_math::frame::heading;
use farmstead_math::{rotate_vec2, to_internal, Point2, Transform, Vec2};

use crate::derive::{bay_lines, roof_height_at, RoofHeights};
use crate::set::{BuildingParams, Cardinal, OpeningParams, ParameterSet, UpperFloorParams};
use crate::{ParamError, Result};

/// A wall of a rectangular building, named in its local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// Gable wall at the start of the ridge (local -x).
    Start,
    /// Gable wall at the end of the ridge (local +x).
    End,
    /// Eave wall on the right walking along the ridge (local -y).
    Right,
    /// Eave wall on the left walking along the ridge (local +y).
    Left,
}

impl Face {
    /// Every face.
    pub const ALL: [Face; 4] = [Self::Start, Self::End, Self::Right, Self::Left];

    /// Outward normal in the local frame.
    pub fn local_normal(&self) -> Vec2 {
        match self {
            Self::Start => Vec2::new(-1.0, 0.0),
            Self::End => Vec2::new(1.0, 0.0),
            Self::Right => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(0.0, 1.0),
        }
    }

    /// Direction along the face in the local frame.
    pub fn local_tangent(&self) -> Vec2 {
        match self {
            Self::Start | Self::End => Vec2::new(0.0, 1.0),
            Self::Right | Self::Left => Vec2::new(1.0, 0.0),
        }
    }

    /// Gable ends carry the roof triangle.
    pub fn is_gable(&self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// A window or door on a resolved building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    /// Name from the parameter set.
    pub name: String,
    /// Wall the opening is cut into.
    pub face: Face,
    /// Offset of the opening's middle from the middle of the face, along
    /// [`Face::local_tangent`].
    pub offset: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Bottom edge above grade.
    pub sill: f64,
    /// Top edge above grade.
    pub head: f64,
}

/// A wall on an upper floor, in the local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperWall {
    /// Name from the parameter set.
    pub name: String,
    /// First endpoint.
    pub from: Point2,
    /// Second endpoint.
    pub to: Point2,
}

/// The floor one storey up, in the local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperFloor {
    /// Floor level above grade.
    pub level: f64,
    /// Local x range that carries a floor.
    pub floored: (f64, f64),
    /// Walls and rails.
    pub walls: Vec<UpperWall>,
}

/// A building in internal units with every secondary dimension derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingGeometry {
    /// Unique name.
    pub name: String,
    /// Footprint center on the lot.
    pub center: Point2,
    /// Extent along the ridge.
    pub length: f64,
    /// Extent across the ridge (the span).
    pub width: f64,
    /// Ridge direction from east, degrees CCW.
    pub angle_deg: f64,
    /// Rise over run.
    pub pitch: f64,
    /// Eave, rise and ridge.
    pub heights: RoofHeights,
    /// Roof overhang beyond the long walls.
    pub eave_overhang: f64,
    /// Roof overhang beyond the gable ends.
    pub rake_overhang: f64,
    /// Slab thickness used when the roof is flat.
    pub flat_roof_thickness: f64,
    /// Exterior wall thickness.
    pub wall_thickness: f64,
    /// Storey height.
    pub floor_to_floor: f64,
    /// Structural grid lines along the ridge, from the start of the building.
    pub bay_lines: Vec<f64>,
    /// Partition positions along the ridge, from the start of the building.
    pub partitions: Vec<f64>,
    /// Windows and doors.
    pub openings: Vec<Opening>,
    /// Upper floor, if any.
    pub upper_floor: Option<UpperFloor>,
}

impl BuildingGeometry {
    /// Local-to-world placement: rotate about the local origin, then move
    /// the origin to the center.
    pub fn transform(&self) -> Transform {
        Transform::placement(&self.center, self.angle_deg)
    }

    /// Map a local point to the lot.
    pub fn to_world(&self, local: &Point2) -> Point2 {
        self.center + rotate_vec2(local.coords, self.angle_deg)
    }

    /// Map a lot point into the local frame.
    pub fn to_local(&self, world: &Point2) -> Point2 {
        Point2::from(rotate_vec2(world - self.center, -self.angle_deg))
    }

    /// Unit vector along the ridge.
    pub fn ridge_dir(&self) -> Vec2 {
        heading(self.angle_deg)
    }

    /// Unit vector across the span, toward the left eave wall.
    pub fn span_dir(&self) -> Vec2 {
        heading(self.angle_deg + 90.0)
    }

    /// Whether the roof has no rise.
    pub fn is_flat(&self) -> bool {
        self.heights.is_flat()
    }

    /// Wall rectangle.
    pub fn wall_rect(&self) -> RotatedRect {
        RotatedRect::new(self.center, self.length, self.width, self.angle_deg)
    }

    /// Roof rectangle: the wall rectangle grown by the rake overhang at the
    /// gable ends and the eave overhang along the long walls.
    pub fn roof_rect(&self) -> RotatedRect {
        RotatedRect::new(
            self.center,
            self.length + 2.0 * self.rake_overhang,
            self.width + 2.0 * self.eave_overhang,
            self.angle_deg,
        )
    }

    /// Wall footprint, labelled with the building name.
    pub fn footprint(&self) -> std::result::Result<Footprint, FootprintError> {
        Ok(self
            .wall_rect()
            .to_footprint()?
            .with_category(FootprintCategory::Building)
            .with_label(self.name.clone()))
    }

    /// Roof footprint including overhangs.
    pub fn roof_footprint(&self) -> std::result::Result<Footprint, FootprintError> {
        Ok(self
            .roof_rect()
            .to_footprint()?
            .with_category(FootprintCategory::Building)
            .with_label(format!("{}_Roof", self.name)))
    }

    /// Local x of a position measured along the ridge from the start wall.
    pub fn along_ridge(&self, from_start: f64) -> f64 {
        from_start - self.length / 2.0
    }

    /// Half of the roof span including the eave overhangs.
    pub fn roof_half_span(&self) -> f64 {
        self.width / 2.0 + self.eave_overhang
    }

    /// Slope of the modelled roof planes. The roof triangle sits on the
    /// eave line at the overhang edge, so this is the pitch stretched over
    /// the overhang.
    pub fn roof_slope(&self) -> f64 {
        self.heights.rise / self.roof_half_span()
    }

    /// Roof surface height at local span coordinate `y`: the ridge at the
    /// center falling to the eave height at the overhang edge. Flat roofs
    /// are level at the eave.
    pub fn roof_height_at_span(&self, y: f64) -> f64 {
        if self.is_flat() {
            return self.heights.eave;
        }
        let from_eave_line = self.roof_half_span() - y.abs();
        roof_height_at(
            self.heights.eave,
            self.roof_slope(),
            from_eave_line,
            self.heights.ridge,
        )
    }

    /// Ridge line endpoints on the lot, over the wall length.
    pub fn ridge_line(&self) -> (Point2, Point2) {
        let hl = self.length / 2.0;
        (
            self.to_world(&Point2::new(-hl, 0.0)),
            self.to_world(&Point2::new(hl, 0.0)),
        )
    }

    /// Outward normal of a face on the lot.
    pub fn face_normal(&self, face: Face) -> Vec2 {
        rotate_vec2(face.local_normal(), self.angle_deg)
    }

    /// Middle of a face in the local frame.
    pub fn face_center_local(&self, face: Face) -> Point2 {
        let n = face.local_normal();
        Point2::new(n.x * self.length / 2.0, n.y * self.width / 2.0)
    }

    /// Length of a face.
    pub fn face_length(&self, face: Face) -> f64 {
        if face.is_gable() {
            self.width
        } else {
            self.length
        }
    }

    /// The face whose outward normal is closest to a cardinal direction.
    pub fn face_toward(&self, cardinal: Cardinal) -> Face {
        let [cx, cy] = cardinal.unit();
        let target = Vec2::new(cx, cy);
        let mut best = Face::Start;
        let mut best_dot = f64::NEG_INFINITY;
        for face in Face::ALL {
            let d = self.face_normal(face).dot(&target);
            if d > best_dot + 1e-12 {
                best = face;
                best_dot = d;
            }
        }
        best
    }

    /// Horizontal endpoints of an opening on the lot.
    pub fn opening_endpoints(&self, opening: &Opening) -> (Point2, Point2) {
        let mid = self.face_center_local(opening.face) + opening.face.local_tangent() * opening.offset;
        let half = opening.face.local_tangent() * (opening.width / 2.0);
        (self.to_world(&(mid - half)), self.to_world(&(mid + half)))
    }

    /// Local point of building coordinates in feet: `along` the ridge from
    /// the start wall and `across` the span from the right-hand long wall.
    pub fn local_from_building_feet(&self, [along, across]: [f64; 2]) -> Point2 {
        Point2::new(
            self.along_ridge(to_internal(along)),
            to_internal(across) - self.width / 2.0,
        )
    }

    fn resolve_upper_floor(&self, upper: &UpperFloorParams) -> UpperFloor {
        let [start, end] = upper.floored;
        UpperFloor {
            level: self.floor_to_floor,
            floored: (
                self.along_ridge(to_internal(start)),
                self.along_ridge(to_internal(end)),
            ),
            walls: upper
                .walls
                .iter()
                .map(|w| UpperWall {
                    name: w.name.clone(),
                    from: self.local_from_building_feet(w.from),
                    to: self.local_from_building_feet(w.to),
                })
                .collect(),
        }
    }

    fn resolve_opening(&self, o: &OpeningParams) -> Opening {
        let face = self.face_toward(o.facade);
        let tangent = rotate_vec2(face.local_tangent(), self.angle_deg);
        let reference = match o.facade {
            Cardinal::North | Cardinal::South => Vec2::new(1.0, 0.0),
            Cardinal::East | Cardinal::West => Vec2::new(0.0, 1.0),
        };
        let sign = if tangent.dot(&reference) >= 0.0 { 1.0 } else { -1.0 };
        Opening {
            name: o.name.clone(),
            face,
            offset: sign * to_internal(o.offset),
            width: to_internal(o.width),
            sill: to_internal(o.sill),
            head: to_internal(o.head),
        }
    }
}

impl ParameterSet {
    /// Resolve one building by name.
    pub fn resolve_building(&self, name: &str) -> Result<BuildingGeometry> {
        self.building(name)
            .map(|b| self.resolve(b))
            .ok_or_else(|| ParamError::UnknownBuilding(name.to_string()))
    }

    /// Resolve every building, in declaration order.
    pub fn resolve_buildings(&self) -> Vec<BuildingGeometry> {
        self.buildings.iter().map(|b| self.resolve(b)).collect()
    }

    fn resolve(&self, b: &BuildingParams) -> BuildingGeometry {
        let ([cx, cy], length_ft, width_ft) = b.dimensions();
        let (eave_oh, rake_oh) = match &b.overhang {
            Some(o) => (o.eave, o.rake),
            None => (self.roof.eave_overhang, self.roof.rake_overhang),
        };
        let heights = RoofHeights::derive(
            to_internal(b.eave_height),
            to_internal(width_ft),
            b.pitch,
        );
        let bays = match b.bay_spacing {
            Some(spacing) => bay_lines(length_ft, spacing, b.trailing_bay),
            None => vec![0.0, length_ft],
        };

        let mut geometry = BuildingGeometry {
            name: b.name.clone(),
            center: Point2::new(to_internal(cx), to_internal(cy)),
            length: to_internal(length_ft),
            width: to_internal(width_ft),
            angle_deg: b.angle_deg(),
            pitch: b.pitch,
            heights,
            eave_overhang: to_internal(eave_oh),
            rake_overhang: to_internal(rake_oh),
            flat_roof_thickness: to_internal(self.roof.flat_roof_thickness),
            wall_thickness: to_internal(self.structure.wall_thickness),
            floor_to_floor: to_internal(self.structure.floor_to_floor),
            bay_lines: bays.into_iter().map(to_internal).collect(),
            partitions: b.partitions.iter().copied().map(to_internal).collect(),
            openings: Vec::new(),
            upper_floor: None,
        };
        geometry.openings = b
            .openings
            .iter()
            .map(|o| geometry.resolve_opening(o))
            .collect();
        geometry.upper_floor = b
            .upper_floor
            .as_ref()
            .map(|u| geometry.resolve_upper_floor(u));
        geometry
    }
}
