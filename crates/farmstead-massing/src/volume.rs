//! Per-building volumes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_footprint::Footprint;
use farmstead_math::{Aabb2, Point2, Transform};
use farmstead_params::{BuildingGeometry, RoofHeights};

use crate::{MassingError, Result, Solid, TriangleMesh};

/// Shape of the roof solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofKind {
    /// Triangular prism along the ridge.
    Gable,
    /// Thin slab under the eave line.
    Flat,
}

/// Walls and roof of one building, placed on the lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingVolume {
    /// Building name.
    pub name: String,
    /// Wall box: footprint by eave height.
    pub walls: Solid,
    /// Roof solid over the overhang-grown footprint.
    pub roof: Solid,
    /// Gable or flat.
    pub roof_kind: RoofKind,
    /// Eave, rise and ridge.
    pub heights: RoofHeights,
    /// Wall footprint on the lot.
    pub footprint: Footprint,
    /// Roof footprint on the lot.
    pub roof_footprint: Footprint,
    /// Pivot of the placement (footprint center).
    pub center: Point2,
    /// Ridge direction from east, degrees CCW.
    pub angle_deg: f64,
}

impl BuildingVolume {
    /// Rotate the whole volume, walls and roof together, about the vertical
    /// axis through its center.
    pub fn rotated(&self, delta_deg: f64) -> Self {
        let t = Transform::rotation_about_vertical(&self.center, delta_deg);
        Self {
            name: self.name.clone(),
            walls: self.walls.transformed(&t),
            roof: self.roof.transformed(&t),
            roof_kind: self.roof_kind,
            heights: self.heights,
            footprint: self.footprint.transformed(&t),
            roof_footprint: self.roof_footprint.transformed(&t),
            center: self.center,
            angle_deg: self.angle_deg + delta_deg,
        }
    }

    /// Highest point of the volume.
    pub fn max_height(&self) -> f64 {
        let (_, walls_max) = self.walls.bounds();
        let (_, roof_max) = self.roof.bounds();
        walls_max.z.max(roof_max.z)
    }

    /// Walls and roof in one mesh, walls first.
    pub fn to_mesh(&self) -> TriangleMesh {
        let mut mesh = self.walls.to_mesh();
        mesh.append(self.roof.to_mesh());
        mesh
    }
}

/// Build the volume of one resolved building.
///
/// Both solids are made in the local frame (origin at the footprint center,
/// ridge along local x) and then placed with the building's single rigid
/// transform. Overhangs grow only the roof.
pub fn build_volume(b: &BuildingGeometry) -> Result<BuildingVolume> {
    let hl = b.length / 2.0;
    let hw = b.width / 2.0;
    let roof_hl = hl + b.rake_overhang;
    let roof_hs = b.roof_half_span();
    let h = b.heights;

    let walls = Solid::centered_box(hl, hw, 0.0, h.eave)?;
    let (roof, roof_kind) = if h.is_flat() {
        let slab = Solid::centered_box(roof_hl, roof_hs, h.eave - b.flat_roof_thickness, h.eave)?;
        (slab, RoofKind::Flat)
    } else {
        let prism = Solid::gable_prism(roof_hl, roof_hs, h.eave, h.ridge)?;
        (prism, RoofKind::Gable)
    };

    let placement = b.transform();
    let volume = BuildingVolume {
        name: b.name.clone(),
        walls: walls.transformed(&placement),
        roof: roof.transformed(&placement),
        roof_kind,
        heights: h,
        footprint: b.footprint()?,
        roof_footprint: b.roof_footprint()?,
        center: b.center,
        angle_deg: b.angle_deg,
    };
    debug!(
        building = %b.name,
        ?roof_kind,
        eave = h.eave,
        ridge = h.ridge,
        angle = b.angle_deg,
        "built volume"
    );
    Ok(volume)
}

/// Slab under the whole lot, from `-thickness` up to grade.
pub fn ground_slab(lot: &Aabb2, thickness: f64) -> Result<Solid> {
    if !lot.is_valid() {
        return Err(MassingError::InvalidDimension {
            name: "lot extent",
            value: lot.area(),
        });
    }
    let c = lot.center();
    let slab = Solid::centered_box(lot.width() / 2.0, lot.height() / 2.0, -thickness, 0.0)?;
    Ok(slab.transformed(&Transform::translation(c.x, c.y, 0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use farmstead_math::{to_internal, Point3};
    use farmstead_params::ParameterSet;

    fn volume_of(name: &str) -> BuildingVolume {
        let params = ParameterSet::farmhouse();
        build_volume(&params.resolve_building(name).unwrap()).unwrap()
    }

    #[test]
    fn test_main_bar_solids() {
        let main = volume_of("Main");
        assert_eq!(main.roof_kind, RoofKind::Gable);
        let (wmin, wmax) = main.walls.bounds();
        assert!((wmin - Point3::new(to_internal(68.0), to_internal(85.0), 0.0)).norm() < 1e-6);
        assert!((wmax - Point3::new(to_internal(132.0), to_internal(115.0), to_internal(12.0))).norm() < 1e-6);

        let (rmin, rmax) = main.roof.bounds();
        // rake 2 ft at the gable ends, eave 4 ft along the long walls
        assert_relative_eq!(rmin.x, to_internal(66.0), epsilon = 1e-6);
        assert_relative_eq!(rmax.x, to_internal(134.0), epsilon = 1e-6);
        assert_relative_eq!(rmin.y, to_internal(81.0), epsilon = 1e-6);
        assert_relative_eq!(rmax.y, to_internal(119.0), epsilon = 1e-6);
        assert_relative_eq!(rmin.z, to_internal(12.0), epsilon = 1e-6);
        assert_relative_eq!(rmax.z, to_internal(22.0), epsilon = 1e-6);
        assert_relative_eq!(main.max_height(), to_internal(22.0), epsilon = 1e-6);
    }

    #[test]
    fn test_overhang_only_grows_roof() {
        let params = ParameterSet::farmhouse();
        for b in params.resolve_buildings() {
            let v = build_volume(&b).unwrap();
            assert_relative_eq!(
                v.walls.volume(),
                b.length * b.width * b.heights.eave,
                max_relative = 1e-9
            );
            assert!(v.roof_footprint.strictly_contains(&v.footprint), "{}", b.name);
        }
    }

    #[test]
    fn test_barn_rotation_is_rigid() {
        let barn = volume_of("Barn");
        // Ridge apex vertices sit above the rotated ridge line.
        let apex: Vec<&Point3> = barn
            .roof
            .vertices
            .iter()
            .filter(|p| (p.z - barn.heights.ridge).abs() < 1e-6)
            .collect();
        assert_eq!(apex.len(), 2);
        let dir = (apex[1] - apex[0]).normalize();
        let expected = farmstead_math::frame::heading(100.0);
        assert!((dir.x - expected.x).abs() < 1e-9 && (dir.y - expected.y).abs() < 1e-9);

        // Roof and wall centers coincide in plan.
        let wall_c = barn.walls.vertices.iter().fold(Point3::origin(), |a, p| a + p.coords / 8.0);
        assert!((wall_c.xy() - barn.center).norm() < 1e-6);
    }

    #[test]
    fn test_rotate_and_back() {
        let barn = volume_of("Barn");
        let back = barn.rotated(27.0).rotated(-27.0);
        for (a, b) in barn.walls.vertices.iter().zip(&back.walls.vertices) {
            assert!((a - b).norm() < 1e-6);
        }
        for (a, b) in barn.roof.vertices.iter().zip(&back.roof.vertices) {
            assert!((a - b).norm() < 1e-6);
        }
        assert_relative_eq!(back.angle_deg, barn.angle_deg, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_moves_walls_and_roof_together() {
        let guest = volume_of("Guest");
        let turned = guest.rotated(45.0);
        assert_relative_eq!(turned.walls.volume(), guest.walls.volume(), max_relative = 1e-9);
        assert_relative_eq!(turned.roof.volume(), guest.roof.volume(), max_relative = 1e-9);
        assert!(turned.roof_footprint.strictly_contains(&turned.footprint));
    }

    #[test]
    fn test_flat_breezeway_stays_under_eave() {
        let bw = volume_of("Breezeway");
        assert_eq!(bw.roof_kind, RoofKind::Flat);
        let (rmin, rmax) = bw.roof.bounds();
        assert_relative_eq!(rmax.z, to_internal(8.0), epsilon = 1e-6);
        assert_relative_eq!(rmin.z, to_internal(7.0), epsilon = 1e-6);
        assert!(bw.max_height() <= bw.heights.ridge + 1e-6);
    }

    #[test]
    fn test_mesh_volume() {
        let main = volume_of("Main");
        let mesh = main.to_mesh();
        assert_eq!(mesh.len(), 12 + 8);
        let expected = main.walls.volume() + main.roof.volume();
        assert!((mesh.volume() - expected).abs() / expected < 1e-4);
    }

    #[test]
    fn test_ground_slab() {
        let lot = ParameterSet::farmhouse().lot_bounds();
        let slab = ground_slab(&lot, to_internal(1.0)).unwrap();
        let (min, max) = slab.bounds();
        assert_relative_eq!(max.z, 0.0);
        assert_relative_eq!(min.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max.y, lot.max_y, epsilon = 1e-6);
        assert!(ground_slab(&Aabb2::empty(), 1.0).is_err());
    }
}
