//! Floor plan: wall outlines, partitions and openings, plus the upper
//! floor where a building has one.

use serde::Serialize;

use farmstead_footprint::{Footprint, FootprintCategory, RotatedRect};
use farmstead_math::Point2;
use farmstead_params::{BuildingGeometry, UpperFloor};

use crate::Result;

/// Plan-level linework for every building.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FloorPlan {
    /// Outer wall faces.
    pub exterior: Vec<Footprint>,
    /// Inner wall faces, inset by the wall thickness.
    pub interior: Vec<Footprint>,
    /// Partitions across the span.
    pub partitions: Vec<Footprint>,
    /// Window and door extents along their wall.
    pub openings: Vec<Footprint>,
    /// The floor one storey up.
    pub upper: UpperPlan,
}

/// Linework of the floor one storey up.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UpperPlan {
    /// Floor level above grade; zero when no building has an upper floor.
    pub level: f64,
    /// Floored area of each building.
    pub floors: Vec<Footprint>,
    /// Stretches open to the ground floor.
    pub voids: Vec<Footprint>,
    /// Walls and rails.
    pub walls: Vec<Footprint>,
}

impl UpperPlan {
    /// Add one building's upper floor.
    pub fn add_building(&mut self, b: &BuildingGeometry, upper: &UpperFloor) -> Result<()> {
        self.level = self.level.max(upper.level);

        let (start, end) = upper.floored;
        self.floors.push(
            stretch(b, start, end)?
                .with_category(FootprintCategory::Building)
                .with_label(format!("{}_Upper", b.name)),
        );

        let half = b.length / 2.0;
        let open = [(-half, start), (end, half)];
        for (i, (a, c)) in open.into_iter().filter(|(a, c)| c - a > 1e-6).enumerate() {
            self.voids.push(
                stretch(b, a, c)?
                    .with_category(FootprintCategory::Void)
                    .with_label(format!("{}_Void{}", b.name, i + 1)),
            );
        }

        for w in &upper.walls {
            self.walls.push(
                Footprint::segment(b.to_world(&w.from), b.to_world(&w.to))?
                    .with_category(FootprintCategory::Wall)
                    .with_label(w.name.clone()),
            );
        }
        Ok(())
    }
}

/// Full-span rectangle between two local x positions.
fn stretch(b: &BuildingGeometry, from: f64, to: f64) -> Result<Footprint> {
    let mid = b.to_world(&Point2::new((from + to) / 2.0, 0.0));
    Ok(RotatedRect::new(mid, to - from, b.width, b.angle_deg).to_footprint()?)
}

impl FloorPlan {
    /// Add one building's linework.
    pub fn add_building(&mut self, b: &BuildingGeometry) -> Result<()> {
        let t = b.wall_thickness;
        self.exterior.push(b.footprint()?);
        if t > 0.0 {
            let inner = RotatedRect::new(b.center, b.length - 2.0 * t, b.width - 2.0 * t, b.angle_deg);
            self.interior.push(
                inner
                    .to_footprint()?
                    .with_category(FootprintCategory::Wall)
                    .with_label(format!("{}_Inner", b.name)),
            );
        }

        let reach = b.width / 2.0 - t;
        for (i, p) in b.partitions.iter().enumerate() {
            let x = b.along_ridge(*p);
            let line = Footprint::segment(
                b.to_world(&Point2::new(x, -reach)),
                b.to_world(&Point2::new(x, reach)),
            )?;
            self.partitions.push(
                line.with_category(FootprintCategory::Wall)
                    .with_label(format!("{}_Partition{}", b.name, i + 1)),
            );
        }

        for o in &b.openings {
            let (a, c) = b.opening_endpoints(o);
            self.openings.push(
                Footprint::segment(a, c)?
                    .with_category(FootprintCategory::Wall)
                    .with_label(o.name.clone()),
            );
        }

        if let Some(upper) = &b.upper_floor {
            self.upper.add_building(b, upper)?;
        }
        Ok(())
    }
}

/// Floor plan of a set of buildings, each placed through its own transform.
pub fn floor_plan(buildings: &[BuildingGeometry]) -> Result<FloorPlan> {
    let mut plan = FloorPlan::default();
    for b in buildings {
        plan.add_building(b)?;
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FarmsteadError;
    use farmstead_math::{to_internal, to_real};
    use farmstead_params::ParameterSet;

    fn ft(v: f64) -> f64 {
        to_internal(v)
    }

    #[test]
    fn test_main_partitions_cross_span() {
        let params = ParameterSet::farmhouse();
        let plan = floor_plan(&params.resolve_buildings()).unwrap();
        let main: Vec<&Footprint> = plan
            .partitions
            .iter()
            .filter(|p| p.label().starts_with("Main_"))
            .collect();
        assert_eq!(main.len(), 2);
        let xs: Vec<f64> = main.iter().map(|p| to_real(p.vertices()[0].x)).collect();
        assert!((xs[0] - 92.0).abs() < 1e-9);
        assert!((xs[1] - 120.0).abs() < 1e-9);
        for p in &main {
            assert!(!p.is_closed());
            // Between the inner wall faces.
            assert!((p.length() - (ft(30.0) - 2.0 * ft(10.0 / 12.0))).abs() < 1e-6);
        }
    }

    #[test]
    fn test_inner_outline_inside_outer() {
        let params = ParameterSet::farmhouse();
        let plan = floor_plan(&params.resolve_buildings()).unwrap();
        assert_eq!(plan.exterior.len(), plan.interior.len());
        for (outer, inner) in plan.exterior.iter().zip(&plan.interior) {
            assert!(outer.strictly_contains(inner), "{}", outer.label());
        }
    }

    #[test]
    fn test_barn_partition_follows_rotation() {
        let params = ParameterSet::farmhouse();
        let barn = params.resolve_building("Barn").unwrap();
        let mut plan = FloorPlan::default();
        plan.add_building(&barn).unwrap();
        let v = plan.partitions[0].vertices();
        let dir = (v[1] - v[0]).normalize();
        // Partitions run across the span, perpendicular to the ridge.
        assert!(dir.dot(&barn.ridge_dir()).abs() < 1e-9);
    }

    #[test]
    fn test_openings_lie_on_walls() {
        let params = ParameterSet::farmhouse();
        let plan = floor_plan(&params.resolve_buildings()).unwrap();
        let door = plan
            .openings
            .iter()
            .find(|o| o.label() == "Garage_Door")
            .unwrap();
        assert!((door.length() - ft(10.0)).abs() < 1e-6);
        // On the south gable, the start wall of the barn.
        let barn = params.resolve_building("Barn").unwrap();
        for p in door.vertices() {
            let local = barn.to_local(p);
            assert!((local.x + barn.length / 2.0).abs() < 1e-6);
            assert!(local.y.abs() <= barn.width / 2.0);
        }
    }

    #[test]
    fn test_upper_floor_is_an_l() {
        let params = ParameterSet::farmhouse();
        let plan = floor_plan(&params.resolve_buildings()).unwrap();
        let upper = &plan.upper;
        assert!((to_real(upper.level) - 10.5).abs() < 1e-9);
        assert_eq!(upper.floors.len(), 2);

        // East end of the main bar plus the whole wing.
        let area: f64 = upper.floors.iter().map(|f| f.area()).sum();
        assert!((area - ft(40.0) * ft(30.0) - ft(24.0) * ft(28.0)).abs() < 1.0);
        let main = upper.floors.iter().find(|f| f.label() == "Main_Upper").unwrap().bounds();
        assert!((to_real(main.min_x) - 92.0).abs() < 1e-9);
        assert!((to_real(main.max_x) - 132.0).abs() < 1e-9);
        let wing = upper.floors.iter().find(|f| f.label() == "Wing_Upper").unwrap().bounds();
        assert!((to_real(wing.min_y) - 115.0).abs() < 1e-9);
        assert!((to_real(wing.max_y) - 143.0).abs() < 1e-9);
    }

    #[test]
    fn test_great_room_open_to_below() {
        let params = ParameterSet::farmhouse();
        let plan = floor_plan(&params.resolve_buildings()).unwrap();
        assert_eq!(plan.upper.voids.len(), 1);
        let void = &plan.upper.voids[0];
        assert_eq!(void.category(), FootprintCategory::Void);
        let bb = void.bounds();
        assert!((to_real(bb.min_x) - 68.0).abs() < 1e-9);
        assert!((to_real(bb.max_x) - 92.0).abs() < 1e-9);
        assert!((to_real(bb.min_y) - 85.0).abs() < 1e-9);
        assert!((to_real(bb.max_y) - 115.0).abs() < 1e-9);
        for floor in &plan.upper.floors {
            assert!(!floor.strictly_contains_point(&void.centroid()));
        }
    }

    #[test]
    fn test_upper_walls_placed_on_lot() {
        let params = ParameterSet::farmhouse();
        let plan = floor_plan(&params.resolve_buildings()).unwrap();
        let hall = plan
            .upper
            .walls
            .iter()
            .find(|w| w.label() == "UF_Wall_Hallway_Primary")
            .unwrap();
        for p in hall.vertices() {
            assert!((to_real(p.x) - 108.0).abs() < 1e-9);
        }
        assert!((hall.length() - ft(30.0)).abs() < 1e-6);

        let bed = plan
            .upper
            .walls
            .iter()
            .find(|w| w.label() == "UF_Wall_Bed3_Bed2")
            .unwrap();
        for p in bed.vertices() {
            assert!((to_real(p.y) - 125.0).abs() < 1e-9);
        }
        assert_eq!(plan.upper.walls.len(), 10);
    }

    #[test]
    fn test_no_upper_floor_leaves_upper_plan_empty() {
        let mut params = ParameterSet::farmhouse();
        for b in &mut params.buildings {
            b.upper_floor = None;
        }
        let plan = floor_plan(&params.resolve_buildings()).unwrap();
        assert_eq!(plan.upper, UpperPlan::default());
    }

    #[test]
    fn test_walls_too_thick_fail() {
        let mut params = ParameterSet::farmhouse();
        params.structure.wall_thickness = 20.0;
        let err = floor_plan(&params.resolve_buildings()).unwrap_err();
        assert!(matches!(err, FarmsteadError::Footprint(_)));
    }
}
