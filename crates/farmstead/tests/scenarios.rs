//! End-to-end checks on the sample compound.

use approx::assert_relative_eq;

use farmstead::drafting::{ElementKind, ProfileShape, ViewDirection, Visibility};
use farmstead::math::{to_internal, to_real, Point2};
use farmstead::params::{ridge_height, Cardinal, SectionParams};
use farmstead::{build_compound, BuildOptions, Compound, FarmsteadError, ParameterSet};

fn farmhouse() -> Compound {
    build_compound(&ParameterSet::farmhouse(), &BuildOptions::default()).unwrap()
}

#[test]
fn test_main_ridge_from_eave_span_pitch() {
    assert_relative_eq!(ridge_height(12.0, 30.0, 8.0 / 12.0), 22.0, epsilon = 1e-12);

    let compound = farmhouse();
    let main = compound.volumes.iter().find(|v| v.name == "Main").unwrap();
    assert_relative_eq!(to_real(main.heights.ridge), 22.0, epsilon = 1e-9);
    assert_relative_eq!(to_real(main.max_height()), 22.0, epsilon = 1e-9);
}

#[test]
fn test_barn_corners_equidistant_from_center() {
    let compound = farmhouse();
    let barn = compound.buildings.iter().find(|b| b.name == "Barn").unwrap();
    assert_relative_eq!(barn.angle_deg, 100.0, epsilon = 1e-12);

    let center = barn.center;
    let corners = barn.wall_rect().corners();
    for c in &corners {
        assert_relative_eq!(to_real((c - center).norm()), 18.0_f64.hypot(13.0), epsilon = 1e-9);
    }
    // Opposite corners mirror through the center.
    for i in 0..2 {
        let mid = Point2::from((corners[i].coords + corners[i + 2].coords) / 2.0);
        assert_relative_eq!(mid.x, center.x, epsilon = 1e-6);
        assert_relative_eq!(mid.y, center.y, epsilon = 1e-6);
    }
}

#[test]
fn test_end_on_gable_is_a_pentagon() {
    let compound = farmhouse();
    let west = compound
        .elevations
        .iter()
        .find(|v| v.direction == ViewDirection::West)
        .unwrap();
    let gable = west
        .of_building("Main")
        .find(|e| e.kind == ElementKind::Gable)
        .unwrap();
    assert_eq!(gable.points.len(), 5);
    assert_relative_eq!(gable.max_height(), to_internal(22.0), epsilon = 1e-6);

    let silhouette = west.silhouette("Main").unwrap();
    assert_eq!(silhouette.points.len(), 5);
    assert_eq!(silhouette.visibility, Visibility::Foreground);

    // Broadside from the south: no gable, banded silhouette.
    let south = compound
        .elevations
        .iter()
        .find(|v| v.direction == ViewDirection::South)
        .unwrap();
    assert!(south
        .of_building("Main")
        .all(|e| e.kind != ElementKind::Gable));
    assert_eq!(south.silhouette("Main").unwrap().points.len(), 8);
}

#[test]
fn test_profile_shape_follows_geometry() {
    let params = ParameterSet::farmhouse();
    let barn = params.resolve_building("Barn").unwrap();
    let bw = params.resolve_building("Breezeway").unwrap();
    // Ridge at 100 degrees still reads end-on from the south.
    assert_eq!(
        farmstead::drafting::classify(&barn, ViewDirection::South),
        ProfileShape::EndOn
    );
    assert_eq!(
        farmstead::drafting::classify(&barn, ViewDirection::East),
        ProfileShape::Broadside
    );
    assert_eq!(
        farmstead::drafting::classify(&bw, ViewDirection::North),
        ProfileShape::Flat
    );
}

#[test]
fn test_build_is_deterministic() {
    let a = farmhouse();
    let b = farmhouse();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_trees_clear_of_exclusions() {
    let compound = farmhouse();
    let trees = &compound.site.trees;
    assert!(!trees.trees.is_empty());
    assert_eq!(
        trees.trees.len(),
        trees.perimeter_count + trees.interior_count
    );
    let lot = compound.site.lot.bounds();
    for t in &trees.trees {
        assert!(lot.contains(&t.center));
        for zone in &compound.site.exclusions {
            assert!(!zone.contains(&t.center));
        }
    }
}

#[test]
fn test_full_revolution_is_identity() {
    let compound = farmhouse();
    for v in &compound.volumes {
        let turned = v.rotated(360.0);
        for (a, b) in v.roof.vertices.iter().zip(&turned.roof.vertices) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-6);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-6);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
        }
        for (a, b) in v.walls.vertices.iter().zip(&turned.walls.vertices) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-6);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_sections_sit_below_elevations() {
    let compound = farmhouse();
    let lowest_elevation = compound
        .elevations
        .iter()
        .map(|v| v.placed_bounds().min_y)
        .fold(f64::INFINITY, f64::min);
    for s in &compound.sections {
        assert!(s.placed_bounds().max_y <= lowest_elevation);
        assert!(s.of_kind(ElementKind::Cut).count() > 0);
    }
    assert_eq!(compound.sections[0].name, "Section A");
}

#[test]
fn test_section_through_open_ground_fails() {
    let mut params = ParameterSet::farmhouse();
    params.sections.push(SectionParams {
        name: "Empty".into(),
        looking: Cardinal::North,
        position: 210.0,
    });
    let err = build_compound(&params, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, FarmsteadError::Drafting(_)));
}

#[test]
fn test_pitch_change_propagates() {
    let mut params = ParameterSet::farmhouse();
    params.buildings[0].pitch = 1.0;
    let compound = build_compound(&params, &BuildOptions::default()).unwrap();
    let main = compound.volumes.iter().find(|v| v.name == "Main").unwrap();
    assert_relative_eq!(to_real(main.heights.ridge), 27.0, epsilon = 1e-9);

    let west = &compound.elevations[0];
    assert_eq!(west.direction, ViewDirection::West);
    assert_relative_eq!(
        west.silhouette("Main").unwrap().max_height(),
        to_internal(27.0),
        epsilon = 1e-6
    );
}
