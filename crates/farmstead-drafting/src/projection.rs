//! Orthographic elevations of resolved buildings.
//!
//! Each building is reduced to a silhouette in (horizontal, height) space.
//! The horizontal coordinate runs along the viewer's right hand and is
//! shifted so the lot spans `[0, extent]`; heights are above grade. The
//! silhouette generator depends on how the ridge meets the view: looking
//! along the ridge shows the gable with its apex, looking across it shows
//! the roof as a band with a flat top at the ridge.

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_math::{to_internal, Aabb2, Point2, Vec2, Vec3};
use farmstead_params::BuildingGeometry;

use crate::types::{
    ElementKind, ProfileElement, ProfileShape, ViewDirection, ViewProfile, Visibility,
};
use crate::Result;

/// Numerical slack for depth and overlap comparisons, in internal units.
const EPS: f64 = 1e-6;

/// Options for elevation projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationOptions {
    /// Distance the grade line runs past the outermost element.
    pub grade_margin: f64,
    /// Draw windows and doors on facades that face the viewer.
    pub include_openings: bool,
}

impl Default for ElevationOptions {
    fn default() -> Self {
        Self {
            grade_margin: to_internal(10.0),
            include_openings: true,
        }
    }
}

/// Maps lot points into one view's horizontal and depth coordinates.
#[derive(Debug, Clone, Copy)]
pub struct ViewFrame {
    direction: ViewDirection,
    right: Vec2,
    view: Vec2,
    origin: f64,
    extent: f64,
}

impl ViewFrame {
    /// Frame for a view of a lot. The lot's nearest-left corner maps to
    /// horizontal zero.
    pub fn new(direction: ViewDirection, lot: &Aabb2) -> Self {
        let right = direction.right_vec2();
        let (origin, extent) = if lot.is_valid() {
            let (lo, hi) = span(lot.corners().iter().map(|c| right.dot(&c.coords)));
            (lo, hi - lo)
        } else {
            (0.0, 0.0)
        };
        Self {
            direction,
            right,
            view: direction.view_vec2(),
            origin,
            extent,
        }
    }

    /// The direction this frame was built for.
    pub fn direction(&self) -> ViewDirection {
        self.direction
    }

    /// Width of the lot in this view.
    pub fn lot_extent(&self) -> f64 {
        self.extent
    }

    /// Horizontal view coordinate of a lot point.
    pub fn horizontal(&self, p: &Point2) -> f64 {
        self.right.dot(&p.coords) - self.origin
    }

    /// Distance of a lot point along the view vector. Smaller is nearer the
    /// viewer.
    pub fn depth(&self, p: &Point2) -> f64 {
        self.view.dot(&p.coords)
    }

    /// Smallest and largest horizontal coordinate of a point set.
    pub fn horizontal_span(&self, points: &[Point2]) -> (f64, f64) {
        span(points.iter().map(|p| self.horizontal(p)))
    }

    /// Nearest and farthest depth of a point set.
    pub fn depth_span(&self, points: &[Point2]) -> (f64, f64) {
        span(points.iter().map(|p| self.depth(p)))
    }
}

fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Choose the silhouette generator for a building in a view.
///
/// A ridge running more along the view vector than across it is seen end
/// on, so the gable apex shows. Flat roofs always get the slab shape.
pub fn classify(building: &BuildingGeometry, direction: ViewDirection) -> ProfileShape {
    if building.is_flat() {
        return ProfileShape::Flat;
    }
    let ridge = building.ridge_dir();
    let along = ridge.dot(&direction.view_vec2()).abs();
    let across = ridge.dot(&direction.right_vec2()).abs();
    if along >= across {
        ProfileShape::EndOn
    } else {
        ProfileShape::Broadside
    }
}

/// Outline of one building from grade to roof in view coordinates.
///
/// End on, the outline is five points: grade and eave at each side of the
/// roof (overhang included), and the ridge apex above the center. Broadside
/// and flat outlines are eight points: walls up to the eave (or the slab
/// underside), then the roof band out to the rake overhangs with a flat top.
pub fn silhouette(building: &BuildingGeometry, frame: &ViewFrame) -> (ProfileShape, Vec<Point2>) {
    let shape = classify(building, frame.direction());
    let h = building.heights;
    let (l, r) = frame.horizontal_span(&building.wall_rect().corners());
    let (rl, rr) = frame.horizontal_span(&building.roof_rect().corners());

    let points = match shape {
        ProfileShape::EndOn => {
            let c = frame.horizontal(&building.center);
            vec![
                Point2::new(rl, 0.0),
                Point2::new(rl, h.eave),
                Point2::new(c, h.ridge),
                Point2::new(rr, h.eave),
                Point2::new(rr, 0.0),
            ]
        }
        ProfileShape::Broadside => band(l, r, rl, rr, h.eave, h.ridge),
        ProfileShape::Flat => {
            let underside = h.eave - building.flat_roof_thickness;
            band(l, r, rl, rr, underside, h.eave)
        }
    };
    (shape, points)
}

fn band(l: f64, r: f64, rl: f64, rr: f64, bottom: f64, top: f64) -> Vec<Point2> {
    vec![
        Point2::new(l, 0.0),
        Point2::new(l, bottom),
        Point2::new(rl, bottom),
        Point2::new(rl, top),
        Point2::new(rr, top),
        Point2::new(rr, bottom),
        Point2::new(r, bottom),
        Point2::new(r, 0.0),
    ]
}

/// Everything drawn for one building in one view, plus what is needed to
/// sort and classify it.
struct Projected {
    name: String,
    depth: f64,
    span: (f64, f64),
    elements: Vec<ProfileElement>,
}

fn project_building(
    building: &BuildingGeometry,
    frame: &ViewFrame,
    options: &ElevationOptions,
) -> Projected {
    let dir = frame.direction();
    let prefix = format!("{}_{}", dir.abbrev(), building.name);
    let h = building.heights;
    let corners = building.wall_rect().corners();
    let (l, r) = frame.horizontal_span(&corners);
    let (shape, outline) = silhouette(building, frame);
    let outline_span = span(outline.iter().map(|p| p.x));

    let mut elements = vec![
        ProfileElement::polygon(format!("{prefix}_Silhouette"), ElementKind::Silhouette, outline),
        ProfileElement::rect(
            format!("{prefix}_Wall"),
            ElementKind::Wall,
            Point2::new(l, 0.0),
            Point2::new(r, h.eave),
        ),
    ];

    if shape == ProfileShape::EndOn {
        let c = frame.horizontal(&building.center);
        let at_wall = building.roof_height_at_span(building.width / 2.0);
        elements.push(ProfileElement::polygon(
            format!("{prefix}_Gable"),
            ElementKind::Gable,
            vec![
                Point2::new(l, h.eave),
                Point2::new(r, h.eave),
                Point2::new(r, at_wall),
                Point2::new(c, h.ridge),
                Point2::new(l, at_wall),
            ],
        ));
    }

    if options.include_openings {
        let view = dir.view_vec2();
        for opening in &building.openings {
            if building.face_normal(opening.face).dot(&view) >= -EPS {
                continue;
            }
            let (a, b) = building.opening_endpoints(opening);
            let (h1, h2) = frame.horizontal_span(&[a, b]);
            elements.push(ProfileElement::rect(
                format!("{}_{}", dir.abbrev(), opening.name),
                ElementKind::Opening,
                Point2::new(h1, opening.sill),
                Point2::new(h2, opening.head),
            ));
        }
    }

    let elements = elements
        .into_iter()
        .map(|e| e.of_building(&building.name))
        .collect();

    Projected {
        name: building.name.clone(),
        depth: frame.depth_span(&corners).0,
        span: outline_span,
        elements,
    }
}

fn overlaps(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 - EPS && b.0 < a.1 - EPS
}

/// Project buildings onto the four standard elevations.
pub fn project_elevation(
    buildings: &[BuildingGeometry],
    lot: &Aabb2,
    direction: ViewDirection,
) -> ViewProfile {
    project_elevation_with_options(buildings, lot, direction, &ElevationOptions::default())
}

/// Project buildings onto one elevation.
///
/// Every building is drawn. A building is `Background` when a strictly
/// nearer building's silhouette overlaps its own horizontally. Elements are
/// emitted farthest first so a painter's-order renderer gets occlusion
/// right; a grade line spanning the lot and every element closes the view.
pub fn project_elevation_with_options(
    buildings: &[BuildingGeometry],
    lot: &Aabb2,
    direction: ViewDirection,
    options: &ElevationOptions,
) -> ViewProfile {
    let frame = ViewFrame::new(direction, lot);
    let mut projected: Vec<Projected> = buildings
        .iter()
        .map(|b| project_building(b, &frame, options))
        .collect();

    let hidden: Vec<bool> = projected
        .iter()
        .map(|p| {
            projected
                .iter()
                .any(|q| q.depth < p.depth - EPS && overlaps(p.span, q.span))
        })
        .collect();
    for (p, &is_hidden) in projected.iter_mut().zip(&hidden) {
        if is_hidden {
            for e in &mut p.elements {
                e.visibility = Visibility::Background;
            }
        }
    }

    // Stable, so equal depths keep input order.
    projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut view = ViewProfile::new(format!("{direction} Elevation"), direction);
    for p in projected {
        for e in p.elements {
            view.push(e);
        }
    }
    push_grade(&mut view, &frame, options.grade_margin);

    debug!(
        view = %direction,
        buildings = buildings.len(),
        background = hidden.iter().filter(|h| **h).count(),
        elements = view.num_elements(),
        "projected elevation"
    );
    view
}

/// Project onto the elevation whose view vector is `view`. Fails unless the
/// vector is one of the four horizontal axis directions.
pub fn project_elevation_toward(
    buildings: &[BuildingGeometry],
    lot: &Aabb2,
    view: &Vec3,
    options: &ElevationOptions,
) -> Result<ViewProfile> {
    let direction = ViewDirection::from_vector(view)?;
    Ok(project_elevation_with_options(buildings, lot, direction, options))
}

/// Ground line across the lot and every element, plus a margin each side.
pub(crate) fn push_grade(view: &mut ViewProfile, frame: &ViewFrame, margin: f64) {
    let (mut lo, mut hi) = (0.0_f64, frame.lot_extent());
    if view.bounds.is_valid() {
        lo = lo.min(view.bounds.min_x);
        hi = hi.max(view.bounds.max_x);
    }
    view.push(ProfileElement::polyline(
        format!("{}_Grade", frame.direction().abbrev()),
        ElementKind::Grade,
        vec![Point2::new(lo - margin, 0.0), Point2::new(hi + margin, 0.0)],
    ));
}
