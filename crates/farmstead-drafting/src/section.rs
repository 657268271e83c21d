//! Section views: vertical cuts through the compound.
//!
//! A section plane is vertical and faces one of the four cardinal view
//! directions. Buildings it crosses are drawn as cut outlines with their
//! roof line, partitions and upper floor; buildings wholly beyond it are
//! drawn as background silhouettes; buildings behind the viewer are left
//! out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_math::{rotate_vec2, to_internal, Aabb2, Point2, Vec2};
use farmstead_params::{BuildingGeometry, Cardinal, SectionParams};

use crate::projection::{push_grade, silhouette, ViewFrame};
use crate::types::{ElementKind, ProfileElement, ViewDirection, ViewProfile, Visibility};
use crate::{DraftingError, Result};

const EPS: f64 = 1e-6;

/// A vertical cutting plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPlane {
    /// Title, e.g. "Section A".
    pub name: String,
    /// Side the viewer stands on; the plane is perpendicular to its view
    /// vector.
    pub direction: ViewDirection,
    /// Fixed `y` for north/south views, fixed `x` for east/west views.
    pub position: f64,
}

impl SectionPlane {
    /// Cut at a fixed `y`, viewer to the south.
    pub fn looking_north(name: impl Into<String>, y: f64) -> Self {
        Self::new(name, ViewDirection::South, y)
    }

    /// Cut at a fixed `y`, viewer to the north.
    pub fn looking_south(name: impl Into<String>, y: f64) -> Self {
        Self::new(name, ViewDirection::North, y)
    }

    /// Cut at a fixed `x`, viewer to the west.
    pub fn looking_east(name: impl Into<String>, x: f64) -> Self {
        Self::new(name, ViewDirection::West, x)
    }

    /// Cut at a fixed `x`, viewer to the east.
    pub fn looking_west(name: impl Into<String>, x: f64) -> Self {
        Self::new(name, ViewDirection::East, x)
    }

    /// Cut looking toward a cardinal direction.
    pub fn looking(name: impl Into<String>, toward: Cardinal, position: f64) -> Self {
        match toward {
            Cardinal::North => Self::looking_north(name, position),
            Cardinal::South => Self::looking_south(name, position),
            Cardinal::East => Self::looking_east(name, position),
            Cardinal::West => Self::looking_west(name, position),
        }
    }

    /// Resolve a section from the parameter set (feet) into internal units.
    pub fn from_params(params: &SectionParams) -> Self {
        Self::looking(
            params.name.clone(),
            params.looking,
            to_internal(params.position),
        )
    }

    fn new(name: impl Into<String>, direction: ViewDirection, position: f64) -> Self {
        Self {
            name: name.into(),
            direction,
            position,
        }
    }

    /// A point on the plane at grade.
    pub fn origin_point(&self) -> Point2 {
        match self.direction {
            ViewDirection::North | ViewDirection::South => Point2::new(0.0, self.position),
            ViewDirection::East | ViewDirection::West => Point2::new(self.position, 0.0),
        }
    }

    fn label(&self) -> String {
        self.name.replace(' ', "_")
    }
}

/// Options for section views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionOptions {
    /// Distance the grade line runs past the outermost element.
    pub grade_margin: f64,
    /// Hatch stroke spacing inside cut outlines. `None` draws no hatch.
    pub hatch_spacing: Option<f64>,
    /// Hatch stroke angle, degrees CCW from horizontal.
    pub hatch_angle_deg: f64,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            grade_margin: to_internal(10.0),
            hatch_spacing: Some(to_internal(2.0)),
            hatch_angle_deg: 45.0,
        }
    }
}

// ============================================================================
// Line clipping
// ============================================================================

/// Clip the line `origin + t * dir` to the centered box `|x| <= hx`,
/// `|y| <= hy`. Returns the parameter range inside, if it has length.
fn clip_to_box(origin: Point2, dir: Vec2, hx: f64, hy: f64) -> Option<(f64, f64)> {
    let mut t0 = f64::NEG_INFINITY;
    let mut t1 = f64::INFINITY;
    for (p, d, h) in [(origin.x, dir.x, hx), (origin.y, dir.y, hy)] {
        if d.abs() < 1e-12 {
            if p.abs() > h {
                return None;
            }
            continue;
        }
        let a = (-h - p) / d;
        let b = (h - p) / d;
        t0 = t0.max(a.min(b));
        t1 = t1.min(a.max(b));
    }
    (t1 - t0 > EPS).then_some((t0, t1))
}

/// The section line expressed in one building's local frame:
/// `local(s) = origin + s * dir`, where `s` also equals the horizontal view
/// coordinate minus `h0`.
struct LocalLine {
    origin: Point2,
    dir: Vec2,
    h0: f64,
}

impl LocalLine {
    fn new(plane: &SectionPlane, frame: &ViewFrame, b: &BuildingGeometry) -> Self {
        let base = plane.origin_point();
        Self {
            origin: b.to_local(&base),
            dir: rotate_vec2(plane.direction.right_vec2(), -b.angle_deg),
            h0: frame.horizontal(&base),
        }
    }

    fn local_y(&self, s: f64) -> f64 {
        self.origin.y + s * self.dir.y
    }

    /// Sample points `(h, roof height)` over `[s0, s1]`, with the ridge
    /// crossing when the line passes it.
    fn roof_profile(&self, b: &BuildingGeometry, s0: f64, s1: f64) -> Vec<Point2> {
        let at = |s: f64| Point2::new(self.h0 + s, b.roof_height_at_span(self.local_y(s)));
        let mut pts = vec![at(s0)];
        if self.dir.y.abs() > 1e-12 && !b.is_flat() {
            let sr = -self.origin.y / self.dir.y;
            if sr > s0 + EPS && sr < s1 - EPS {
                pts.push(at(sr));
            }
        }
        pts.push(at(s1));
        pts
    }
}

// ============================================================================
// Hatching
// ============================================================================

/// Parallel hatch strokes inside a closed polygon (even-odd fill), spaced
/// `spacing` apart at `angle_deg` from horizontal.
pub fn hatch_lines(polygon: &[Point2], spacing: f64, angle_deg: f64) -> Vec<(Point2, Point2)> {
    if polygon.len() < 3 || !(spacing.is_finite() && spacing > 0.0) {
        return Vec::new();
    }
    // Work in a frame where strokes are horizontal.
    let local: Vec<Point2> = polygon
        .iter()
        .map(|p| Point2::from(rotate_vec2(p.coords, -angle_deg)))
        .collect();
    let (ymin, ymax) = local
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });

    let back = |x: f64, y: f64| Point2::from(rotate_vec2(Vec2::new(x, y), angle_deg));
    let mut strokes = Vec::new();
    let first = (ymin / spacing).ceil() as i64;
    let last = (ymax / spacing).floor() as i64;
    for k in first..=last {
        let y = k as f64 * spacing;
        let mut xs: Vec<f64> = Vec::new();
        for i in 0..local.len() {
            let a = local[i];
            let b = local[(i + 1) % local.len()];
            if (a.y <= y) != (b.y <= y) {
                xs.push(a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        xs.sort_by(f64::total_cmp);
        for pair in xs.chunks_exact(2) {
            if pair[1] - pair[0] > EPS {
                strokes.push((back(pair[0], y), back(pair[1], y)));
            }
        }
    }
    strokes
}

// ============================================================================
// Section views
// ============================================================================

/// Section through the compound with default options.
pub fn section_view(
    buildings: &[BuildingGeometry],
    lot: &Aabb2,
    plane: &SectionPlane,
) -> Result<ViewProfile> {
    section_view_with_options(buildings, lot, plane, &SectionOptions::default())
}

fn cut_building(
    b: &BuildingGeometry,
    plane: &SectionPlane,
    frame: &ViewFrame,
    options: &SectionOptions,
) -> Vec<ProfileElement> {
    let line = LocalLine::new(plane, frame, b);
    let prefix = format!("{}_{}", plane.label(), b.name);
    let Some((s0, s1)) = clip_to_box(line.origin, line.dir, b.length / 2.0, b.width / 2.0) else {
        return Vec::new();
    };
    let h = b.heights;
    let (h0, h1) = (line.h0 + s0, line.h0 + s1);

    let mut outline = vec![Point2::new(h0, 0.0)];
    outline.extend(line.roof_profile(b, s0, s1));
    outline.push(Point2::new(h1, 0.0));

    let mut elements = Vec::new();
    if let Some(spacing) = options.hatch_spacing {
        for (i, (a, c)) in hatch_lines(&outline, spacing, options.hatch_angle_deg)
            .into_iter()
            .enumerate()
        {
            elements.push(ProfileElement::polyline(
                format!("{prefix}_Hatch{i}"),
                ElementKind::Hatch,
                vec![a, c],
            ));
        }
    }
    elements.push(ProfileElement::polygon(
        format!("{prefix}_Cut"),
        ElementKind::Cut,
        outline,
    ));

    let roof_hl = b.length / 2.0 + b.rake_overhang;
    if let Some((r0, r1)) = clip_to_box(line.origin, line.dir, roof_hl, b.roof_half_span()) {
        elements.push(ProfileElement::polyline(
            format!("{prefix}_Roof"),
            ElementKind::RoofLine,
            line.roof_profile(b, r0, r1),
        ));
    }

    if line.dir.x.abs() > 1e-12 {
        for (i, p) in b.partitions.iter().enumerate() {
            let s = (b.along_ridge(*p) - line.origin.x) / line.dir.x;
            if s > s0 + EPS && s < s1 - EPS {
                let x = line.h0 + s;
                elements.push(ProfileElement::polyline(
                    format!("{prefix}_Partition{}", i + 1),
                    ElementKind::Partition,
                    vec![Point2::new(x, 0.0), Point2::new(x, h.eave)],
                ));
            }
        }
    }

    if h.eave > b.floor_to_floor + EPS {
        elements.push(ProfileElement::polyline(
            format!("{prefix}_Floor"),
            ElementKind::Floor,
            vec![
                Point2::new(h0, b.floor_to_floor),
                Point2::new(h1, b.floor_to_floor),
            ],
        ));
    }

    elements
        .into_iter()
        .map(|e| e.of_building(&b.name))
        .collect()
}

/// Section through the compound.
///
/// Fails with [`DraftingError::EmptySection`] when the plane crosses no
/// building and has none beyond it.
pub fn section_view_with_options(
    buildings: &[BuildingGeometry],
    lot: &Aabb2,
    plane: &SectionPlane,
    options: &SectionOptions,
) -> Result<ViewProfile> {
    let frame = ViewFrame::new(plane.direction, lot);
    let cut_depth = frame.depth(&plane.origin_point());

    let mut beyond: Vec<(f64, &BuildingGeometry)> = Vec::new();
    let mut cut: Vec<&BuildingGeometry> = Vec::new();
    for b in buildings {
        let (near, far) = frame.depth_span(&b.wall_rect().corners());
        if near < cut_depth - EPS && cut_depth < far - EPS {
            cut.push(b);
        } else if near >= cut_depth - EPS {
            beyond.push((near, b));
        }
    }
    if cut.is_empty() && beyond.is_empty() {
        return Err(DraftingError::EmptySection(plane.name.clone()));
    }
    beyond.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut view = ViewProfile::new(plane.name.clone(), plane.direction);
    for (_, b) in &beyond {
        let (_, outline) = silhouette(b, &frame);
        view.push(
            ProfileElement::polygon(
                format!("{}_{}_Silhouette", plane.label(), b.name),
                ElementKind::Silhouette,
                outline,
            )
            .of_building(&b.name)
            .with_visibility(Visibility::Background),
        );
    }
    for b in &cut {
        for e in cut_building(b, plane, &frame, options) {
            view.push(e);
        }
    }
    push_grade(&mut view, &frame, options.grade_margin);

    debug!(
        section = %plane.name,
        view = %plane.direction,
        cut = cut.len(),
        beyond = beyond.len(),
        "projected section"
    );
    Ok(view)
}
