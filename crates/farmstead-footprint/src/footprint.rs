//! The footprint value type and its builders.

use serde::{Deserialize, Serialize};

use farmstead_math::{Aabb2, Point2, Tolerance, Transform, Vec2};

use crate::{FootprintError, Result, RotatedRect};

/// Semantic tag carried by every footprint. Downstream renderers map this
/// to their own styling; the geometry core attaches no presentation to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FootprintCategory {
    /// Lot boundary and other site references.
    Site,
    /// Setback lines.
    Setback,
    /// Building outline.
    #[default]
    Building,
    /// Courtyard paving.
    Courtyard,
    /// Drives and paths.
    Drive,
    /// Walls: exterior outlines in plans, partitions, free-standing walls.
    Wall,
    /// Canopies and covered structures.
    Canopy,
    /// Porches and decks.
    Porch,
    /// Structural lines (beams, ridge beams).
    Structure,
    /// Floor openings, open to the level below.
    Void,
}

/// An ordered vertex list in the ground plane (internal units).
///
/// Closed footprints enclose an area and are wound counter-clockwise by
/// every builder except [`Footprint::composite_polygon`], which keeps the
/// caller's order. Open footprints are paths and never enclose area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    label: String,
    category: FootprintCategory,
    closed: bool,
    vertices: Vec<Point2>,
}

impl Footprint {
    /// Axis-aligned rectangle from two opposite corners, counter-clockwise
    /// from the south-west corner.
    pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        let bb = Aabb2::new(Point2::new(x1, y1), Point2::new(x2, y2));
        Self::from_box(&bb)
    }

    /// Rectangle covering a bounding box.
    pub fn from_box(bb: &Aabb2) -> Result<Self> {
        let tol = Tolerance::DEFAULT;
        if !(bb.width() > tol.linear && bb.height() > tol.linear) {
            return Err(FootprintError::DegenerateRectangle {
                length: bb.width(),
                width: bb.height(),
            });
        }
        Ok(Self::closed_unchecked(bb.corners().to_vec()))
    }

    /// Rectangle of `length` along its own x axis and `width` along its own
    /// y axis, rotated `angle_deg` degrees CCW about `center`.
    pub fn rotated_rectangle(center: Point2, length: f64, width: f64, angle_deg: f64) -> Result<Self> {
        RotatedRect::new(center, length, width, angle_deg).to_footprint()
    }

    /// Closed outline from an explicit vertex list (L or U shapes).
    ///
    /// The caller owns the ordering; vertices are neither sorted nor
    /// re-wound. A trailing vertex equal to the first is dropped.
    pub fn composite_polygon(vertices: Vec<Point2>) -> Result<Self> {
        check_finite(&vertices)?;
        let mut vertices = vertices;
        let tol = Tolerance::DEFAULT;
        if vertices.len() > 1 && tol.points2_equal(&vertices[0], &vertices[vertices.len() - 1]) {
            vertices.pop();
        }
        let distinct = count_distinct(&vertices);
        if distinct < 3 {
            return Err(FootprintError::TooFewVertices {
                required: 3,
                got: distinct,
            });
        }
        Ok(Self::closed_unchecked(vertices))
    }

    /// Open path through `vertices` (drives, beam lines).
    pub fn open_polyline(vertices: Vec<Point2>) -> Result<Self> {
        check_finite(&vertices)?;
        if vertices.len() < 2 {
            return Err(FootprintError::TooFewVertices {
                required: 2,
                got: vertices.len(),
            });
        }
        Ok(Self {
            label: String::new(),
            category: FootprintCategory::Drive,
            closed: false,
            vertices,
        })
    }

    /// Straight two-point path.
    pub fn segment(a: Point2, b: Point2) -> Result<Self> {
        Self::open_polyline(vec![a, b])
    }

    fn closed_unchecked(vertices: Vec<Point2>) -> Self {
        Self {
            label: String::new(),
            category: FootprintCategory::Building,
            closed: true,
            vertices,
        }
    }

    /// Same geometry with a different category.
    pub fn with_category(self, category: FootprintCategory) -> Self {
        Self { category, ..self }
    }

    /// Same geometry with a label.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }

    /// Label given by the producer (may be empty).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Semantic category.
    pub fn category(&self) -> FootprintCategory {
        self.category
    }

    /// Whether the footprint encloses an area.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Vertices in order.
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether there are no vertices (never true for a built footprint).
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the edges; closed footprints include the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        let count = if self.closed { n } else { n.saturating_sub(1) };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area. Positive for counter-clockwise, zero for open paths.
    pub fn signed_area(&self) -> f64 {
        if !self.closed || self.vertices.len() < 3 {
            return 0.0;
        }
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.vertices[i].x * self.vertices[j].y;
            area -= self.vertices[j].x * self.vertices[i].y;
        }
        area / 2.0
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Is the outline wound counter-clockwise?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Same outline wound counter-clockwise.
    pub fn to_ccw(&self) -> Self {
        let mut out = self.clone();
        if self.closed && !self.is_ccw() {
            out.vertices.reverse();
        }
        out
    }

    /// Perimeter of a closed outline or length of an open path.
    pub fn length(&self) -> f64 {
        self.edges().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Average of the vertices.
    pub fn centroid(&self) -> Point2 {
        if self.vertices.is_empty() {
            return Point2::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vec2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / self.vertices.len() as f64)
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&self.vertices)
    }

    /// Even-odd point-in-polygon test. Always false for open paths.
    pub fn contains_point(&self, p: &Point2) -> bool {
        if !self.closed {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Whether `p` lies inside and farther than the linear tolerance from every edge.
    pub fn strictly_contains_point(&self, p: &Point2) -> bool {
        let tol = Tolerance::DEFAULT;
        self.contains_point(p)
            && self
                .edges()
                .all(|(a, b)| distance_to_segment(p, &a, &b) > tol.linear)
    }

    /// Whether every vertex of `other` lies strictly inside this outline.
    ///
    /// Exact for convex outlines, which is every rectangle this crate builds.
    pub fn strictly_contains(&self, other: &Footprint) -> bool {
        other
            .vertices
            .iter()
            .all(|p| self.strictly_contains_point(p))
    }

    /// New footprint with every vertex moved by `t`. Label and category are kept.
    pub fn transformed(&self, t: &Transform) -> Self {
        Self {
            label: self.label.clone(),
            category: self.category,
            closed: self.closed,
            vertices: self.vertices.iter().map(|p| t.apply_point2(p)).collect(),
        }
    }

    /// New footprint with every vertex mapped through `f`.
    pub fn map_vertices(&self, f: impl Fn(&Point2) -> Point2) -> Self {
        Self {
            label: self.label.clone(),
            category: self.category,
            closed: self.closed,
            vertices: self.vertices.iter().map(f).collect(),
        }
    }
}

fn check_finite(vertices: &[Point2]) -> Result<()> {
    match vertices
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        Some(i) => Err(FootprintError::NonFiniteVertex(i)),
        None => Ok(()),
    }
}

fn count_distinct(vertices: &[Point2]) -> usize {
    let tol = Tolerance::DEFAULT;
    let mut distinct: Vec<&Point2> = Vec::with_capacity(vertices.len());
    for p in vertices {
        if !distinct.iter().any(|q| tol.points2_equal(p, q)) {
            distinct.push(p);
        }
    }
    distinct.len()
}

fn distance_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 < 1e-24 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> Vec<Point2> {
        vec![
            Point2::new(68.0, 85.0),
            Point2::new(132.0, 85.0),
            Point2::new(132.0, 143.0),
            Point2::new(108.0, 143.0),
            Point2::new(108.0, 115.0),
            Point2::new(68.0, 115.0),
        ]
    }

    #[test]
    fn test_rectangle_is_ccw_from_min_corner() {
        let r = Footprint::rectangle(10.0, 5.0, 0.0, 0.0).unwrap();
        assert_eq!(r.len(), 4);
        assert!(r.is_closed());
        assert!(r.is_ccw());
        assert_eq!(r.vertices()[0], Point2::new(0.0, 0.0));
        assert_eq!(r.vertices()[2], Point2::new(10.0, 5.0));
        assert_relative_eq!(r.area(), 50.0);
    }

    #[test]
    fn test_degenerate_rectangle_error() {
        let result = Footprint::rectangle(0.0, 0.0, 0.0, 5.0);
        assert!(matches!(
            result,
            Err(FootprintError::DegenerateRectangle { .. })
        ));
    }

    #[test]
    fn test_composite_keeps_order() {
        let pts = l_shape();
        let house = Footprint::composite_polygon(pts.clone()).unwrap();
        assert_eq!(house.vertices(), pts.as_slice());
        // 64x30 bar + 24x28 wing
        assert_relative_eq!(house.area(), 64.0 * 30.0 + 24.0 * 28.0);
        assert!(house.is_ccw());
    }

    #[test]
    fn test_composite_drops_closing_duplicate() {
        let mut pts = l_shape();
        pts.push(pts[0]);
        let house = Footprint::composite_polygon(pts).unwrap();
        assert_eq!(house.len(), 6);
    }

    #[test]
    fn test_composite_too_few_vertices() {
        let result = Footprint::composite_polygon(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert_eq!(
            result,
            Err(FootprintError::TooFewVertices {
                required: 3,
                got: 2
            })
        );

        // Repeated points do not count as distinct vertices.
        let repeated = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        assert!(Footprint::composite_polygon(repeated).is_err());
    }

    #[test]
    fn test_non_finite_vertex() {
        let result = Footprint::open_polyline(vec![Point2::new(0.0, 0.0), Point2::new(f64::NAN, 1.0)]);
        assert_eq!(result, Err(FootprintError::NonFiniteVertex(1)));
    }

    #[test]
    fn test_open_polyline_encloses_nothing() {
        let drive = Footprint::open_polyline(vec![
            Point2::new(200.0, 80.0),
            Point2::new(185.0, 85.0),
            Point2::new(170.0, 92.0),
        ])
        .unwrap();
        assert!(!drive.is_closed());
        assert_eq!(drive.signed_area(), 0.0);
        assert_eq!(drive.edges().count(), 2);
        assert!(!drive.contains_point(&Point2::new(185.0, 86.0)));
        assert!(Footprint::open_polyline(vec![Point2::new(0.0, 0.0)]).is_err());
    }

    #[test]
    fn test_contains_point_in_l_shape() {
        let house = Footprint::composite_polygon(l_shape()).unwrap();
        assert!(house.contains_point(&Point2::new(70.0, 90.0)));
        assert!(house.contains_point(&Point2::new(120.0, 140.0)));
        // Inside the notch of the L.
        assert!(!house.contains_point(&Point2::new(80.0, 130.0)));
    }

    #[test]
    fn test_strict_containment() {
        let outer = Footprint::rectangle(-1.0, -1.0, 11.0, 6.0).unwrap();
        let inner = Footprint::rectangle(0.0, 0.0, 10.0, 5.0).unwrap();
        assert!(outer.strictly_contains(&inner));
        assert!(!inner.strictly_contains(&outer));
        assert!(!inner.strictly_contains(&inner));
    }

    #[test]
    fn test_to_ccw_reverses_clockwise() {
        let mut pts = l_shape();
        pts.reverse();
        let cw = Footprint::composite_polygon(pts).unwrap();
        assert!(!cw.is_ccw());
        assert!(cw.to_ccw().is_ccw());
    }

    #[test]
    fn test_labels_and_categories() {
        let r = Footprint::rectangle(0.0, 0.0, 1.0, 1.0)
            .unwrap()
            .with_category(FootprintCategory::Courtyard)
            .with_label("Courtyard_Paving");
        assert_eq!(r.category(), FootprintCategory::Courtyard);
        assert_eq!(r.label(), "Courtyard_Paving");
    }

    #[test]
    fn test_transformed_keeps_shape() {
        let r = Footprint::rectangle(0.0, 0.0, 4.0, 2.0).unwrap();
        let t = Transform::rotation_about_vertical(&Point2::new(2.0, 1.0), 90.0);
        let turned = r.transformed(&t);
        assert_relative_eq!(turned.area(), r.area(), epsilon = 1e-9);
        assert!((turned.centroid() - r.centroid()).norm() < 1e-9);
        assert_relative_eq!(turned.bounds().width(), 2.0, epsilon = 1e-9);
    }
}
