//! Core types for elevations and sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use farmstead_math::frame::UP;
use farmstead_math::{Aabb2, Point2, Tolerance, Vec2, Vec3};

use crate::DraftingError;

/// Standard elevation directions, named for the side of the compound the
/// viewer stands on. A north elevation is drawn by a viewer north of the
/// buildings looking south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewDirection {
    /// Viewer to the north, looking south (-Y).
    North,
    /// Viewer to the south, looking north (+Y).
    South,
    /// Viewer to the east, looking west (-X).
    East,
    /// Viewer to the west, looking east (+X).
    West,
}

impl ViewDirection {
    /// Sheet order for a set of elevations, left to right.
    pub const LAYOUT_ORDER: [ViewDirection; 4] = [Self::West, Self::South, Self::East, Self::North];

    /// Get the view direction vector (pointing from the viewer toward the
    /// buildings).
    pub fn view_vector(&self) -> Vec3 {
        match self {
            ViewDirection::North => Vec3::new(0.0, -1.0, 0.0),
            ViewDirection::South => Vec3::new(0.0, 1.0, 0.0),
            ViewDirection::East => Vec3::new(-1.0, 0.0, 0.0),
            ViewDirection::West => Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// Get the up vector for this view.
    pub fn up_vector(&self) -> Vec3 {
        UP
    }

    /// The viewer's right hand: `view x up`. Horizontal view coordinates
    /// grow along this vector.
    pub fn right_vector(&self) -> Vec3 {
        self.view_vector().cross(&self.up_vector())
    }

    /// View vector in the ground plane.
    pub fn view_vec2(&self) -> Vec2 {
        self.view_vector().xy()
    }

    /// Right-hand vector in the ground plane.
    pub fn right_vec2(&self) -> Vec2 {
        self.right_vector().xy()
    }

    /// Map a view vector back to a direction. Only the four horizontal axis
    /// directions are accepted; anything diagonal, vertical or zero is
    /// rejected rather than snapped.
    pub fn from_vector(view: &Vec3) -> Result<Self, DraftingError> {
        let unsupported = || {
            DraftingError::UnsupportedDirection(format!(
                "({:.3}, {:.3}, {:.3})",
                view.x, view.y, view.z
            ))
        };
        let len = view.norm();
        if !len.is_finite() || len < Tolerance::DEFAULT.linear {
            return Err(unsupported());
        }
        let n = view / len;
        let tol = Tolerance::DEFAULT.angular;
        if n.z.abs() > tol {
            return Err(unsupported());
        }
        if n.y.abs() <= tol {
            if n.x > 0.0 {
                return Ok(Self::West);
            }
            return Ok(Self::East);
        }
        if n.x.abs() <= tol {
            if n.y > 0.0 {
                return Ok(Self::South);
            }
            return Ok(Self::North);
        }
        Err(unsupported())
    }

    /// Title-case name.
    pub fn name(&self) -> &'static str {
        match self {
            ViewDirection::North => "North",
            ViewDirection::South => "South",
            ViewDirection::East => "East",
            ViewDirection::West => "West",
        }
    }

    /// One-letter prefix used in element labels.
    pub fn abbrev(&self) -> &'static str {
        match self {
            ViewDirection::North => "N",
            ViewDirection::South => "S",
            ViewDirection::East => "E",
            ViewDirection::West => "W",
        }
    }

    /// Compass name of the viewer's right-hand side.
    pub fn right_name(&self) -> &'static str {
        match self {
            ViewDirection::North => "west",
            ViewDirection::South => "east",
            ViewDirection::East => "north",
            ViewDirection::West => "south",
        }
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewDirection {
    type Err = DraftingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Self::North),
            "s" | "south" => Ok(Self::South),
            "e" | "east" => Ok(Self::East),
            "w" | "west" => Ok(Self::West),
            _ => Err(DraftingError::UnsupportedDirection(s.to_string())),
        }
    }
}

/// Depth classification of an element within a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Nothing nearer overlaps it.
    Foreground,
    /// A nearer building covers part of it; drawn lighter.
    Background,
}

/// Which silhouette generator a building gets in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileShape {
    /// Looking along the ridge: gable end with a single apex.
    EndOn,
    /// Looking across the ridge: roof seen as a band with a flat top.
    Broadside,
    /// No rise: slab over the walls.
    Flat,
}

/// What a profile element depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Outer outline of a building, grade to roof.
    Silhouette,
    /// Wall face from grade to eave.
    Wall,
    /// Gable wall above the eave line.
    Gable,
    /// Window or door.
    Opening,
    /// Ground line.
    Grade,
    /// Cross-section of a building cut by a section plane.
    Cut,
    /// Roof surface along a section cut, including overhangs.
    RoofLine,
    /// Interior partition crossed by a section cut.
    Partition,
    /// Upper floor line in a section.
    Floor,
    /// Hatch stroke inside a cut.
    Hatch,
}

/// One polygon or polyline in view space: x is the horizontal view
/// coordinate, y is height above grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileElement {
    /// Label for downstream layering, e.g. `S_Barn_Silhouette`.
    pub label: String,
    /// Source building, if any.
    pub building: Option<String>,
    /// What the element depicts.
    pub kind: ElementKind,
    /// Depth classification.
    pub visibility: Visibility,
    /// Whether the last point connects back to the first.
    pub closed: bool,
    /// Vertices.
    pub points: Vec<Point2>,
}

impl ProfileElement {
    /// A closed polygon.
    pub fn polygon(label: impl Into<String>, kind: ElementKind, points: Vec<Point2>) -> Self {
        Self {
            label: label.into(),
            building: None,
            kind,
            visibility: Visibility::Foreground,
            closed: true,
            points,
        }
    }

    /// An open polyline.
    pub fn polyline(label: impl Into<String>, kind: ElementKind, points: Vec<Point2>) -> Self {
        Self {
            closed: false,
            ..Self::polygon(label, kind, points)
        }
    }

    /// Axis-aligned rectangle in view space, closed.
    pub fn rect(label: impl Into<String>, kind: ElementKind, min: Point2, max: Point2) -> Self {
        Self::polygon(
            label,
            kind,
            vec![
                min,
                Point2::new(max.x, min.y),
                max,
                Point2::new(min.x, max.y),
            ],
        )
    }

    /// Attach the source building.
    pub fn of_building(mut self, name: &str) -> Self {
        self.building = Some(name.to_string());
        self
    }

    /// Set the depth classification.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Highest point.
    pub fn max_height(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Bounds of the vertices.
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&self.points)
    }
}

/// A complete elevation or section in its own (horizontal, height) space,
/// plus the offset that places it on a shared sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewProfile {
    /// Title, e.g. "South Elevation" or "Section A".
    pub name: String,
    /// Side the viewer stands on.
    pub direction: ViewDirection,
    /// Meaning of the horizontal coordinate.
    pub horizontal_axis: String,
    /// Meaning of the vertical coordinate.
    pub vertical_axis: String,
    /// Sheet placement, added to every point when drawn.
    pub offset: Vec2,
    /// Elements, back to front.
    pub elements: Vec<ProfileElement>,
    /// Bounds of all elements in view space (before the offset).
    pub bounds: Aabb2,
}

impl ViewProfile {
    /// Create an empty profile.
    pub fn new(name: impl Into<String>, direction: ViewDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            horizontal_axis: format!("distance toward {}", direction.right_name()),
            vertical_axis: "height above grade".to_string(),
            offset: Vec2::zeros(),
            elements: Vec::new(),
            bounds: Aabb2::empty(),
        }
    }

    /// Add an element, growing the bounds.
    pub fn push(&mut self, element: ProfileElement) {
        for p in &element.points {
            self.bounds.include_point(*p);
        }
        self.elements.push(element);
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get elements in the foreground.
    pub fn foreground(&self) -> impl Iterator<Item = &ProfileElement> {
        self.elements
            .iter()
            .filter(|e| e.visibility == Visibility::Foreground)
    }

    /// Get elements in the background.
    pub fn background(&self) -> impl Iterator<Item = &ProfileElement> {
        self.elements
            .iter()
            .filter(|e| e.visibility == Visibility::Background)
    }

    /// Elements of one kind, in drawing order.
    pub fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &ProfileElement> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    /// Elements belonging to one building.
    pub fn of_building<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a ProfileElement> + use<'a, 'b> {
        self.elements
            .iter()
            .filter(move |e| e.building.as_deref() == Some(name))
    }

    /// The silhouette of a building, if it appears in this view.
    pub fn silhouette(&self, building: &str) -> Option<&ProfileElement> {
        self.of_building(building)
            .find(|e| e.kind == ElementKind::Silhouette)
    }

    /// Bounds on the sheet, after the offset.
    pub fn placed_bounds(&self) -> Aabb2 {
        if !self.bounds.is_valid() {
            return self.bounds;
        }
        let b = self.bounds;
        Aabb2 {
            min_x: b.min_x + self.offset.x,
            min_y: b.min_y + self.offset.y,
            max_x: b.max_x + self.offset.x,
            max_y: b.max_y + self.offset.y,
        }
    }

    /// Points of an element on the sheet.
    pub fn placed_points(&self, element: &ProfileElement) -> Vec<Point2> {
        element.points.iter().map(|p| p + self.offset).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_and_right_vectors() {
        for dir in ViewDirection::LAYOUT_ORDER {
            let v = dir.view_vector();
            let r = dir.right_vector();
            assert!((v.norm() - 1.0).abs() < 1e-12);
            assert!(v.dot(&r).abs() < 1e-12);
            assert!(r.z.abs() < 1e-12);
        }
        // Standing south looking north, east is on the right.
        assert!((ViewDirection::South.right_vector() - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((ViewDirection::West.right_vector() - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-12);
        assert!((ViewDirection::East.right_vector() - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        assert!((ViewDirection::North.right_vector() - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_from_vector_round_trip() {
        for dir in ViewDirection::LAYOUT_ORDER {
            assert_eq!(ViewDirection::from_vector(&dir.view_vector()).unwrap(), dir);
            assert_eq!(
                ViewDirection::from_vector(&(dir.view_vector() * 250.0)).unwrap(),
                dir
            );
        }
    }

    #[test]
    fn test_from_vector_rejects_ambiguous() {
        for v in [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.2),
            Vec3::zeros(),
            Vec3::new(f64::NAN, 0.0, 0.0),
        ] {
            assert!(matches!(
                ViewDirection::from_vector(&v),
                Err(DraftingError::UnsupportedDirection(_))
            ));
        }
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("north".parse::<ViewDirection>().unwrap(), ViewDirection::North);
        assert_eq!(" W ".parse::<ViewDirection>().unwrap(), ViewDirection::West);
        assert_eq!("East".parse::<ViewDirection>().unwrap(), ViewDirection::East);
        assert!(matches!(
            "northeast".parse::<ViewDirection>(),
            Err(DraftingError::UnsupportedDirection(s)) if s == "northeast"
        ));
    }

    #[test]
    fn test_profile_bounds_and_offset() {
        let mut view = ViewProfile::new("South Elevation", ViewDirection::South);
        assert_eq!(view.horizontal_axis, "distance toward east");
        view.push(ProfileElement::rect(
            "wall",
            ElementKind::Wall,
            Point2::new(10.0, 0.0),
            Point2::new(30.0, 12.0),
        ));
        view.push(
            ProfileElement::polyline(
                "grade",
                ElementKind::Grade,
                vec![Point2::new(0.0, 0.0), Point2::new(50.0, 0.0)],
            )
            .with_visibility(Visibility::Background),
        );
        assert_eq!(view.bounds, Aabb2::new(Point2::new(0.0, 0.0), Point2::new(50.0, 12.0)));
        view.offset = Vec2::new(100.0, 5.0);
        let placed = view.placed_bounds();
        assert!((placed.min_x - 100.0).abs() < 1e-12);
        assert!((placed.max_y - 17.0).abs() < 1e-12);
        assert_eq!(view.foreground().count(), 1);
        assert_eq!(view.background().count(), 1);
        let first = &view.elements[0];
        assert_eq!(view.placed_points(first)[0], Point2::new(110.0, 5.0));
    }
}
