//! Facet meshes for export.
//!
//! A mesh is a soup of triangles, each carrying the outward normal of the
//! solid face it was cut from. Corners stay in millimetres as `f64` until
//! a writer narrows them.

use serde::{Deserialize, Serialize};

use farmstead_math::{Point3, Vec3};

/// One triangle and the outward normal of its face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    /// Outward unit normal.
    pub normal: Vec3,
    /// Corners, counter-clockwise seen from outside.
    pub corners: [Point3; 3],
}

impl Facet {
    /// Surface area.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.corners;
        (b - a).cross(&(c - a)).norm() / 2.0
    }

    /// Signed volume of the tetrahedron spanned with the origin.
    fn signed_volume(&self) -> f64 {
        let [a, b, c] = self.corners;
        a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
    }
}

/// Flat-shaded triangles of one or more solids.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    facets: Vec<Facet>,
}

impl TriangleMesh {
    /// Empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a convex planar face as a triangle fan from its first corner.
    /// Loops with fewer than three corners add nothing.
    pub fn push_face(&mut self, corners: &[Point3], normal: Vec3) {
        let Some((&first, rest)) = corners.split_first() else {
            return;
        };
        self.facets.extend(rest.windows(2).map(|pair| Facet {
            normal,
            corners: [first, pair[0], pair[1]],
        }));
    }

    /// Move every facet of `other` into this mesh.
    pub fn append(&mut self, other: TriangleMesh) {
        self.facets.extend(other.facets);
    }

    /// All triangles, in insertion order.
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Lowest and highest corner, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut corners = self.facets.iter().flat_map(|f| f.corners);
        let first = corners.next()?;
        Some(corners.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p))))
    }

    /// Total surface area.
    pub fn area(&self) -> f64 {
        self.facets.iter().map(Facet::area).sum()
    }

    /// Enclosed volume. Only meaningful when the facets close up.
    pub fn volume(&self) -> f64 {
        self.facets.iter().map(Facet::signed_volume).sum()
    }
}

impl Extend<TriangleMesh> for TriangleMesh {
    fn extend<I: IntoIterator<Item = TriangleMesh>>(&mut self, iter: I) {
        for mesh in iter {
            self.append(mesh);
        }
    }
}

impl FromIterator<TriangleMesh> for TriangleMesh {
    fn from_iter<I: IntoIterator<Item = TriangleMesh>>(iter: I) -> Self {
        let mut mesh = Self::new();
        mesh.extend(iter);
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solid;
    use approx::assert_relative_eq;

    fn square() -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        mesh.push_face(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
            Vec3::z(),
        );
        mesh
    }

    #[test]
    fn test_face_becomes_fan() {
        let mesh = square();
        assert_eq!(mesh.len(), 2);
        assert_relative_eq!(mesh.area(), 4.0);
        for f in mesh.facets() {
            assert_eq!(f.corners[0], Point3::origin());
            assert_eq!(f.normal, Vec3::z());
        }
    }

    #[test]
    fn test_short_loops_add_nothing() {
        let mut mesh = TriangleMesh::new();
        mesh.push_face(&[], Vec3::z());
        mesh.push_face(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)], Vec3::z());
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
        assert_eq!(mesh.volume(), 0.0);
    }

    #[test]
    fn test_collect_keeps_every_facet() {
        let a = Solid::centered_box(1.0, 1.0, 0.0, 2.0).unwrap().to_mesh();
        let b = Solid::centered_box(1.0, 1.0, 5.0, 6.0).unwrap().to_mesh();
        let joined: TriangleMesh = [a.clone(), b.clone()].into_iter().collect();
        assert_eq!(joined.len(), a.len() + b.len());
        assert_relative_eq!(joined.volume(), 8.0 + 4.0, epsilon = 1e-12);

        let (lo, hi) = joined.bounds().unwrap();
        assert_eq!(lo, Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(hi, Point3::new(1.0, 1.0, 6.0));
    }
}
