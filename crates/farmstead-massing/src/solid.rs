//! Closed polyhedral solids with planar convex faces.

use serde::{Deserialize, Serialize};

use farmstead_math::{Point3, Transform, Vec3};

use crate::{MassingError, Result, TriangleMesh};

/// A closed polyhedron. Faces index into `vertices` and are wound
/// counter-clockwise seen from outside, so normals point outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Corner points.
    pub vertices: Vec<Point3>,
    /// Face loops.
    pub faces: Vec<Vec<usize>>,
}

fn check(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MassingError::InvalidDimension { name, value })
    }
}

impl Solid {
    /// Box centered on the local origin in plan: `x` in `[-hx, hx]`, `y` in
    /// `[-hy, hy]`, `z` from `z0` to `z1`.
    pub fn centered_box(hx: f64, hy: f64, z0: f64, z1: f64) -> Result<Self> {
        check("box half length", hx)?;
        check("box half width", hy)?;
        check("box height", z1 - z0)?;

        let vertices = vec![
            Point3::new(-hx, -hy, z0),
            Point3::new(hx, -hy, z0),
            Point3::new(hx, hy, z0),
            Point3::new(-hx, hy, z0),
            Point3::new(-hx, -hy, z1),
            Point3::new(hx, -hy, z1),
            Point3::new(hx, hy, z1),
            Point3::new(-hx, hy, z1),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // bottom
            vec![4, 5, 6, 7], // top
            vec![0, 1, 5, 4], // -y
            vec![2, 3, 7, 6], // +y
            vec![0, 4, 7, 3], // -x
            vec![1, 2, 6, 5], // +x
        ];
        Ok(Self { vertices, faces })
    }

    /// Triangular prism along local x. The cross-section is an isosceles
    /// triangle with its base from `y = -half_span` to `y = half_span` at
    /// height `base`, and its apex on `y = 0` at height `apex`.
    pub fn gable_prism(half_length: f64, half_span: f64, base: f64, apex: f64) -> Result<Self> {
        check("prism half length", half_length)?;
        check("prism half span", half_span)?;
        check("prism rise", apex - base)?;

        let (hl, hs) = (half_length, half_span);
        let vertices = vec![
            Point3::new(-hl, -hs, base),
            Point3::new(hl, -hs, base),
            Point3::new(hl, hs, base),
            Point3::new(-hl, hs, base),
            Point3::new(-hl, 0.0, apex),
            Point3::new(hl, 0.0, apex),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // soffit
            vec![0, 1, 5, 4], // -y slope
            vec![2, 3, 4, 5], // +y slope
            vec![0, 4, 3],    // start gable
            vec![1, 2, 5],    // end gable
        ];
        Ok(Self { vertices, faces })
    }

    /// New solid with every vertex moved by `t`.
    pub fn transformed(&self, t: &Transform) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| t.apply_point(p)).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Outward unit normal of a face.
    pub fn face_normal(&self, face: usize) -> Vec3 {
        let idx = &self.faces[face];
        let p0 = self.vertices[idx[0]];
        let mut n = Vec3::zeros();
        for k in 1..idx.len() - 1 {
            let a = self.vertices[idx[k]] - p0;
            let b = self.vertices[idx[k + 1]] - p0;
            n += a.cross(&b);
        }
        let len = n.norm();
        if len > 0.0 {
            n / len
        } else {
            n
        }
    }

    /// Enclosed volume (divergence theorem over a fan triangulation).
    pub fn volume(&self) -> f64 {
        let mut total = 0.0;
        for idx in &self.faces {
            let p0 = self.vertices[idx[0]].coords;
            for k in 1..idx.len() - 1 {
                let a = self.vertices[idx[k]].coords;
                let b = self.vertices[idx[k + 1]].coords;
                total += p0.dot(&a.cross(&b));
            }
        }
        total / 6.0
    }

    /// Lowest and highest corner.
    pub fn bounds(&self) -> (Point3, Point3) {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.vertices {
            min = min.inf(p);
            max = max.sup(p);
        }
        (min, max)
    }

    /// Triangulate with flat shading: each face keeps its own normal.
    pub fn to_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        for (f, idx) in self.faces.iter().enumerate() {
            let corners: Vec<Point3> = idx.iter().map(|&i| self.vertices[i]).collect();
            mesh.push_face(&corners, self.face_normal(f));
        }
        mesh
    }
}
