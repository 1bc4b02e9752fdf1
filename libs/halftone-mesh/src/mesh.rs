//! # Mesh Data Structure
//!
//! Resolved triangle mesh ready for bounding, transforming and export.

use crate::bounds::Bounds;
use crate::error::MeshError;
use crate::transform::{self, AxisMask, TransformOp};
use config::constants::{MAX_TRIANGLES, MAX_VERTICES};
use glam::DVec3;

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens when the mesh is encoded as STL.
///
/// # Example
///
/// ```rust
/// use halftone_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from vertex and triangle lists.
    ///
    /// Fails if any triangle indexes past the vertex list or the mesh
    /// exceeds the index or STL limits.
    pub fn from_parts(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        if vertices.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: vertices.len(),
                max: MAX_VERTICES,
            });
        }
        if triangles.len() > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: triangles.len(),
                max: MAX_TRIANGLES,
            });
        }

        let vertex_count = vertices.len();
        if let Some((i, tri)) = triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.iter().any(|&idx| idx as usize >= vertex_count))
        {
            return Err(MeshError::invalid_topology(format!(
                "triangle {i} {tri:?} indexes past {vertex_count} vertices"
            )));
        }

        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Returns the unnormalized normal of a triangle (twice its area vector).
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [a, b, c] = self.triangles[index].map(|i| self.vertices[i as usize]);
        (b - a).cross(c - a)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Fails on an empty mesh rather than inventing a zero box.
    pub fn bounds(&self) -> Result<Bounds, MeshError> {
        Bounds::from_vertices(&self.vertices)
    }

    /// Translates the mesh by a vector.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// mesh.translate(DVec3::new(10.0, 0.0, 0.0));
    /// ```
    pub fn translate(&mut self, offset: DVec3) {
        transform::translate(&mut self.vertices, offset);
    }

    /// Rotates the mesh about the Z axis through the world origin.
    pub fn rotate_z(&mut self, angle_degrees: f64) {
        transform::rotate_z(&mut self.vertices, angle_degrees);
    }

    /// Centers the bounding box on the enabled axes and returns the applied
    /// offset.
    pub fn orient(&mut self, axes: AxisMask) -> Result<DVec3, MeshError> {
        transform::orient(&mut self.vertices, axes)
    }

    /// Applies a list of transform operations in order.
    pub fn apply(&mut self, ops: &[TransformOp]) -> Result<(), MeshError> {
        transform::apply(&mut self.vertices, ops)
    }

    /// Splits the mesh into its vertex and triangle lists.
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<[u32; 3]>) {
        (self.vertices, self.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = Mesh::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mesh_add_triangle() {
        let mesh = triangle();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn test_from_parts_rejects_bad_index() {
        let result = Mesh::from_parts(vec![DVec3::ZERO], vec![[0, 1, 2]]);
        assert!(matches!(result, Err(MeshError::InvalidTopology { .. })));
    }

    #[test]
    fn test_face_normal_ccw_is_up() {
        let mesh = triangle();
        assert_eq!(mesh.face_normal(0), DVec3::Z);
    }

    #[test]
    fn test_mesh_bounds() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.origin, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.extent, DVec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn test_empty_mesh_bounds_fail() {
        assert!(matches!(Mesh::new().bounds(), Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_mesh_translate() {
        let mut mesh = triangle();
        mesh.translate(DVec3::new(10.0, 0.0, 1.0));
        assert_eq!(mesh.vertex(0), DVec3::new(10.0, 0.0, 1.0));
        assert_eq!(mesh.vertex(1), DVec3::new(11.0, 0.0, 1.0));
    }

    #[test]
    fn test_mesh_orient_returns_offset() {
        let mut mesh = triangle();
        mesh.translate(DVec3::new(4.0, 2.0, 3.0));
        let offset = mesh.orient(AxisMask::ALL).unwrap();
        assert_eq!(offset, DVec3::new(-4.5, -2.5, -3.0));
        let center = mesh.bounds().unwrap().center();
        assert_eq!(center, DVec3::ZERO);
    }
}
