//! # Cuboid Primitive
//!
//! Generates the template for the substrate plate.

use super::{check_height, Template};
use crate::error::MeshError;
use glam::DVec3;

/// Vertices in a cuboid template.
pub const CUBOID_VERTICES: usize = 8;

/// Triangles in a cuboid template.
pub const CUBOID_FACES: usize = 12;

/// Creates a cuboid template spanning `[-1, 1]` in X/Y and `[0, height]` in Z.
///
/// # Returns
///
/// A template with 8 vertices and 12 triangles (2 per face).
///
/// # Example
///
/// ```rust
/// use halftone_mesh::primitives::create_cuboid;
///
/// let plate = create_cuboid(1.0).unwrap();
/// assert_eq!(plate.vertices.len(), 8);
/// assert_eq!(plate.faces.len(), 12);
/// ```
pub fn create_cuboid(height: f64) -> Result<Template, MeshError> {
    check_height(height, "Cuboid")?;

    let min = DVec3::new(-1.0, -1.0, 0.0);
    let max = DVec3::new(1.0, 1.0, height);

    let vertices = vec![
        // Bottom face (z = 0)
        DVec3::new(min.x, min.y, min.z), // 0: left-front-bottom
        DVec3::new(max.x, min.y, min.z), // 1: right-front-bottom
        DVec3::new(max.x, max.y, min.z), // 2: right-back-bottom
        DVec3::new(min.x, max.y, min.z), // 3: left-back-bottom
        // Top face (z = height)
        DVec3::new(min.x, min.y, max.z), // 4: left-front-top
        DVec3::new(max.x, min.y, max.z), // 5: right-front-top
        DVec3::new(max.x, max.y, max.z), // 6: right-back-top
        DVec3::new(min.x, max.y, max.z), // 7: left-back-top
    ];

    // Counter-clockwise seen from outside
    let faces = vec![
        // Bottom
        [0, 2, 1],
        [0, 3, 2],
        // Top
        [4, 5, 6],
        [4, 6, 7],
        // Front (y = -1)
        [0, 1, 5],
        [0, 5, 4],
        // Back (y = 1)
        [2, 3, 7],
        [2, 7, 6],
        // Left (x = -1)
        [3, 0, 4],
        [3, 4, 7],
        // Right (x = 1)
        [1, 2, 6],
        [1, 6, 5],
    ];

    Ok(Template { vertices, faces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn test_cuboid_counts() {
        let plate = create_cuboid(1.0).unwrap();
        assert_eq!(plate.vertices.len(), CUBOID_VERTICES);
        assert_eq!(plate.faces.len(), CUBOID_FACES);
    }

    #[test]
    fn test_cuboid_bounds() {
        let plate = create_cuboid(3.0).unwrap();
        let mesh = Mesh::from_parts(plate.vertices, plate.faces).unwrap();
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.origin, DVec3::new(-1.0, -1.0, 0.0));
        assert_eq!(bounds.extent, DVec3::new(2.0, 2.0, 3.0));
    }

    #[test]
    fn test_cuboid_closed() {
        let plate = create_cuboid(0.5).unwrap();
        let mesh = Mesh::from_parts(plate.vertices, plate.faces).unwrap();
        assert!(crate::validate::check(&mesh).is_closed());
    }

    #[test]
    fn test_cuboid_invalid_height() {
        assert!(create_cuboid(0.0).is_err());
        assert!(create_cuboid(-2.0).is_err());
    }
}
