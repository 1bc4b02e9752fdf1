//! Binary STL export.
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! Files are staged in a temporary file beside the target and renamed into
//! place, so a failed write never leaves a partial STL behind.

use std::io::Write;
use std::path::Path;

use config::constants::{approx_zero, MAX_TRIANGLES, STL_HEADER_SIZE, STL_TRIANGLE_SIZE};
use glam::DVec3;
use stl_io::{Normal, Triangle, Vertex};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::MeshError;
use crate::mesh::Mesh;

/// Encodes a mesh as binary STL.
///
/// `name` is written into the header, truncated to 80 bytes.
///
/// # Errors
///
/// Returns an error if the mesh has no triangles or more than an STL file
/// can count.
///
/// # Example
///
/// ```rust
/// use halftone_mesh::{stl, SubstrateBuilder};
///
/// let plate = SubstrateBuilder::new(1.0).build(2.0, 2.0).unwrap();
/// let bytes = stl::encode_binary(&plate, "plate").unwrap();
/// assert_eq!(bytes.len(), 84 + 12 * 50);
/// ```
pub fn encode_binary(mesh: &Mesh, name: &str) -> Result<Vec<u8>, MeshError> {
    let tri_count = mesh.triangle_count();
    if tri_count == 0 {
        return Err(MeshError::degenerate(format!("{name}: mesh has no triangles")));
    }
    if tri_count > MAX_TRIANGLES {
        return Err(MeshError::TooManyTriangles {
            count: tri_count,
            max: MAX_TRIANGLES,
        });
    }

    let triangles = mesh.triangles().iter().enumerate().map(|(i, tri)| {
        let normal = mesh.face_normal(i);
        let length = normal.length();
        let normal = if approx_zero(length) {
            DVec3::Z
        } else {
            normal / length
        };
        Triangle {
            normal: Normal::new(to_f32(normal)),
            vertices: tri.map(|idx| Vertex::new(to_f32(mesh.vertex(idx)))),
        }
    });

    let mut buf = Vec::with_capacity(STL_HEADER_SIZE + 4 + tri_count * STL_TRIANGLE_SIZE);
    stl_io::write_stl(&mut buf, triangles).map_err(|source| MeshError::Encode {
        name: name.to_string(),
        source,
    })?;

    // stl_io leaves the header zeroed
    let header = format!("binary STL: {name}");
    let header_bytes = header.as_bytes();
    let len = header_bytes.len().min(STL_HEADER_SIZE);
    buf[..len].copy_from_slice(&header_bytes[..len]);

    Ok(buf)
}

fn to_f32(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// Encodes `mesh` and writes it to `path`.
pub fn write_binary(mesh: &Mesh, name: &str, path: &Path) -> Result<(), MeshError> {
    let bytes = encode_binary(mesh, name)?;
    save(&bytes, path)
}

/// Writes already encoded STL bytes to `path`.
pub fn save(bytes: &[u8], path: &Path) -> Result<(), MeshError> {
    let staged = stage(bytes, path)?;
    commit(staged, path)
}

/// Writes `bytes` to a temporary file in the directory of `path`.
///
/// The file is removed when the handle is dropped without [`commit`].
pub fn stage(bytes: &[u8], path: &Path) -> Result<NamedTempFile, MeshError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| MeshError::io(path, e))?;
    file.write_all(bytes).map_err(|e| MeshError::io(path, e))?;
    file.flush().map_err(|e| MeshError::io(path, e))?;
    Ok(file)
}

/// Renames a staged file onto `path`.
pub fn commit(staged: NamedTempFile, path: &Path) -> Result<(), MeshError> {
    let file_name = path.file_name().unwrap_or(path.as_os_str());
    info!("saving '{}'...", file_name.to_string_lossy());
    staged
        .persist(path)
        .map(|_| ())
        .map_err(|e| MeshError::io(path, e.error))
}
