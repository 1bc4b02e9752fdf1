//! # Mesh Validation
//!
//! Watertightness checks run before a mesh is handed to a slicer. A mesh is
//! closed when every edge is shared by exactly two triangles that traverse
//! it in opposite directions.

use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::DEGENERATE_AREA_EPSILON;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Report of mesh validation results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Number of distinct undirected edges.
    pub edge_count: usize,
    /// Edges used by only one face.
    pub boundary_edge_count: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edge_count: usize,
    /// Edges whose two faces traverse them in the same direction.
    pub misoriented_edge_count: usize,
    /// Faces with a repeated index or near-zero area.
    pub degenerate_face_count: usize,
    /// Faces indexing past the vertex list.
    pub out_of_range_face_count: usize,
}

impl MeshReport {
    /// True when the mesh encloses a volume with consistent winding.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.face_count > 0
            && self.boundary_edge_count == 0
            && self.non_manifold_edge_count == 0
            && self.misoriented_edge_count == 0
            && self.out_of_range_face_count == 0
    }

    /// Total number of issues found.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.boundary_edge_count
            + self.non_manifold_edge_count
            + self.misoriented_edge_count
            + self.degenerate_face_count
            + self.out_of_range_face_count
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(
            f,
            "  Closed: {}",
            if self.is_closed() { "Yes" } else { "No" }
        )?;

        if self.issue_count() > 0 {
            writeln!(f, "  Issues:")?;
            for (label, count) in [
                ("Boundary edges", self.boundary_edge_count),
                ("Non-manifold edges", self.non_manifold_edge_count),
                ("Misoriented edges", self.misoriented_edge_count),
                ("Degenerate faces", self.degenerate_face_count),
                ("Out-of-range faces", self.out_of_range_face_count),
            ] {
                if count > 0 {
                    writeln!(f, "    {label}: {count}")?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Default)]
struct EdgeUse {
    forward: u32,
    backward: u32,
}

/// Validates a mesh.
pub fn check(mesh: &Mesh) -> MeshReport {
    let vertex_count = mesh.vertex_count();
    let mut report = MeshReport {
        vertex_count,
        face_count: mesh.triangle_count(),
        ..MeshReport::default()
    };

    let mut edges: HashMap<(u32, u32), EdgeUse> = HashMap::with_capacity(mesh.triangle_count() * 3 / 2);

    for (i, tri) in mesh.triangles().iter().enumerate() {
        if tri.iter().any(|&idx| idx as usize >= vertex_count) {
            report.out_of_range_face_count += 1;
            continue;
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
            report.degenerate_face_count += 1;
            continue;
        }
        if mesh.face_normal(i).length() / 2.0 < DEGENERATE_AREA_EPSILON {
            report.degenerate_face_count += 1;
        }

        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            let entry = edges.entry((a.min(b), a.max(b))).or_default();
            if a < b {
                entry.forward += 1;
            } else {
                entry.backward += 1;
            }
        }
    }

    report.edge_count = edges.len();
    for edge in edges.values() {
        match edge.forward + edge.backward {
            1 => report.boundary_edge_count += 1,
            2 if edge.forward != 1 => report.misoriented_edge_count += 1,
            2 => {}
            _ => report.non_manifold_edge_count += 1,
        }
    }

    report
}

impl Mesh {
    /// Validates the mesh and fails unless it is closed.
    pub fn ensure_closed(&self, name: &str) -> Result<MeshReport, MeshError> {
        let report = check(self);
        if report.is_closed() {
            Ok(report)
        } else {
            Err(MeshError::validation_failed(format!(
                "{name} mesh is not closed\n{report}"
            )))
        }
    }
}
