//! # Mesh Errors
//!
//! Error types for mesh generation operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Invalid mesh topology
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// More placements than the batch was sized for
    #[error("Instance capacity exceeded: batch holds {capacity} instances")]
    CapacityExceeded { capacity: usize },

    /// Bounds requested for a mesh without vertices
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Intensity field with a bad shape or out-of-range samples
    #[error("Invalid intensity field: {message}")]
    InvalidIntensity { message: String },

    /// Mesh validation failed
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },

    /// Backing storage could not be reserved
    #[error("Failed to allocate {count} {what}")]
    AllocationFailed { what: &'static str, count: usize },

    /// STL encoding failed
    #[error("Failed to encode {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing mesh output failed
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MeshError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid intensity field error.
    pub fn invalid_intensity(message: impl Into<String>) -> Self {
        Self::InvalidIntensity {
            message: message.into(),
        }
    }

    /// Creates a validation failed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Creates an I/O error tagged with the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
