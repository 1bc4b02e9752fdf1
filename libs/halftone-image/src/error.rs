//! # Image Errors
//!
//! Error types for image preparation.

use halftone_mesh::MeshError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Input file does not exist
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input file could not be decoded
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output image could not be written
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Downscale divisor of zero
    #[error("Scale factor must be at least 1: {0}")]
    InvalidScale(u32),

    /// Image without pixels
    #[error("Image has no pixels")]
    Empty,

    /// Prepared samples rejected by the mesh crate
    #[error(transparent)]
    Field(#[from] MeshError),
}
