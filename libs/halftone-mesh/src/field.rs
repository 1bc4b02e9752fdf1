//! # Intensity Field
//!
//! Row-major 2D grid of ink densities in `[0, 1]`, origin at the top-left
//! pixel. Produced by the image preparation crate, consumed by
//! [`HalftoneBuilder`](crate::HalftoneBuilder).

use crate::error::MeshError;

/// Row-major grid of samples in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityField {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl IntensityField {
    /// Wraps row-major samples.
    ///
    /// Fails if `data.len() != rows * cols` or any sample is outside
    /// `[0, 1]` (NaN included).
    ///
    /// # Example
    ///
    /// ```rust
    /// use halftone_mesh::IntensityField;
    ///
    /// let field = IntensityField::new(2, 3, vec![0.0, 0.5, 1.0, 1.0, 0.5, 0.0]).unwrap();
    /// assert_eq!(field.get(1, 0), 1.0);
    /// ```
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MeshError> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            MeshError::invalid_intensity(format!("{rows}x{cols} overflows"))
        })?;
        if data.len() != expected {
            return Err(MeshError::invalid_intensity(format!(
                "{rows}x{cols} field needs {expected} samples, got {}",
                data.len()
            )));
        }
        if let Some(i) = data.iter().position(|v| !(0.0..=1.0).contains(v)) {
            return Err(MeshError::invalid_intensity(format!(
                "sample {} at row {}, col {} is outside [0, 1]",
                data[i],
                i / cols,
                i % cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// A field with every sample set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, MeshError> {
        Self::new(rows, cols, vec![value; rows.saturating_mul(cols)])
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the field has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at `(row, col)`. Panics when out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
