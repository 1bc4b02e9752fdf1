//! Calibration test card: a row of grey bars stepping from black to near
//! white on a white background, for checking how dot size tracks density.

use std::path::Path;

use config::constants::{TESTCARD_BORDER, TESTCARD_DIVS, TESTCARD_SIZE};
use image::{Rgba, RgbaImage};
use tracing::info;

use crate::error::ImageError;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Test card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCardParams {
    /// Square image side in pixels
    pub size: u32,
    /// Gap between neighbouring bars
    pub border: u32,
    /// Number of bars
    pub divs: u32,
}

impl Default for TestCardParams {
    fn default() -> Self {
        Self {
            size: TESTCARD_SIZE,
            border: TESTCARD_BORDER,
            divs: TESTCARD_DIVS,
        }
    }
}

impl TestCardParams {
    /// Nominal bar width before the gap is removed.
    pub fn bar_width(&self) -> f64 {
        f64::from(self.size) / f64::from(self.divs.max(1))
    }

    /// Left edges of the bars, spread evenly over `size + 2 * border`.
    pub fn bar_positions(&self) -> Vec<f64> {
        let extent = f64::from(self.size + 2 * self.border);
        match self.divs {
            0 => Vec::new(),
            1 => vec![0.0],
            n => (0..n)
                .map(|i| extent * f64::from(i) / f64::from(n - 1))
                .collect(),
        }
    }
}

/// Draws the test card.
pub fn render(params: &TestCardParams) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(params.size, params.size, BACKGROUND);
    let extent = f64::from(params.size + 2 * params.border);
    let width = params.bar_width();
    let last_col = i64::from(params.size) - 1;

    for x in params.bar_positions() {
        let c = (255.0 * x / extent) as u8;
        let first = x.round() as i64;
        let last = ((x + width - f64::from(params.border)).round() as i64).min(last_col);
        for col in first.max(0)..=last {
            for row in 0..params.size {
                img.put_pixel(col as u32, row, Rgba([c, c, c, 255]));
            }
        }
    }
    img
}

/// Draws the test card and saves it; the format follows the extension.
pub fn save(params: &TestCardParams, path: &Path) -> Result<(), ImageError> {
    let file_name = path.file_name().unwrap_or(path.as_os_str());
    info!("saving '{}'...", file_name.to_string_lossy());
    render(params).save(path).map_err(|source| ImageError::Save {
        path: path.to_path_buf(),
        source,
    })
}
