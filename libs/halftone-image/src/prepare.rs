//! # Image Preparation
//!
//! Turns an image file into the [`IntensityField`] the halftone builder
//! samples:
//!
//! ```text
//! load → luma (BT.601, 0..1) → downscale → invert (ink density) → rotate
//! ```
//!
//! Every intermediate buffer holds values in `[0, 1]`, the range `image`
//! assumes for `f32` samples. Rotation runs last so the expanded corners are
//! filled with zero ink.

use std::path::Path;

use config::constants::{CHANNEL_MAX, DEFAULT_SCALE, LUMA_WEIGHTS};
use halftone_mesh::{IntensityField, ScreenAngle};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Luma};
use tracing::{debug, info};

use crate::error::ImageError;

/// Single-channel f32 image, samples in `[0, 1]`.
pub type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

type Gray16 = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Image preparation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageParams {
    /// Integer downscale divisor (>= 1)
    pub scale: u32,
    /// Screen rotation applied to the image
    pub screen: ScreenAngle,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            screen: ScreenAngle::default(),
        }
    }
}

/// Loads and prepares an image file.
pub fn prepare(path: &Path, params: &ImageParams) -> Result<IntensityField, ImageError> {
    let img = load(path)?;
    let gray = downscale(&luma(&img), params.scale)?;
    let ink = invert(&gray);
    let rotated = rotate_expand(&ink, params.screen.image_rotation());
    debug!(
        width = rotated.width(),
        height = rotated.height(),
        "prepared intensity field"
    );
    to_field(&rotated)
}

/// Decodes an image file.
///
/// A missing file is reported as [`ImageError::NotFound`] before decoding.
pub fn load(path: &Path) -> Result<DynamicImage, ImageError> {
    if !path.is_file() {
        return Err(ImageError::NotFound(path.to_path_buf()));
    }
    let name = path.file_name().unwrap_or(path.as_os_str());
    info!("loading '{}'...", name.to_string_lossy());

    let img = image::open(path).map_err(|source| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    if img.width() == 0 || img.height() == 0 {
        return Err(ImageError::Empty);
    }
    Ok(img)
}

/// Converts to luma in `[0, 1]`.
///
/// Colour pixels are weighted with [`LUMA_WEIGHTS`] on 0..255 channels and
/// rounded to the nearest 8-bit level, so pure white stays at 1. Grayscale
/// input is taken as is. Alpha is ignored.
pub fn luma(img: &DynamicImage) -> GrayF32 {
    let max = CHANNEL_MAX as f32;
    if !img.color().has_color() {
        let gray = img.to_luma8();
        return GrayF32::from_fn(gray.width(), gray.height(), |x, y| {
            Luma([f32::from(gray.get_pixel(x, y).0[0]) / max])
        });
    }

    let rgb = img.to_rgb8();
    let [wr, wg, wb] = LUMA_WEIGHTS;
    GrayF32::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let level = (wr * f64::from(r) + wg * f64::from(g) + wb * f64::from(b)).round();
        Luma([(level / CHANNEL_MAX) as f32])
    })
}

/// Shrinks both dimensions by `scale` (floor, at least one pixel) with an
/// anti-aliasing triangle filter.
///
/// Resampling runs on 16-bit levels, which the filter rounds, so flat
/// regions keep their exact value.
pub fn downscale(gray: &GrayF32, scale: u32) -> Result<GrayF32, ImageError> {
    if scale == 0 {
        return Err(ImageError::InvalidScale(scale));
    }
    if scale == 1 {
        return Ok(gray.clone());
    }
    let width = (gray.width() / scale).max(1);
    let height = (gray.height() / scale).max(1);

    let levels = f32::from(u16::MAX);
    let wide = Gray16::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([(gray.get_pixel(x, y).0[0].clamp(0.0, 1.0) * levels).round() as u16])
    });
    let small = imageops::resize(&wide, width, height, FilterType::Triangle);
    Ok(GrayF32::from_fn(width, height, |x, y| {
        Luma([f32::from(small.get_pixel(x, y).0[0]) / levels])
    }))
}

/// Maps luma to ink density: `1 - luma`, clamped to `[0, 1]`.
pub fn invert(gray: &GrayF32) -> GrayF32 {
    GrayF32::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([(1.0 - gray.get_pixel(x, y).0[0]).clamp(0.0, 1.0)])
    })
}

/// Rotates counter-clockwise (as displayed) by `degrees` about the image
/// center.
///
/// The canvas grows to hold the whole rotated image; samples are bilinear
/// and everything outside the source is zero.
pub fn rotate_expand(gray: &GrayF32, degrees: f64) -> GrayF32 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (f64::from(gray.width()), f64::from(gray.height()));

    let out_w = expanded(w * cos.abs() + h * sin.abs());
    let out_h = expanded(w * sin.abs() + h * cos.abs());

    let (cx, cy) = ((w - 1.0) / 2.0, (h - 1.0) / 2.0);
    let (ocx, ocy) = ((f64::from(out_w) - 1.0) / 2.0, (f64::from(out_h) - 1.0) / 2.0);

    GrayF32::from_fn(out_w, out_h, |ox, oy| {
        let dx = f64::from(ox) - ocx;
        let dy = f64::from(oy) - ocy;
        // Inverse of the display-CCW rotation in row-down coordinates
        let sx = snap(cos * dx - sin * dy + cx);
        let sy = snap(sin * dx + cos * dy + cy);
        Luma([bilinear(gray, sx, sy)])
    })
}

fn expanded(size: f64) -> u32 {
    (size - 1e-9).ceil().max(1.0) as u32
}

fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < 1e-9 {
        r
    } else {
        v
    }
}

fn bilinear(gray: &GrayF32, x: f64, y: f64) -> f32 {
    let (w, h) = (i64::from(gray.width()), i64::from(gray.height()));
    let sample = |px: i64, py: i64| -> f64 {
        if px < 0 || py < 0 || px >= w || py >= h {
            0.0
        } else {
            f64::from(gray.get_pixel(px as u32, py as u32).0[0])
        }
    };

    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let top = sample(x0, y0) * (1.0 - fx) + sample(x0 + 1, y0) * fx;
    let bottom = sample(x0, y0 + 1) * (1.0 - fx) + sample(x0 + 1, y0 + 1) * fx;
    (top * (1.0 - fy) + bottom * fy) as f32
}

/// Copies a density image into a row-major [`IntensityField`].
pub fn to_field(gray: &GrayF32) -> Result<IntensityField, ImageError> {
    let data = gray
        .pixels()
        .map(|p| f64::from(p.0[0]).clamp(0.0, 1.0))
        .collect();
    Ok(IntensityField::new(
        gray.height() as usize,
        gray.width() as usize,
        data,
    )?)
}
