//! I/O helpers at the crate boundary.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned interleaved RGB buffer.
//! - `save_mask_png`: write a binary mask to a grayscale PNG for inspection.
//! - `write_json_file`: pretty-print a serializable report to disk.
//! - `annotate_regions`: draw localized-defect bounding boxes on an RGB copy.
//!
//! Everything here is optional tooling; the analysis core never performs I/O.
use super::RgbImageU8;
use crate::error::{AnalysisError, Result};
use crate::localize::{DefectGeometry, LocalizedDefect};
use crate::masks::BinaryMask;
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned interleaved RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbBufferU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbBufferU8 {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `RgbImageU8` view.
    pub fn as_view(&self) -> RgbImageU8<'_> {
        RgbImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to interleaved 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbBufferU8> {
    let img = image::open(path)
        .map_err(|e| AnalysisError::ImageLoad {
            message: format!("{}: {e}", path.display()),
        })?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(RgbBufferU8::new(width, height, img.into_raw()))
}

/// Write a binary mask as an 8-bit grayscale PNG (on = 255).
pub fn save_mask_png(mask: &BinaryMask, path: &Path) -> Result<()> {
    let pixels: Vec<u8> = mask.data.iter().map(|&v| if v != 0 { 255 } else { 0 }).collect();
    let img = GrayImage::from_raw(mask.w as u32, mask.h as u32, pixels)
        .ok_or_else(|| AnalysisError::ImageLoad {
            message: format!("mask buffer does not match {}x{}", mask.w, mask.h),
        })?;
    img.save(path).map_err(|e| AnalysisError::ImageLoad {
        message: format!("{}: {e}", path.display()),
    })
}

/// Pretty-print a serializable value to a JSON file.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AnalysisError::ImageLoad {
        message: format!("JSON encode failed: {e}"),
    })?;
    fs::write(path, json).map_err(|e| AnalysisError::ImageLoad {
        message: format!("{}: {e}", path.display()),
    })
}

const ANNOTATION_COLOR: [u8; 3] = [255, 64, 64];

/// Draw bounding boxes and needle segments onto a copy of the source image.
///
/// Geometry computation is pure; this helper exists for callers that want an
/// annotated image next to the structured report.
pub fn annotate_regions(image: RgbImageU8<'_>, defects: &[LocalizedDefect]) -> RgbBufferU8 {
    let mut out = vec![0u8; image.w * image.h * 3];
    for y in 0..image.h {
        let src = &image.data[y * image.stride * 3..y * image.stride * 3 + image.w * 3];
        out[y * image.w * 3..(y + 1) * image.w * 3].copy_from_slice(src);
    }
    let mut canvas = RgbBufferU8::new(image.w, image.h, out);
    for defect in defects {
        for geometry in &defect.geometries {
            match geometry {
                DefectGeometry::Region { bbox, .. } => {
                    draw_rect(&mut canvas, bbox.x0, bbox.y0, bbox.x1, bbox.y1);
                }
                DefectGeometry::Line { p0, p1 } => {
                    draw_line(&mut canvas, *p0, *p1);
                }
            }
        }
    }
    canvas
}

/// Save an owned RGB buffer as a PNG.
pub fn save_rgb_png(buffer: &RgbBufferU8, path: &Path) -> Result<()> {
    let img = RgbImage::from_raw(
        buffer.width as u32,
        buffer.height as u32,
        buffer.data.clone(),
    )
    .ok_or_else(|| AnalysisError::ImageLoad {
        message: format!(
            "rgb buffer does not match {}x{}",
            buffer.width, buffer.height
        ),
    })?;
    img.save(path).map_err(|e| AnalysisError::ImageLoad {
        message: format!("{}: {e}", path.display()),
    })
}

fn put_pixel(canvas: &mut RgbBufferU8, x: usize, y: usize) {
    if x >= canvas.width || y >= canvas.height {
        return;
    }
    let i = (y * canvas.width + x) * 3;
    canvas.data[i..i + 3].copy_from_slice(&ANNOTATION_COLOR);
}

fn draw_rect(canvas: &mut RgbBufferU8, x0: usize, y0: usize, x1: usize, y1: usize) {
    for x in x0..=x1 {
        put_pixel(canvas, x, y0);
        put_pixel(canvas, x, y1);
    }
    for y in y0..=y1 {
        put_pixel(canvas, x0, y);
        put_pixel(canvas, x1, y);
    }
}

fn draw_line(canvas: &mut RgbBufferU8, p0: [f32; 2], p1: [f32; 2]) {
    let dx = p1[0] - p0[0];
    let dy = p1[1] - p0[1];
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = p0[0] + t * dx;
        let y = p0[1] + t * dy;
        if x >= 0.0 && y >= 0.0 {
            put_pixel(canvas, x.round() as usize, y.round() as usize);
        }
    }
}
