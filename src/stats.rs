//! Global intensity statistics: contrast spread and Laplacian variance.
//!
//! Low global contrast is the proxy for hazy/cloud-type inclusions, and the
//! variance of a 3×3 Laplacian response doubles as a focus/detail measure.
//! Both operate on the [0, 1] luminance plane.
use crate::image::{ImageF32, ImageView};

/// Mean and standard deviation of a luminance plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntensityStats {
    pub mean: f32,
    pub std_dev: f32,
}

/// Single-pass mean/variance over all pixels.
pub fn intensity_stats(l: &ImageF32) -> IntensityStats {
    let n = l.w * l.h;
    if n == 0 {
        return IntensityStats::default();
    }
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for row in l.rows() {
        for &v in row {
            sum += v as f64;
            sum_sq += (v as f64) * (v as f64);
        }
    }
    let mean = sum / n as f64;
    let var = (sum_sq / n as f64 - mean * mean).max(0.0);
    IntensityStats {
        mean: mean as f32,
        std_dev: var.sqrt() as f32,
    }
}

/// Variance of the 3×3 Laplacian response (4-neighbor kernel, clamped
/// borders). High values indicate fine detail; near-zero values indicate a
/// flat or strongly defocused image.
pub fn laplacian_variance(l: &ImageF32) -> f32 {
    let w = l.w;
    let h = l.h;
    let n = w * h;
    if n == 0 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for y in 0..h {
        let ym = y.saturating_sub(1);
        let yp = (y + 1).min(h - 1);
        for x in 0..w {
            let xm = x.saturating_sub(1);
            let xp = (x + 1).min(w - 1);
            let r = (l.get(xm, y) + l.get(xp, y) + l.get(x, ym) + l.get(x, yp)
                - 4.0 * l.get(x, y)) as f64;
            sum += r;
            sum_sq += r * r;
        }
    }
    let mean = sum / n as f64;
    (sum_sq / n as f64 - mean * mean).max(0.0) as f32
}
