//! Grayscale derivation and noise smoothing.
//!
//! Every extractor works on the same smoothed luminance plane:
//! - Rec.601 luma conversion into `ImageF32` in [0, 1] (see `image::rgb`).
//! - A 5-tap separable Gaussian blur (kernel ≈ [1,4,6,4,1]/16) to suppress
//!   sensor noise before gradient-based extraction.
//!
//! Boundary handling uses clamping (replicate border). Values remain in
//! [0, 1] because the filter is linear on [0, 1] input.
use crate::image::ImageF32;

/// Apply `passes` rounds of 5-tap Gaussian smoothing. Zero passes returns
/// the input unchanged.
pub fn smooth(gray: &ImageF32, passes: usize) -> ImageF32 {
    let mut out = gray.clone();
    for _ in 0..passes {
        let mut next = ImageF32::new(out.w, out.h);
        gaussian5x5_sep(&out, &mut next);
        out = next;
    }
    out
}

/// Simple 5-tap separable Gaussian (approx sigma≈1)
fn gaussian5x5_sep(inp: &ImageF32, out: &mut ImageF32) {
    // 1D kernel [1,4,6,4,1]/16 applied separably
    let w = inp.w;
    let h = inp.h;
    if w == 0 || h == 0 {
        return;
    }
    let mut tmp = ImageF32::new(w, h);
    // horizontal
    for y in 0..h {
        for x in 0..w {
            let xm1 = x.saturating_sub(1);
            let xm2 = x.saturating_sub(2);
            let xp1 = (x + 1).min(w - 1);
            let xp2 = (x + 2).min(w - 1);
            let v = (inp.get(xm2, y)
                + 4.0 * inp.get(xm1, y)
                + 6.0 * inp.get(x, y)
                + 4.0 * inp.get(xp1, y)
                + inp.get(xp2, y))
                * (1.0 / 16.0);
            tmp.set(x, y, v);
        }
    }
    // vertical
    for y in 0..h {
        let ym1 = y.saturating_sub(1);
        let ym2 = y.saturating_sub(2);
        let yp1 = (y + 1).min(h - 1);
        let yp2 = (y + 2).min(h - 1);
        for x in 0..w {
            let v = (tmp.get(x, ym2)
                + 4.0 * tmp.get(x, ym1)
                + 6.0 * tmp.get(x, y)
                + 4.0 * tmp.get(x, yp1)
                + tmp.get(x, yp2))
                * (1.0 / 16.0);
            out.set(x, y, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_preserves_constant_image() {
        let mut img = ImageF32::new(8, 8);
        img.data.fill(0.5);
        let blurred = smooth(&img, 2);
        for &v in &blurred.data {
            assert!((v - 0.5).abs() < 1e-5, "constant plane must stay constant");
        }
    }

    #[test]
    fn smoothing_reduces_step_contrast() {
        let mut img = ImageF32::new(16, 4);
        for y in 0..4 {
            for x in 8..16 {
                img.set(x, y, 1.0);
            }
        }
        let blurred = smooth(&img, 1);
        let at_step = blurred.get(8, 2);
        assert!(
            at_step > 0.0 && at_step < 1.0,
            "step edge should be softened, got {at_step}"
        );
    }

    #[test]
    fn zero_passes_is_identity() {
        let mut img = ImageF32::new(4, 4);
        img.set(1, 1, 0.7);
        let out = smooth(&img, 0);
        assert_eq!(out.data, img.data);
    }
}
