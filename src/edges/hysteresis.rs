//! Two-threshold gradient-following edge detection.
//!
//! Canny-style pipeline over the smoothed luminance plane:
//!
//! 1. Scharr gradients with border clamping.
//! 2. Non-maximum suppression along the quantized gradient direction; the
//!    outermost 1-pixel frame is ignored to avoid out-of-bounds neighbor
//!    lookups.
//! 3. Double thresholding: pixels at or above `high_threshold` seed the edge
//!    map; pixels between the thresholds survive only when connected to a
//!    seed through an 8-neighborhood walk (explicit stack, no recursion).
//!
//! Thresholds are expressed in normalized gradient units (Scharr response on
//! a [0, 1] luminance plane). The defaults in `EdgeOptions` correspond to
//! the calibrated 50/150-of-255 constants of the reference rule set.
use crate::edges::grad::{image_gradients, Grad, GradientKernel};
use crate::image::{ImageF32, ImageView};
use crate::masks::BinaryMask;

/// Binary edge map plus its on-pixel count.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub mask: BinaryMask,
    pub count: usize,
}

const TAN_22_5_DEG: f32 = 0.41421356237;

fn run_nms(grad: &Grad, mag_thresh: f32) -> BinaryMask {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut keep = BinaryMask::new(w, h);
    if w < 3 || h < 3 {
        return keep;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < mag_thresh {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            // One comparison is non-strict so a two-pixel plateau keeps
            // exactly one response instead of suppressing both.
            if mag < neighbor1 || mag <= neighbor2 {
                continue;
            }

            keep.set(x, y, true);
        }
    }

    keep
}

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Detect edges on a smoothed luminance plane.
///
/// `low_threshold` gates the NMS survivors; `high_threshold` selects the
/// seeds the hysteresis walk grows from. Requires `high >= low` (validated
/// upstream in the analysis configuration).
pub fn detect_edges(l: &ImageF32, low_threshold: f32, high_threshold: f32) -> EdgeMap {
    let grad = image_gradients(l, GradientKernel::Scharr);
    let candidates = run_nms(&grad, low_threshold);

    let w = l.w;
    let h = l.h;
    let mut mask = BinaryMask::new(w, h);
    let mut stack: Vec<usize> = Vec::with_capacity(64);

    for y in 0..h {
        for x in 0..w {
            if !candidates.get(x, y) || mask.get(x, y) {
                continue;
            }
            if grad.mag.get(x, y) < high_threshold {
                continue;
            }
            // Strong seed: claim it and everything weakly connected to it.
            let idx = y * w + x;
            mask.data[idx] = 1;
            stack.push(idx);
            while let Some(i) = stack.pop() {
                let cx = i % w;
                let cy = i / w;
                for (dx, dy) in NEIGH_OFFSETS {
                    let nx = cx as isize + dx;
                    let ny = cy as isize + dy;
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    let ni = ny * w + nx;
                    if mask.data[ni] != 0 || !candidates.get(nx, ny) {
                        continue;
                    }
                    mask.data[ni] = 1;
                    stack.push(ni);
                }
            }
        }
    }

    let count = mask.count();
    EdgeMap { mask, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(width: usize, height: usize, split_x: usize) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for y in 0..height {
            for x in split_x..width {
                img.set(x, y, 1.0);
            }
        }
        img
    }

    #[test]
    fn step_edge_is_detected() {
        let img = step_image(32, 32, 16);
        let edges = detect_edges(&img, 0.2, 0.6);
        assert!(edges.count > 0, "expected edge pixels along the step");
        assert!(
            edges.count >= 30,
            "step should be detected along its full height, got {}",
            edges.count
        );
    }

    #[test]
    fn flat_image_yields_empty_map() {
        let mut img = ImageF32::new(24, 24);
        img.data.fill(0.4);
        let edges = detect_edges(&img, 0.2, 0.6);
        assert_eq!(edges.count, 0, "no detections is a normal outcome");
    }

    #[test]
    fn weak_edges_need_a_strong_seed() {
        // Gentle ramp: gradient everywhere below the high threshold.
        let mut img = ImageF32::new(32, 8);
        for y in 0..8 {
            for x in 0..32 {
                img.set(x, y, x as f32 / 310.0);
            }
        }
        let edges = detect_edges(&img, 0.01, 10.0);
        assert_eq!(
            edges.count, 0,
            "weak responses without a strong seed must not survive"
        );
    }

    #[test]
    fn count_matches_mask() {
        let img = step_image(16, 16, 8);
        let edges = detect_edges(&img, 0.2, 0.6);
        assert_eq!(edges.count, edges.mask.count());
    }
}
