//! Binary pixel masks and morphology.
//!
//! Masks are the common currency between extractors and the localizer: the
//! edge detector, the bright-region threshold, and dilation all produce a
//! `BinaryMask`, and the localizer traces connected regions out of one.
use crate::image::{ImageF32, ImageView};

/// Row-major binary mask (0 = off, 1 = on).
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryMask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl BinaryMask {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0u8; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let i = self.idx(x, y);
        self.data[i] = on as u8;
    }

    /// Number of on pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Dilate by a square structuring element of half-width `radius`.
    ///
    /// Separable: a horizontal max-run pass followed by a vertical one,
    /// equivalent to dilation with a (2r+1)×(2r+1) square.
    pub fn dilate(&self, radius: usize) -> BinaryMask {
        if radius == 0 {
            return self.clone();
        }
        let mut tmp = BinaryMask::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(self.w.saturating_sub(1));
                let row = &self.data[y * self.w..(y + 1) * self.w];
                if row[x0..=x1].iter().any(|&v| v != 0) {
                    tmp.set(x, y, true);
                }
            }
        }
        let mut out = BinaryMask::new(self.w, self.h);
        for y in 0..self.h {
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(self.h.saturating_sub(1));
            for x in 0..self.w {
                if (y0..=y1).any(|yy| tmp.get(x, yy)) {
                    out.set(x, y, true);
                }
            }
        }
        out
    }
}

/// Mark pixels whose intensity strictly exceeds `threshold` (in [0, 1]).
///
/// Used for the bright-region proxy (pinpoints/crystals) and the subject
/// silhouette consumed by the external weight estimator.
pub fn threshold_above(gray: &ImageF32, threshold: f32) -> BinaryMask {
    let mut mask = BinaryMask::new(gray.w, gray.h);
    for y in 0..gray.h {
        let row = gray.row(y);
        for (x, &v) in row.iter().enumerate() {
            if v > threshold {
                mask.set(x, y, true);
            }
        }
    }
    mask
}
