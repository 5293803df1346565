//! Borrowed 3-channel 8-bit view and luminance conversion.
//!
//! Analysis consumes an already-decoded color image; this view borrows the
//! caller's interleaved RGB bytes without copying. The only derivative the
//! pipeline computes is a grayscale `ImageF32` in [0, 1]; the original
//! samples are never mutated.
use crate::image::{ImageF32, ImageViewMut};

/// Borrowed interleaved RGB view (3 bytes per pixel).
#[derive(Clone, Debug)]
pub struct RgbImageU8<'a> {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Pixels between consecutive rows (not bytes)
    pub stride: usize,
    /// Interleaved RGB bytes, `((h - 1) * stride + w) * 3` long at minimum
    pub data: &'a [u8],
}

impl<'a> RgbImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.stride + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Rec.601 luma conversion to a float plane in [0, 1].
    pub fn to_luma_f32(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for y in 0..self.h {
            let row = &self.data[y * self.stride * 3..];
            let dst = out.row_mut(y);
            for (x, px) in dst.iter_mut().enumerate() {
                let r = row[x * 3] as f32;
                let g = row[x * 3 + 1] as f32;
                let b = row[x * 3 + 2] as f32;
                *px = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
            }
        }
        out
    }
}
