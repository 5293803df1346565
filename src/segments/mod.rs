//! LSD-style line segment extractor (needle-inclusion proxy).
//!
//! Straight elongated features are extracted from the gradient field by:
//!
//! - Gradient computation (Sobel), producing per-pixel `gx`, `gy`, magnitude.
//! - Region growing from seeds using orientation consistency: pixels whose
//!   gradient orientation is within a tolerance of the seed normal are grown
//!   into a region, while enforcing a minimum gradient magnitude. An
//!   optional seed mask confines growth to edge-map pixels, and a growth
//!   radius lets regions bridge small gaps in fragmented needles.
//! - PCA line fitting: region coordinates are summarized online and a 2×2
//!   covariance matrix is eigendecomposed to obtain the principal direction.
//! - Endpoint projection: region points projected onto the principal axis
//!   yield endpoints `p0` and `p1`.
//! - Significance tests: minimum region support ("votes"), minimum length,
//!   and a minimum fraction of pixels aligned with the seed orientation.
//!
//! Orientation is taken modulo π, appropriate for needle features whose
//! directionality is ambiguous. Zero extracted segments is a normal outcome
//! for clean stones, not an error.

mod extractor;
mod options;
mod segment;

pub use options::LineOptions;
pub use segment::Segment;

use crate::image::ImageF32;

/// Extract line segments from a luminance plane, optionally confined to the
/// on-pixels of `seed_mask` (row-major, one byte per pixel).
pub fn extract_segments(l: &ImageF32, seed_mask: Option<&[u8]>, options: &LineOptions) -> Vec<Segment> {
    extractor::SegmentExtractor::new(l, seed_mask, options).extract()
}

#[cfg(test)]
mod tests;
