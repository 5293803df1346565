use serde::{Deserialize, Serialize};

/// Options controlling the line-segment extractor.
///
/// The fields mirror the knobs of a probabilistic line detector:
/// `min_support_px` plays the role of the vote threshold and `max_gap_px`
/// the maximum gap bridged while growing a region.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    /// Minimum gradient magnitude for seed and region pixels (Sobel units).
    pub magnitude_threshold: f32,
    /// Orientation tolerance around the seed normal in degrees.
    pub angle_tolerance_deg: f32,
    /// Minimum accepted segment length in pixels.
    pub min_length_px: f32,
    /// Maximum gap (pixels) bridged during region growth.
    pub max_gap_px: usize,
    /// Minimum region support in pixels (the vote threshold).
    pub min_support_px: usize,
    /// Minimum fraction of region pixels aligned with the seed orientation.
    pub min_aligned_fraction: f32,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            magnitude_threshold: 0.1,
            angle_tolerance_deg: 22.5,
            min_length_px: 12.0,
            max_gap_px: 1,
            min_support_px: 12,
            min_aligned_fraction: 0.6,
        }
    }
}
