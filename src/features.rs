//! Feature aggregation: one image in, one fixed-shape feature bundle out.
//!
//! The aggregator runs every signal extractor over the grayscale planes and
//! collects scalar summaries into a `FeatureBundle`. The underlying masks
//! and segments are kept beside the bundle in `SignalMaps` so the localizer
//! can attribute geometry to the extractor that produced it without
//! recomputing anything.
use crate::config::AnalysisConfig;
use crate::edges::{detect_edges, EdgeMap};
use crate::image::ImageF32;
use crate::masks::{threshold_above, BinaryMask};
use crate::segments::{extract_segments, Segment};
use crate::stats::{intensity_stats, laplacian_variance};
use serde::Serialize;

/// Scalar signals extracted from one image.
///
/// Invariants (held by construction): every pixel count is at most
/// `total_pixels`, and `total_pixels == width * height > 0`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBundle {
    pub width: usize,
    pub height: usize,
    pub total_pixels: usize,
    /// On pixels of the hysteresis edge map.
    pub edge_pixels: usize,
    /// Pixels above the bright threshold in the unsmoothed grayscale.
    pub bright_pixels: usize,
    /// On pixels of the dilated edge map.
    pub dilated_edge_pixels: usize,
    /// Stone-silhouette pixels; the area figure consumed by the external
    /// weight estimator.
    pub subject_pixels: usize,
    /// Number of extracted line segments.
    pub line_count: usize,
    pub intensity_mean: f32,
    /// Global intensity standard deviation (contrast spread).
    pub intensity_std: f32,
    pub laplacian_variance: f32,
}

impl FeatureBundle {
    #[inline]
    pub fn edge_ratio(&self) -> f32 {
        self.edge_pixels as f32 / self.total_pixels as f32
    }

    #[inline]
    pub fn bright_ratio(&self) -> f32 {
        self.bright_pixels as f32 / self.total_pixels as f32
    }

    #[inline]
    pub fn dilated_ratio(&self) -> f32 {
        self.dilated_edge_pixels as f32 / self.total_pixels as f32
    }
}

/// Spatial byproducts of feature extraction, consumed by the localizer.
#[derive(Clone, Debug)]
pub struct SignalMaps {
    pub edge: EdgeMap,
    pub bright: BinaryMask,
    pub dilated: BinaryMask,
    pub segments: Vec<Segment>,
}

/// Run every extractor over the raw and smoothed luminance planes.
///
/// `raw` feeds the intensity thresholds (bright/subject), `smoothed` feeds
/// the gradient-based extractors; both derive from the same source image.
pub fn extract(raw: &ImageF32, smoothed: &ImageF32, config: &AnalysisConfig) -> (FeatureBundle, SignalMaps) {
    let edge = detect_edges(
        smoothed,
        config.edge.low_threshold,
        config.edge.high_threshold,
    );
    let bright = threshold_above(raw, config.bright_threshold);
    let subject = threshold_above(raw, config.subject_threshold);
    let dilated = edge.mask.dilate(config.dilate_radius);
    let segments = extract_segments(smoothed, Some(&edge.mask.data), &config.line);
    let stats = intensity_stats(smoothed);

    let bundle = FeatureBundle {
        width: raw.w,
        height: raw.h,
        total_pixels: raw.w * raw.h,
        edge_pixels: edge.count,
        bright_pixels: bright.count(),
        dilated_edge_pixels: dilated.count(),
        subject_pixels: subject.count(),
        line_count: segments.len(),
        intensity_mean: stats.mean,
        intensity_std: stats.std_dev,
        laplacian_variance: laplacian_variance(smoothed),
    };
    let maps = SignalMaps {
        edge,
        bright,
        dilated,
        segments,
    };
    (bundle, maps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_black_image_yields_zero_signals() {
        let raw = ImageF32::new(50, 50);
        let (bundle, maps) = extract(&raw, &raw, &AnalysisConfig::default());
        assert_eq!(bundle.edge_pixels, 0);
        assert_eq!(bundle.bright_pixels, 0);
        assert_eq!(bundle.dilated_edge_pixels, 0);
        assert_eq!(bundle.subject_pixels, 0);
        assert_eq!(bundle.line_count, 0);
        assert!(bundle.intensity_std < 1e-6);
        assert!(maps.segments.is_empty());
    }

    #[test]
    fn counts_never_exceed_total() {
        let mut raw = ImageF32::new(20, 20);
        for y in 0..20 {
            for x in 10..20 {
                raw.set(x, y, 1.0);
            }
        }
        let smoothed = crate::preprocess::smooth(&raw, 1);
        let (bundle, _) = extract(&raw, &smoothed, &AnalysisConfig::default());
        assert_eq!(bundle.total_pixels, 400);
        assert!(bundle.edge_pixels <= bundle.total_pixels);
        assert!(bundle.bright_pixels <= bundle.total_pixels);
        assert!(bundle.dilated_edge_pixels <= bundle.total_pixels);
        assert!(bundle.subject_pixels <= bundle.total_pixels);
        assert!(bundle.dilated_edge_pixels >= bundle.edge_pixels);
    }

    #[test]
    fn bright_half_is_counted_from_raw_plane() {
        let mut raw = ImageF32::new(10, 10);
        for y in 0..10 {
            for x in 0..5 {
                raw.set(x, y, 0.95);
            }
        }
        let smoothed = crate::preprocess::smooth(&raw, 1);
        let (bundle, _) = extract(&raw, &smoothed, &AnalysisConfig::default());
        assert_eq!(bundle.bright_pixels, 50, "bright mask samples the raw gray");
    }
}
