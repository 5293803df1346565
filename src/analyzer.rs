//! Analysis orchestration: preprocess → extract → classify → score →
//! localize, plus the parallel batch runner.
//!
//! Every call is a pure function of one image and one validated
//! configuration; the analyzer holds no cross-call state, so a single
//! instance can serve parallel batches without locks.
use crate::aggregate::{aggregate_views, MultiViewResult};
use crate::classify::{classify, InclusionReport};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::features::{extract, FeatureBundle};
use crate::image::{ImageF32, RgbImageU8};
use crate::localize::{localize, LocalizedDefect};
use crate::preprocess::smooth;
use crate::score::{score, DefectScore};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

/// Complete single-image analysis output.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub features: FeatureBundle,
    pub report: InclusionReport,
    pub score: DefectScore,
    /// Present when the configuration enables localization.
    pub localization: Option<Vec<LocalizedDefect>>,
    pub latency_ms: f64,
}

/// How the batch runner reacts to an invalid image in the middle of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Surface the first failure and discard the rest of the batch.
    FailFast,
    /// Keep per-image results; isolated failures do not abort the batch.
    Tolerant,
}

/// Stateless analysis engine bound to one validated configuration.
#[derive(Clone, Debug)]
pub struct InclusionAnalyzer {
    config: AnalysisConfig,
}

impl InclusionAnalyzer {
    /// Validate the configuration and build an analyzer.
    ///
    /// Validation happens here, once, so a bad constant cannot silently
    /// misclassify every image of a batch.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one decoded color image.
    pub fn analyze(&self, image: RgbImageU8<'_>) -> Result<ImageAnalysis> {
        if image.w == 0 || image.h == 0 {
            return Err(AnalysisError::invalid_input(format!(
                "image must have nonzero area, got {}x{}",
                image.w, image.h
            )));
        }
        if image.stride < image.w {
            return Err(AnalysisError::invalid_input(format!(
                "row stride {} is smaller than image width {}",
                image.stride, image.w
            )));
        }
        // Last row only needs w pixels, not a full stride.
        let required = ((image.h - 1) * image.stride + image.w) * 3;
        if image.data.len() < required {
            return Err(AnalysisError::invalid_input(format!(
                "rgb buffer holds {} bytes, {}x{} with stride {} needs {}",
                image.data.len(),
                image.w,
                image.h,
                image.stride,
                required
            )));
        }
        let gray = image.to_luma_f32();
        self.analyze_luma(&gray)
    }

    /// Analyze an already-converted luminance plane in [0, 1].
    ///
    /// Entry point for callers (and tests) that synthesize grayscale input
    /// directly.
    pub fn analyze_luma(&self, gray: &ImageF32) -> Result<ImageAnalysis> {
        if gray.w == 0 || gray.h == 0 {
            return Err(AnalysisError::invalid_input(format!(
                "image must have nonzero area, got {}x{}",
                gray.w, gray.h
            )));
        }
        let start = Instant::now();

        let smoothed = smooth(gray, self.config.smooth_passes);
        let (features, maps) = extract(gray, &smoothed, &self.config);
        debug!(
            "extracted features: edges={} bright={} dilated={} lines={} std={:.4}",
            features.edge_pixels,
            features.bright_pixels,
            features.dilated_edge_pixels,
            features.line_count,
            features.intensity_std
        );

        let report = classify(&features, &self.config.rules);
        let defect = score(
            &features,
            &report,
            self.config.scoring,
            self.config.percent_cap,
        );
        debug!(
            "classified labels={:?} severity={} defect={:.2}%",
            report.labels, report.severity, defect.percent
        );

        let localization = self
            .config
            .localize
            .then(|| localize(&report, &maps, self.config.min_region_area));

        Ok(ImageAnalysis {
            features,
            report,
            score: defect,
            localization,
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Analyze a batch of views in parallel.
    ///
    /// Extraction per image is independent; rayon fans the batch out and
    /// the per-image order of results matches the input order.
    pub fn analyze_batch(
        &self,
        images: &[RgbImageU8<'_>],
        policy: BatchPolicy,
    ) -> Result<Vec<Result<ImageAnalysis>>> {
        if images.is_empty() {
            return Err(AnalysisError::invalid_input(
                "batch must contain at least one image",
            ));
        }
        let results: Vec<Result<ImageAnalysis>> = images
            .par_iter()
            .map(|image| self.analyze(image.clone()))
            .collect();

        if policy == BatchPolicy::FailFast {
            if let Some(err) = results.iter().find_map(|r| r.as_ref().err()) {
                return Err(err.clone());
            }
        }
        Ok(results)
    }

    /// Analyze a batch and combine the per-view scores into one figure.
    ///
    /// Under `Tolerant`, failed views are skipped in the mean; aggregation
    /// still requires at least one successful view.
    pub fn analyze_views(
        &self,
        images: &[RgbImageU8<'_>],
        policy: BatchPolicy,
    ) -> Result<(Vec<Result<ImageAnalysis>>, MultiViewResult)> {
        let results = self.analyze_batch(images, policy)?;
        let scores: Vec<DefectScore> = results
            .iter()
            .filter_map(|r| r.as_ref().ok().map(|a| a.score))
            .collect();
        let combined = aggregate_views(&scores)?;
        Ok((results, combined))
    }
}

/// One-shot single-image analysis with an unvalidated configuration.
pub fn analyze_image(image: RgbImageU8<'_>, config: &AnalysisConfig) -> Result<ImageAnalysis> {
    InclusionAnalyzer::new(config.clone())?.analyze(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_image_is_rejected() {
        let analyzer = InclusionAnalyzer::new(AnalysisConfig::default()).unwrap();
        let image = RgbImageU8 {
            w: 0,
            h: 0,
            stride: 0,
            data: &[],
        };
        let err = analyzer.analyze(image).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }

    #[test]
    fn bad_config_fails_before_any_image() {
        let mut config = AnalysisConfig::default();
        config.rules.t_bright = 2.0;
        let err = InclusionAnalyzer::new(config).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig { .. }));
    }

    #[test]
    fn short_buffer_is_rejected_not_panicking() {
        let analyzer = InclusionAnalyzer::new(AnalysisConfig::default()).unwrap();
        // One row short of the declared 8x8 geometry.
        let data = vec![0u8; 8 * 7 * 3];
        let image = RgbImageU8 {
            w: 8,
            h: 8,
            stride: 8,
            data: &data,
        };
        let err = analyzer.analyze(image).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }

    #[test]
    fn stride_below_width_is_rejected() {
        let analyzer = InclusionAnalyzer::new(AnalysisConfig::default()).unwrap();
        let data = vec![0u8; 8 * 8 * 3];
        let image = RgbImageU8 {
            w: 8,
            h: 8,
            stride: 4,
            data: &data,
        };
        let err = analyzer.analyze(image).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }

    #[test]
    fn empty_batch_is_invalid() {
        let analyzer = InclusionAnalyzer::new(AnalysisConfig::default()).unwrap();
        let err = analyzer
            .analyze_batch(&[], BatchPolicy::Tolerant)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }

    #[test]
    fn tolerant_batch_keeps_failures_in_place() {
        let analyzer = InclusionAnalyzer::new(AnalysisConfig::default()).unwrap();
        let good = vec![0u8; 16 * 16 * 3];
        let images = vec![
            RgbImageU8 {
                w: 16,
                h: 16,
                stride: 16,
                data: &good,
            },
            RgbImageU8 {
                w: 0,
                h: 0,
                stride: 0,
                data: &[],
            },
        ];
        let results = analyzer
            .analyze_batch(&images, BatchPolicy::Tolerant)
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn fail_fast_batch_surfaces_the_error() {
        let analyzer = InclusionAnalyzer::new(AnalysisConfig::default()).unwrap();
        let images = vec![RgbImageU8 {
            w: 0,
            h: 0,
            stride: 0,
            data: &[],
        }];
        let err = analyzer
            .analyze_batch(&images, BatchPolicy::FailFast)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }

    #[test]
    fn localization_is_gated_by_config() {
        let black = vec![0u8; 32 * 32 * 3];
        let image = RgbImageU8 {
            w: 32,
            h: 32,
            stride: 32,
            data: &black,
        };
        let off = InclusionAnalyzer::new(AnalysisConfig::default()).unwrap();
        assert!(off.analyze(image.clone()).unwrap().localization.is_none());

        let config = AnalysisConfig {
            localize: true,
            ..Default::default()
        };
        let on = InclusionAnalyzer::new(config).unwrap();
        assert!(on.analyze(image).unwrap().localization.is_some());
    }
}
