#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod aggregate;
pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod features;
pub mod image;
pub mod localize;
pub mod score;

// "Expert" modules: still public, but considered unstable internals.
pub mod angle;
pub mod edges;
pub mod masks;
pub mod preprocess;
pub mod segments;
pub mod stats;

// --- High-level re-exports -------------------------------------------------

// Main entry points: analyzer + results.
pub use crate::analyzer::{analyze_image, BatchPolicy, ImageAnalysis, InclusionAnalyzer};
pub use crate::config::AnalysisConfig;
pub use crate::error::{AnalysisError, Result};

// Report types produced per image and per batch.
pub use crate::aggregate::{aggregate_views, MultiViewResult};
pub use crate::classify::{InclusionLabel, InclusionReport};
pub use crate::features::FeatureBundle;
pub use crate::localize::{DefectGeometry, LocalizedDefect};
pub use crate::score::{DefectScore, ScoringMode};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use inclusion_detector::prelude::*;
///
/// # fn main() -> inclusion_detector::Result<()> {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![0u8; w * h * 3];
/// let image = RgbImageU8 { w, h, stride: w, data: &rgb };
///
/// let analyzer = InclusionAnalyzer::new(AnalysisConfig::default())?;
/// let analysis = analyzer.analyze(image)?;
/// println!(
///     "labels={:?} defect={:.2}% latency_ms={:.3}",
///     analysis.report.labels, analysis.score.percent, analysis.latency_ms
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::aggregate::aggregate_views;
    pub use crate::analyzer::{BatchPolicy, InclusionAnalyzer};
    pub use crate::config::AnalysisConfig;
    pub use crate::image::RgbImageU8;
    pub use crate::score::ScoringMode;
}
