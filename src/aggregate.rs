//! Multi-view aggregation: one defect percentage per photographed view,
//! combined into a single figure by arithmetic mean.
//!
//! This is the only cross-image coupling in the crate. The mean is
//! commutative, but the per-view order is preserved in the output for
//! traceability.
use crate::error::{AnalysisError, Result};
use crate::score::DefectScore;
use serde::Serialize;

/// Combined result over all photographed views.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiViewResult {
    /// Per-view defect percentages in input order.
    pub per_view: Vec<f32>,
    /// Arithmetic mean, rounded to 2 decimal places.
    pub mean_percent: f32,
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Average the per-view defect scores.
///
/// Fails with `InvalidInput` when no view was provided.
pub fn aggregate_views(scores: &[DefectScore]) -> Result<MultiViewResult> {
    if scores.is_empty() {
        return Err(AnalysisError::invalid_input(
            "multi-view aggregation requires at least one view score",
        ));
    }
    let per_view: Vec<f32> = scores.iter().map(|s| s.percent).collect();
    let mean = per_view.iter().sum::<f32>() / per_view.len() as f32;
    Ok(MultiViewResult {
        per_view,
        mean_percent: round2(mean),
    })
}
