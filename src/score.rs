//! Defect scoring: category-count severity and density-based percentages.
//!
//! The reference rule set used two different defect formulas in different
//! call sites; both are exposed here as named modes instead of silently
//! picking one. All modes are deterministic functions of the feature bundle
//! and the classifier report.
use crate::classify::InclusionReport;
use crate::features::FeatureBundle;
use serde::{Deserialize, Serialize};

/// Selectable defect-percentage formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// `10 ×` the number of substantive fired categories.
    CategoryCount,
    /// `100 × (edge_pixels + bright_pixels) / total_pixels`.
    #[default]
    EdgeDensity,
    /// `100 × (dilated_edge_pixels + bright_pixels) / total_pixels`; the
    /// "enhanced" measure that weights diffuse edge networks.
    DilatedEdgeDensity,
}

/// Aggregate defect percentage for one image, in [0, 100] (or [0, cap]).
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectScore {
    pub percent: f32,
    pub mode: ScoringMode,
}

/// Score one analyzed image.
///
/// Density modes are monotonically non-decreasing in their pixel counts;
/// `cap` clamps degenerate images (e.g. an all-edge texture) to a sane
/// maximum.
pub fn score(
    bundle: &FeatureBundle,
    report: &InclusionReport,
    mode: ScoringMode,
    cap: Option<f32>,
) -> DefectScore {
    let raw = match mode {
        ScoringMode::CategoryCount => report.severity as f32,
        ScoringMode::EdgeDensity => {
            100.0 * (bundle.edge_pixels + bundle.bright_pixels) as f32
                / bundle.total_pixels as f32
        }
        ScoringMode::DilatedEdgeDensity => {
            100.0 * (bundle.dilated_edge_pixels + bundle.bright_pixels) as f32
                / bundle.total_pixels as f32
        }
    };
    let percent = match cap {
        Some(cap) => raw.min(cap),
        None => raw.min(100.0),
    };
    DefectScore { percent, mode }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::RuleThresholds;

    fn bundle(edge: usize, bright: usize, dilated: usize) -> FeatureBundle {
        FeatureBundle {
            width: 100,
            height: 100,
            total_pixels: 10_000,
            edge_pixels: edge,
            bright_pixels: bright,
            dilated_edge_pixels: dilated,
            subject_pixels: 4_000,
            line_count: 0,
            intensity_mean: 0.5,
            intensity_std: 0.2,
            laplacian_variance: 0.01,
        }
    }

    fn scored(b: &FeatureBundle, mode: ScoringMode, cap: Option<f32>) -> f32 {
        let report = classify(b, &RuleThresholds::default());
        score(b, &report, mode, cap).percent
    }

    #[test]
    fn edge_density_formula() {
        let b = bundle(300, 200, 900);
        let p = scored(&b, ScoringMode::EdgeDensity, None);
        assert!((p - 5.0).abs() < 1e-5, "(300+200)/10000*100 = 5, got {p}");
    }

    #[test]
    fn dilated_density_uses_dilated_count() {
        let b = bundle(300, 200, 900);
        let p = scored(&b, ScoringMode::DilatedEdgeDensity, None);
        assert!((p - 11.0).abs() < 1e-5, "(900+200)/10000*100 = 11, got {p}");
    }

    #[test]
    fn category_count_matches_severity() {
        let b = bundle(300, 200, 900);
        let report = classify(&b, &RuleThresholds::default());
        let s = score(&b, &report, ScoringMode::CategoryCount, None);
        assert_eq!(s.percent, report.severity as f32);
    }

    #[test]
    fn zero_signals_score_zero() {
        let b = bundle(0, 0, 0);
        assert_eq!(scored(&b, ScoringMode::EdgeDensity, None), 0.0);
        assert_eq!(scored(&b, ScoringMode::CategoryCount, None), 0.0);
    }

    #[test]
    fn cap_clamps_the_percentage() {
        let b = bundle(9_000, 500, 9_500);
        let p = scored(&b, ScoringMode::EdgeDensity, Some(50.0));
        assert_eq!(p, 50.0);
        let uncapped = scored(&b, ScoringMode::EdgeDensity, None);
        assert!((uncapped - 95.0).abs() < 1e-4);
    }

    #[test]
    fn density_is_monotonic_in_edge_pixels() {
        let mut last = -1.0f32;
        for edge in [0usize, 100, 500, 2_000, 8_000] {
            let p = scored(&bundle(edge, 50, edge), ScoringMode::EdgeDensity, None);
            assert!(
                p >= last,
                "score must not decrease as edges grow: {p} < {last}"
            );
            last = p;
        }
    }
}
