//! Rule-based inclusion classification.
//!
//! Five independent threshold rules, each mapping one signal of the feature
//! bundle to one inclusion category. Rules are non-exclusive OR logic: any
//! subset may fire, order never matters. Only when no substantive rule
//! fires does the report carry the single fallback label.
use crate::config::RuleThresholds;
use crate::features::FeatureBundle;
use serde::{Deserialize, Serialize};

/// Inclusion categories, named after the gemological types they proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InclusionLabel {
    /// High edge density: cracks and feather-shaped fractures.
    #[serde(rename = "fractures/feathers")]
    FracturesFeathers,
    /// Bright point clusters: pinpoints and included crystals.
    #[serde(rename = "pinpoints/crystals")]
    PinpointsCrystals,
    /// Elongated straight features: needle inclusions.
    #[serde(rename = "needle-type")]
    NeedleType,
    /// Low global contrast: clouds and hazy regions.
    #[serde(rename = "clouds/hazy")]
    CloudsHazy,
    /// Diffuse edge networks: fingerprints and three-phase veils.
    #[serde(rename = "fingerprints/three-phase-veils")]
    FingerprintsVeils,
    /// Fallback when nothing substantive fired.
    #[serde(rename = "clean/minimal")]
    CleanMinimal,
}

impl InclusionLabel {
    /// True for every category except the fallback.
    pub fn is_substantive(self) -> bool {
        self != InclusionLabel::CleanMinimal
    }
}

/// Classifier output: fired labels plus the count-based severity.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionReport {
    /// Fired categories; exactly `[CleanMinimal]` when nothing fired.
    pub labels: Vec<InclusionLabel>,
    /// `10 ×` the number of substantive categories (0 for a clean stone).
    pub severity: u32,
}

impl InclusionReport {
    pub fn is_clean(&self) -> bool {
        self.labels == [InclusionLabel::CleanMinimal]
    }
}

const SEVERITY_WEIGHT: u32 = 10;

/// Evaluate all five rules against ratio-normalized signals.
///
/// Ratios, not raw counts, keep the rules resolution-independent. Every
/// comparison is strict, so a signal exactly at its threshold does not fire.
pub fn classify(bundle: &FeatureBundle, rules: &RuleThresholds) -> InclusionReport {
    let mut labels = Vec::new();

    if bundle.edge_ratio() > rules.t_edge {
        labels.push(InclusionLabel::FracturesFeathers);
    }
    if bundle.bright_ratio() > rules.t_bright {
        labels.push(InclusionLabel::PinpointsCrystals);
    }
    if bundle.line_count > rules.n_lines {
        labels.push(InclusionLabel::NeedleType);
    }
    if bundle.intensity_std < rules.s_contrast && bundle.intensity_mean >= rules.hazy_mean_floor {
        // A hazy stone photographs lit but flat; a dark frame is not haze.
        labels.push(InclusionLabel::CloudsHazy);
    }
    if bundle.dilated_ratio() > rules.t_dilated {
        labels.push(InclusionLabel::FingerprintsVeils);
    }

    if labels.is_empty() {
        labels.push(InclusionLabel::CleanMinimal);
    }

    let severity = labels.iter().filter(|l| l.is_substantive()).count() as u32 * SEVERITY_WEIGHT;
    InclusionReport { labels, severity }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle_with(
        edge: usize,
        bright: usize,
        dilated: usize,
        lines: usize,
        std_dev: f32,
    ) -> FeatureBundle {
        FeatureBundle {
            width: 100,
            height: 100,
            total_pixels: 10_000,
            edge_pixels: edge,
            bright_pixels: bright,
            dilated_edge_pixels: dilated,
            subject_pixels: 5_000,
            line_count: lines,
            intensity_mean: 0.5,
            intensity_std: std_dev,
            laplacian_variance: 0.01,
        }
    }

    #[test]
    fn zero_signals_yield_only_fallback() {
        let bundle = bundle_with(0, 0, 0, 0, 0.2);
        let report = classify(&bundle, &RuleThresholds::default());
        assert_eq!(report.labels, vec![InclusionLabel::CleanMinimal]);
        assert_eq!(report.severity, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn edge_rule_fires_independently() {
        // 2% edges with everything else quiet.
        let bundle = bundle_with(200, 0, 0, 0, 0.2);
        let report = classify(&bundle, &RuleThresholds::default());
        assert_eq!(report.labels, vec![InclusionLabel::FracturesFeathers]);
        assert_eq!(report.severity, 10);
    }

    #[test]
    fn edge_rule_is_monotonic_and_independent() {
        let rules = RuleThresholds::default();
        // Any edge ratio above threshold keeps the label, whatever else fires.
        for &(bright, lines, std_dev) in
            &[(0usize, 0usize, 0.2f32), (100, 10, 0.2), (100, 10, 0.01)]
        {
            let bundle = bundle_with(500, bright, 800, lines, std_dev);
            let report = classify(&bundle, &rules);
            assert!(
                report.labels.contains(&InclusionLabel::FracturesFeathers),
                "fractures must fire regardless of other signals"
            );
        }
    }

    #[test]
    fn low_contrast_fires_clouds() {
        let bundle = bundle_with(0, 0, 0, 0, 0.01);
        let report = classify(&bundle, &RuleThresholds::default());
        assert_eq!(report.labels, vec![InclusionLabel::CloudsHazy]);
    }

    #[test]
    fn dark_flat_frame_is_not_hazy() {
        let mut bundle = bundle_with(0, 0, 0, 0, 0.0);
        bundle.intensity_mean = 0.0;
        let report = classify(&bundle, &RuleThresholds::default());
        assert!(
            report.is_clean(),
            "an all-dark frame must fall through to the fallback"
        );
    }

    #[test]
    fn all_rules_can_fire_together() {
        let bundle = bundle_with(500, 100, 800, 10, 0.01);
        let report = classify(&bundle, &RuleThresholds::default());
        assert_eq!(report.labels.len(), 5);
        assert_eq!(report.severity, 50);
        assert!(!report.labels.contains(&InclusionLabel::CleanMinimal));
    }

    #[test]
    fn fallback_is_exclusive() {
        let bundle = bundle_with(500, 0, 0, 0, 0.2);
        let report = classify(&bundle, &RuleThresholds::default());
        assert!(
            !report.labels.contains(&InclusionLabel::CleanMinimal),
            "fallback must never accompany a substantive label"
        );
    }

    #[test]
    fn values_exactly_at_threshold_do_not_fire() {
        let rules = RuleThresholds::default();
        // t_edge 0.01 of 10_000 = 100 edge pixels; n_lines 5.
        let bundle = bundle_with(100, 40, 500, 5, 0.2);
        let report = classify(&bundle, &rules);
        assert!(report.is_clean(), "strict comparisons, got {:?}", report.labels);
    }

    #[test]
    fn classification_is_deterministic() {
        let bundle = bundle_with(200, 50, 700, 8, 0.02);
        let rules = RuleThresholds::default();
        let a = classify(&bundle, &rules);
        let b = classify(&bundle, &rules);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.severity, b.severity);
    }

    #[test]
    fn labels_serialize_to_wire_strings() {
        let json = serde_json::to_string(&InclusionLabel::FingerprintsVeils).unwrap();
        assert_eq!(json, "\"fingerprints/three-phase-veils\"");
        let back: InclusionLabel =
            serde_json::from_str("\"needle-type\"").unwrap();
        assert_eq!(back, InclusionLabel::NeedleType);
    }
}
