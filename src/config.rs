//! Analysis configuration: every calibration constant as a named,
//! overridable field.
//!
//! Nothing in the pipeline hard-codes a threshold; tests override any knob
//! through this struct. `validate` runs before any image is processed so a
//! bad constant cannot silently misclassify a whole batch.
use crate::error::{AnalysisError, Result};
use crate::score::ScoringMode;
use crate::segments::LineOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Two-threshold edge detector constants, in normalized gradient units.
///
/// Defaults correspond to the calibrated 50/150-of-255 pair of the
/// reference rule set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            low_threshold: 0.2,
            high_threshold: 0.6,
        }
    }
}

/// Classifier rule thresholds. All pixel-count rules are expressed as
/// ratios of total pixel count so behavior is resolution-independent.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// Edge-pixel ratio above which "fractures/feathers" fires.
    pub t_edge: f32,
    /// Bright-pixel ratio above which "pinpoints/crystals" fires.
    pub t_bright: f32,
    /// Line-segment count above which "needle-type" fires.
    pub n_lines: usize,
    /// Intensity standard deviation below which "clouds/hazy" fires.
    pub s_contrast: f32,
    /// Minimum mean intensity for the haze rule; keeps underexposed or
    /// all-dark frames from reading as cloudy.
    pub hazy_mean_floor: f32,
    /// Dilated-edge ratio above which "fingerprints/three-phase-veils" fires.
    pub t_dilated: f32,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            // Ratio forms of the reference raw counts (3000 and 500 edge/
            // bright pixels at 640x480).
            t_edge: 0.01,
            t_bright: 0.004,
            n_lines: 5,
            s_contrast: 0.05,
            hazy_mean_floor: 0.1,
            t_dilated: 0.05,
        }
    }
}

/// Top-level analysis configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Gaussian smoothing passes applied to the luminance plane (0 disables).
    pub smooth_passes: usize,
    pub edge: EdgeOptions,
    /// Intensity above which a pixel counts as bright, in [0, 1]
    /// (default 220/255). Sampled from the unsmoothed grayscale.
    pub bright_threshold: f32,
    /// Intensity above which a pixel belongs to the stone silhouette
    /// (default 120/255); the resulting area feeds the external weight
    /// estimator.
    pub subject_threshold: f32,
    pub line: LineOptions,
    /// Half-width of the square dilation element for the veil proxy.
    pub dilate_radius: usize,
    pub rules: RuleThresholds,
    pub scoring: ScoringMode,
    /// Optional clamp on the density-based defect percentage.
    pub percent_cap: Option<f32>,
    /// Connected regions below this pixel area are discarded as noise
    /// during localization.
    pub min_region_area: usize,
    /// Compute per-category geometry alongside the report.
    pub localize: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smooth_passes: 1,
            edge: EdgeOptions::default(),
            bright_threshold: 220.0 / 255.0,
            subject_threshold: 120.0 / 255.0,
            line: LineOptions::default(),
            dilate_radius: 2,
            rules: RuleThresholds::default(),
            scoring: ScoringMode::default(),
            percent_cap: None,
            min_region_area: 16,
            localize: false,
        }
    }
}

fn check_unit_interval(parameter: &'static str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) || !value.is_finite() {
        return Err(AnalysisError::invalid_config(
            parameter,
            value,
            "must be a ratio in [0, 1]",
        ));
    }
    Ok(())
}

impl AnalysisConfig {
    /// Check every constant against its valid domain.
    ///
    /// Returns `InvalidConfig` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.edge.low_threshold <= 0.0 || !self.edge.low_threshold.is_finite() {
            return Err(AnalysisError::invalid_config(
                "edge.low_threshold",
                self.edge.low_threshold,
                "must be positive",
            ));
        }
        if self.edge.high_threshold < self.edge.low_threshold
            || !self.edge.high_threshold.is_finite()
        {
            return Err(AnalysisError::invalid_config(
                "edge.high_threshold",
                self.edge.high_threshold,
                "must be >= low_threshold",
            ));
        }
        check_unit_interval("bright_threshold", self.bright_threshold)?;
        check_unit_interval("subject_threshold", self.subject_threshold)?;
        check_unit_interval("rules.t_edge", self.rules.t_edge)?;
        check_unit_interval("rules.t_bright", self.rules.t_bright)?;
        check_unit_interval("rules.s_contrast", self.rules.s_contrast)?;
        check_unit_interval("rules.hazy_mean_floor", self.rules.hazy_mean_floor)?;
        check_unit_interval("rules.t_dilated", self.rules.t_dilated)?;
        if self.line.magnitude_threshold <= 0.0 || !self.line.magnitude_threshold.is_finite() {
            return Err(AnalysisError::invalid_config(
                "line.magnitude_threshold",
                self.line.magnitude_threshold,
                "must be positive",
            ));
        }
        if self.line.min_length_px <= 0.0 || !self.line.min_length_px.is_finite() {
            return Err(AnalysisError::invalid_config(
                "line.min_length_px",
                self.line.min_length_px,
                "must be a positive length",
            ));
        }
        if !(0.0..=180.0).contains(&self.line.angle_tolerance_deg) {
            return Err(AnalysisError::invalid_config(
                "line.angle_tolerance_deg",
                self.line.angle_tolerance_deg,
                "must be in [0, 180] degrees",
            ));
        }
        check_unit_interval("line.min_aligned_fraction", self.line.min_aligned_fraction)?;
        if let Some(cap) = self.percent_cap {
            if !(cap > 0.0 && cap <= 100.0) {
                return Err(AnalysisError::invalid_config(
                    "percent_cap",
                    cap,
                    "must lie in (0, 100]",
                ));
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| AnalysisError::ImageLoad {
            message: format!("{}: {e}", path.display()),
        })?;
        let config: Self =
            serde_json::from_str(&data).map_err(|e| AnalysisError::ImageLoad {
                message: format!("{}: {e}", path.display()),
            })?;
        config.validate()?;
        Ok(config)
    }
}
