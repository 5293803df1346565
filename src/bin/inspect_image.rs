use inclusion_detector::aggregate::MultiViewResult;
use inclusion_detector::analyzer::ImageAnalysis;
use inclusion_detector::image::io::{annotate_regions, load_rgb_image, save_rgb_png, write_json_file};
use inclusion_detector::image::RgbImageU8;
use inclusion_detector::{AnalysisConfig, BatchPolicy, InclusionAnalyzer};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InspectToolConfig {
    /// One entry per photographed view (top/side/bottom).
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub output: InspectOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct InspectOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    /// When set, an annotated copy of each view is written here with the
    /// input file stem plus `_annotated.png`.
    #[serde(default)]
    pub annotated_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<InspectToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let mut config = load_config(Path::new(&config_path))?;
    if config.inputs.is_empty() {
        return Err("config must list at least one input image".to_string());
    }
    // Annotation needs geometry regardless of what the analysis section says.
    if config.output.annotated_dir.is_some() {
        config.analysis.localize = true;
    }

    let analyzer = InclusionAnalyzer::new(config.analysis.clone()).map_err(|e| e.to_string())?;

    let mut buffers = Vec::with_capacity(config.inputs.len());
    for input in &config.inputs {
        buffers.push(load_rgb_image(input).map_err(|e| e.to_string())?);
    }
    let views: Vec<RgbImageU8<'_>> = buffers.iter().map(|b| b.as_view()).collect();

    let (results, combined) = analyzer
        .analyze_views(&views, BatchPolicy::FailFast)
        .map_err(|e| e.to_string())?;
    let analyses: Vec<ImageAnalysis> = results
        .into_iter()
        .map(|r| r.expect("fail-fast batch cannot hold an error"))
        .collect();

    if let Some(dir) = &config.output.annotated_dir {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        for (input, (view, analysis)) in config
            .inputs
            .iter()
            .zip(views.iter().zip(analyses.iter()))
        {
            let Some(defects) = &analysis.localization else {
                continue;
            };
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "view".to_string());
            let out = dir.join(format!("{stem}_annotated.png"));
            let annotated = annotate_regions(view.clone(), defects);
            save_rgb_png(&annotated, &out).map_err(|e| e.to_string())?;
            println!("Saved annotated view to {}", out.display());
        }
    }

    let summary = InspectionSummary {
        views_received: analyses.len(),
        per_view: analyses,
        combined,
    };
    write_json_file(&config.output.report_json, &summary).map_err(|e| e.to_string())?;
    println!(
        "Saved report for {} view(s) to {} (combined defect {:.2}%)",
        summary.views_received,
        config.output.report_json.display(),
        summary.combined.mean_percent
    );

    Ok(())
}

fn usage() -> String {
    "Usage: inspect_image <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectionSummary {
    views_received: usize,
    per_view: Vec<ImageAnalysis>,
    combined: MultiViewResult,
}
