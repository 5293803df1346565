use inclusion_detector::image::RgbImageU8;
use inclusion_detector::{AnalysisConfig, InclusionAnalyzer};

fn main() {
    // Demo stub: creates a fake RGB buffer and runs the analyzer
    let w = 640usize;
    let h = 480usize;
    let rgb = vec![0u8; w * h * 3];
    let img = RgbImageU8 {
        w,
        h,
        stride: w,
        data: &rgb,
    };

    let analyzer = match InclusionAnalyzer::new(AnalysisConfig::default()) {
        Ok(analyzer) => analyzer,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match analyzer.analyze(img) {
        Ok(analysis) => println!(
            "labels={:?} defect={:.2}% latency_ms={:.3}",
            analysis.report.labels, analysis.score.percent, analysis.latency_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
