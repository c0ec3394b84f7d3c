use perfbaseline::report::{render_json, render_text, write_report};
use perfbaseline::{
    AnalysisReport, ExecutionMode, ModeLabels, ModeSet, OutputFormat, SubjectMeans, Thresholds,
    analyze_modes,
};

fn means(pairs: &[(&str, f64)]) -> SubjectMeans {
    pairs.iter().map(|(name, mean)| (name.to_string(), *mean)).collect()
}

fn regressed() -> AnalysisReport {
    let set = ModeSet::new()
        .with(ExecutionMode::Baseline, means(&[("Adl", 1_000.0), ("Ema", 500.0)]))
        .with(ExecutionMode::VariantA, means(&[("Adl", 1_500.0), ("Ema", 1_500.0)]))
        .with(ExecutionMode::VariantB, means(&[("Adl", 2_600.0), ("Ema", 500.0)]));
    analyze_modes(&set, &Thresholds::default())
}

fn clean() -> AnalysisReport {
    let set = ModeSet::new()
        .with(ExecutionMode::Baseline, means(&[("Adl", 1_000.0)]))
        .with(ExecutionMode::VariantA, means(&[("Adl", 1_000.0)]));
    analyze_modes(&set, &Thresholds::default())
}

#[test]
fn test_text_report_sections_in_order() {
    let text = render_text(&regressed(), &ModeLabels::default());
    let banner = text.find("PERFORMANCE ANALYSIS: StreamHub & BufferList vs Series").unwrap();
    let stream = text.find("Subjects where StreamHub is >30% slower than Series:").unwrap();
    let buffer = text.find("Subjects where BufferList is >30% slower than Series:").unwrap();
    let summary = text.find("SUMMARY STATISTICS").unwrap();
    let recommendations = text.find("RECOMMENDATIONS").unwrap();
    let hints = text.find("Potential causes of slowdowns:").unwrap();
    assert!(banner < stream && stream < buffer && buffer < summary);
    assert!(summary < recommendations && recommendations < hints);
}

#[test]
fn test_text_report_rows_and_summary() {
    let text = render_text(&regressed(), &ModeLabels::default());
    assert!(text.contains("1,000"));
    assert!(text.contains("2,600"));
    assert!(text.contains("1.50x REVIEW"));
    assert!(text.contains("3.00x CRITICAL"));
    assert!(text.contains("StreamHub Issues Found: 2"));
    assert!(text.contains("  Average slowdown: 2.25x"));
    assert!(text.contains("  Worst case: Ema at 3.00x slower"));
    assert!(text.contains("BufferList Issues Found: 1"));
    assert!(text.contains("   - Adl: 2.60x slower (2,600 ns vs 1,000 ns)"));
}

#[test]
fn test_critical_bucket_printed_before_review_bucket() {
    let text = render_text(&regressed(), &ModeLabels::default());
    let critical = text.find("CRITICAL StreamHub implementations").unwrap();
    let review = text.find("StreamHub implementations to review").unwrap();
    assert!(critical < review);
}

#[test]
fn test_clean_text_report() {
    let text = render_text(&clean(), &ModeLabels::default());
    assert!(text.contains("No significant StreamHub performance issues found"));
    assert!(text.contains("No significant BufferList performance issues found"));
    assert!(text.contains("All StreamHub and BufferList implementations perform within acceptable range!"));
    assert!(!text.contains("RECOMMENDATIONS"));
    assert!(!text.contains("Issues Found"));
}

#[test]
fn test_custom_labels_are_used() {
    let labels = ModeLabels {
        baseline: "Batch".into(),
        variant_a: "Incremental".into(),
        variant_b: "Buffered".into(),
    };
    let text = render_text(&regressed(), &labels);
    assert!(text.contains("PERFORMANCE ANALYSIS: Incremental & Buffered vs Batch"));
}

#[test]
fn test_json_report_carries_outcome_and_issues() {
    let json = render_json(&regressed(), &ModeLabels::default()).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["outcome"]["status"], "regressed");
    assert_eq!(value["outcome"]["critical"], 2);
    assert_eq!(value["outcome"]["review"], 1);
    assert_eq!(value["thresholds"]["review"], 1.3);
    assert_eq!(value["comparisons"].as_array().unwrap().len(), 2);
    assert_eq!(value["variants"][0]["mode"], "variant-a");
    assert_eq!(value["variants"][1]["issues"][0]["severity"], "critical");
    assert_eq!(value["labels"]["variant_b"], "BufferList");
    assert_eq!(value["hints"].as_array().unwrap().len(), 5);
}

#[test]
fn test_json_report_for_clean_run() {
    let json = render_json(&clean(), &ModeLabels::default()).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["outcome"]["status"], "clean");
    assert!(value["variants"][0]["summary"].is_null());
}

#[test]
fn test_write_report_uses_format() {
    let mut buffer = Vec::new();
    write_report(&mut buffer, &clean(), &ModeLabels::default(), OutputFormat::Json).expect("write");
    let out = String::from_utf8(buffer).expect("utf8");
    assert!(out.trim_start().starts_with('{'));
    assert!(out.ends_with('\n'));
}
