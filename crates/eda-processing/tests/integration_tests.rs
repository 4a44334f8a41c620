//! Integration tests for the EDA toolkit.
//!
//! These tests run the public API end to end on the CSV fixtures.

use eda_processing::{
    ColumnType, EdaError, LoadOptions, QualityScorer, QualityThresholds, ReportGenerator,
    ReportOptions, compute_quality_flags, correlation_matrix, flatten_summary, load_csv,
    load_csv_from_bytes, missing_table, summarize_dataset, top_categories,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> DataFrame {
    load_csv(fixtures_path().join(filename), &LoadOptions::default())
        .expect("Failed to read CSV fixture")
}

// ============================================================================
// Summaries
// ============================================================================

#[test]
fn test_summarize_example_dataset() {
    let df = load_fixture("example.csv");
    let summary = summarize_dataset(&df).unwrap();

    assert_eq!(summary.n_rows, 12);
    assert_eq!(summary.n_cols, 7);
    assert_eq!(summary.numeric_columns(), vec!["user_id", "age", "income"]);
    assert_eq!(summary.categorical_columns(), vec!["country", "plan"]);
    assert_eq!(
        summary.column("churned").unwrap().inferred_type,
        ColumnType::Boolean
    );
    assert_eq!(
        summary.column("signup_date").unwrap().inferred_type,
        ColumnType::Datetime
    );

    let age = summary.column("age").unwrap();
    assert_eq!(age.missing, 2);
    assert_eq!(age.non_missing, 10);
    let stats = age.numeric.as_ref().unwrap();
    assert_eq!(stats.min, 23.0);
    assert_eq!(stats.max, 50.0);

    let rows = flatten_summary(&summary);
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[2].name, "country");
    assert_eq!(rows[2].min, None);
}

#[test]
fn test_missing_table_example_dataset() {
    let df = load_fixture("example.csv");
    let missing = missing_table(&df).unwrap();

    let counts: Vec<(&str, usize)> = missing
        .entries
        .iter()
        .map(|e| (e.column.as_str(), e.missing_count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("user_id", 0),
            ("age", 2),
            ("country", 0),
            ("plan", 0),
            ("income", 2),
            ("churned", 0),
            ("signup_date", 1),
        ]
    );
    assert_eq!(missing.total_missing(), 5);
    assert!((missing.max_missing_share() - 2.0 / 12.0).abs() < 1e-12);
}

#[test]
fn test_summary_and_missing_table_agree_on_infinity() {
    let df = load_csv_from_bytes(b"x,y\n1,2\ninf,3\n4,5\n", &LoadOptions::default()).unwrap();
    let summary = summarize_dataset(&df).unwrap();
    let missing = missing_table(&df).unwrap();

    for (column, entry) in summary.columns.iter().zip(&missing.entries) {
        assert_eq!(column.name, entry.column);
        assert_eq!(column.missing, entry.missing_count);
    }

    let x = summary.column("x").unwrap();
    assert_eq!(x.missing, 1);
    assert_eq!(x.non_missing, 2);
    assert_eq!(x.distinct, 2);
    assert_eq!(x.numeric.as_ref().unwrap().max, 4.0);
}

#[test]
fn test_semicolon_separated_file() {
    let options = LoadOptions::from_cli(";", "utf-8").unwrap();
    let df = load_csv(fixtures_path().join("semicolon.csv"), &options).unwrap();
    let summary = summarize_dataset(&df).unwrap();

    assert_eq!((summary.n_rows, summary.n_cols), (3, 3));
    assert_eq!(summary.numeric_columns(), vec!["score"]);
}

#[test]
fn test_header_only_file() {
    let df = load_fixture("header_only.csv");
    let summary = summarize_dataset(&df).unwrap();
    let missing = missing_table(&df).unwrap();

    assert_eq!(summary.n_rows, 0);
    assert_eq!(summary.n_cols, 3);
    assert!(missing.entries.iter().all(|e| e.missing_share == 0.0));

    let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
    assert!(flags.too_few_rows);
    assert!((0.0..=1.0).contains(&flags.quality_score));
}

#[test]
fn test_missing_file() {
    let err = load_csv(fixtures_path().join("nope.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, EdaError::FileNotFound(_)));
    assert!(err.is_user_error());
}

// ============================================================================
// Quality
// ============================================================================

#[test]
fn test_quality_example_dataset() {
    let df = load_fixture("example.csv");
    let summary = summarize_dataset(&df).unwrap();
    let missing = missing_table(&df).unwrap();

    let assessment = QualityScorer::default().assess(&summary, &missing);
    assert!(assessment.flags.too_few_rows);
    assert!(!assessment.flags.too_many_missing);
    assert!(!assessment.flags.has_constant_columns);
    assert!((assessment.quality_score - (1.0 - 2.0 / 12.0 - 0.2)).abs() < 1e-12);
    assert!(assessment.ok_for_model);
}

#[test]
fn test_quality_sparse_dataset() {
    let df = load_fixture("sparse.csv");
    let summary = summarize_dataset(&df).unwrap();
    let missing = missing_table(&df).unwrap();

    let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
    assert!(flags.too_many_missing);
    assert!(flags.has_constant_columns);
    assert!(flags.constant_columns.contains(&"const".to_string()));
    assert_eq!(flags.quality_score, 0.0);

    let relaxed = QualityThresholds::builder()
        .min_rows(1)
        .max_missing_share(0.8)
        .build()
        .unwrap();
    let flags = compute_quality_flags(&summary, &missing, &relaxed);
    assert!(!flags.too_few_rows);
    assert!(!flags.too_many_missing);
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_correlation_example_dataset() {
    let df = load_fixture("example.csv");
    let summary = summarize_dataset(&df).unwrap();
    let matrix = correlation_matrix(&df, &summary).unwrap();

    assert_eq!(matrix.columns, vec!["user_id", "age", "income"]);
    for i in 0..3 {
        assert_eq!(matrix.values[i][i], Some(1.0));
    }
    let r = matrix.get("age", "income").unwrap();
    assert!(r > 0.8 && r <= 1.0, "age and income should correlate, got {}", r);
}

#[test]
fn test_top_categories_example_dataset() {
    let df = load_fixture("example.csv");
    let summary = summarize_dataset(&df).unwrap();
    let top = top_categories(&df, &summary, 2, None).unwrap();

    let country: Vec<(&str, usize)> = top
        .get("country")
        .unwrap()
        .iter()
        .map(|c| (c.value.as_str(), c.count))
        .collect();
    assert_eq!(country, vec![("RU", 7), ("KZ", 3)]);

    let plan: Vec<(&str, usize)> = top
        .get("plan")
        .unwrap()
        .iter()
        .map(|c| (c.value.as_str(), c.count))
        .collect();
    assert_eq!(plan, vec![("basic", 6), ("pro", 4)]);
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_report_end_to_end() {
    let dir = tempdir().unwrap();
    let df = load_fixture("example.csv");
    let options = ReportOptions::builder()
        .out_dir(dir.path().join("report"))
        .title("Churn")
        .max_hist_columns(2)
        .top_k_categories(3)
        .max_category_columns(1)
        .build()
        .unwrap();

    let artifacts = ReportGenerator::generate(&df, &options).unwrap();
    let out = &artifacts.out_dir;

    assert!(out.join("hist_user_id.png").exists());
    assert!(out.join("hist_age.png").exists());
    assert!(!out.join("hist_income.png").exists());
    assert!(out.join("correlation_heatmap.png").exists());
    assert!(out.join("missing_matrix.png").exists());

    let report = fs::read_to_string(&artifacts.report_path).unwrap();
    assert!(report.starts_with("# Churn\n"));
    assert!(report.contains("## Data quality"));
    assert!(report.contains("### country"));
    assert!(!report.contains("### plan"));

    let top = fs::read_to_string(out.join("top_categories.csv")).unwrap();
    assert_eq!(top.lines().count(), 4);

    let correlation = fs::read_to_string(out.join("correlation.csv")).unwrap();
    assert_eq!(
        correlation.lines().next().unwrap(),
        "column,user_id,age,income"
    );
}

#[test]
fn test_report_rejects_invalid_options() {
    let dir = tempdir().unwrap();
    let df = load_fixture("example.csv");
    let mut options = ReportOptions::builder().out_dir(dir.path()).build().unwrap();
    options.top_k_categories = 0;

    let err = ReportGenerator::generate(&df, &options).unwrap_err();
    assert!(matches!(err, EdaError::InvalidConfig(_)));
    assert!(!dir.path().join("report.md").exists());
}
