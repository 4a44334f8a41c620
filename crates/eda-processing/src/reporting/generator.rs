use super::markdown::{ReportContent, render_report};
use super::plots::{draw_correlation_heatmap, draw_histogram, draw_missing_matrix};
use crate::analysis::{correlation_matrix, top_categories};
use crate::config::ReportOptions;
use crate::error::{EdaError, Result, ResultExt};
use crate::profiler::DataProfiler;
use crate::quality::QualityScorer;
use crate::types::{
    CorrelationMatrix, DatasetSummary, MissingTable, QualityAssessment, SummaryRow, TopCategories,
};
use crate::utils::{column_series, missing_mask, numeric_values};
use chrono::Local;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SUMMARY_FILE: &str = "summary.csv";
pub const MISSING_FILE: &str = "missing.csv";
pub const CORRELATION_FILE: &str = "correlation.csv";
pub const TOP_CATEGORIES_FILE: &str = "top_categories.csv";
pub const MISSING_MATRIX_FILE: &str = "missing_matrix.png";
pub const CORRELATION_HEATMAP_FILE: &str = "correlation_heatmap.png";
pub const QUALITY_FILE: &str = "quality.json";
pub const REPORT_FILE: &str = "report.md";

/// Files written by [`ReportGenerator::generate`] and the quality verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifacts {
    pub out_dir: PathBuf,
    pub report_path: PathBuf,
    /// Every written file, in write order.
    pub files: Vec<PathBuf>,
    pub assessment: QualityAssessment,
}

/// Writes the tables, charts and Markdown report for a dataset.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Analyze `df` and write the full report into `options.out_dir`.
    pub fn generate(df: &DataFrame, options: &ReportOptions) -> Result<ReportArtifacts> {
        options.validate()?;

        let summary = DataProfiler::summarize_dataset(df)?;
        let missing = DataProfiler::missing_table(df)?;
        let rows = DataProfiler::flatten_summary(&summary);
        let assessment =
            QualityScorer::new(options.thresholds.clone()).assess(&summary, &missing);
        let correlation = correlation_matrix(df, &summary)?;
        let top = top_categories(
            df,
            &summary,
            options.top_k_categories,
            options.max_category_columns,
        )?;

        let out_dir = options.out_dir.clone();
        if out_dir.exists() && !out_dir.is_dir() {
            return Err(EdaError::ReportGenerationFailed(format!(
                "'{}' exists and is not a directory",
                out_dir.display()
            )));
        }
        fs::create_dir_all(&out_dir)
            .context(format!("Failed to create '{}'", out_dir.display()))?;
        info!("Writing report to {}", out_dir.display());

        let mut files = Vec::new();

        let path = out_dir.join(SUMMARY_FILE);
        write_csv(&mut summary_frame(&rows)?, &path)?;
        files.push(path);

        let path = out_dir.join(MISSING_FILE);
        write_csv(&mut missing_frame(&missing)?, &path)?;
        files.push(path);

        let path = out_dir.join(CORRELATION_FILE);
        write_csv(&mut correlation_frame(&correlation)?, &path)?;
        files.push(path);

        let path = out_dir.join(TOP_CATEGORIES_FILE);
        write_csv(&mut top_categories_frame(&top)?, &path)?;
        files.push(path);

        let path = out_dir.join(QUALITY_FILE);
        fs::write(&path, serde_json::to_string_pretty(&assessment)?)
            .context(format!("Failed to write '{}'", path.display()))?;
        files.push(path);

        let histograms = Self::write_histograms(df, &summary, options.max_hist_columns, &out_dir)?;
        files.extend(histograms.iter().map(|(_, file)| out_dir.join(file)));

        let masks = df
            .get_columns()
            .iter()
            .map(|column| missing_mask(column.as_materialized_series()))
            .collect::<Result<Vec<_>>>()?;
        let path = out_dir.join(MISSING_MATRIX_FILE);
        draw_missing_matrix(&masks, &path)?;
        files.push(path);

        let heatmap = if correlation.is_empty() {
            debug!("No numeric columns, skipping correlation heatmap");
            None
        } else {
            let path = out_dir.join(CORRELATION_HEATMAP_FILE);
            draw_correlation_heatmap(&correlation.values, &path)?;
            files.push(path);
            Some(CORRELATION_HEATMAP_FILE)
        };

        let markdown = render_report(&ReportContent {
            options,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary: &summary,
            rows: &rows,
            missing: &missing,
            assessment: &assessment,
            correlation: &correlation,
            top_categories: &top,
            histograms: &histograms,
            missing_matrix: Some(MISSING_MATRIX_FILE),
            correlation_heatmap: heatmap,
        });
        let report_path = out_dir.join(REPORT_FILE);
        fs::write(&report_path, markdown)
            .context(format!("Failed to write '{}'", report_path.display()))?;
        files.push(report_path.clone());

        info!(
            "Report saved: {} ({} files, quality score {:.2})",
            report_path.display(),
            files.len(),
            assessment.quality_score
        );

        Ok(ReportArtifacts {
            out_dir,
            report_path,
            files,
            assessment,
        })
    }

    /// Draw one histogram per numeric column, up to `limit`, returning
    /// `(column, file name)` pairs.
    fn write_histograms(
        df: &DataFrame,
        summary: &DatasetSummary,
        limit: usize,
        out_dir: &Path,
    ) -> Result<Vec<(String, String)>> {
        let mut used = HashSet::new();
        let mut written = Vec::new();

        for name in summary.numeric_columns().into_iter().take(limit) {
            let values: Vec<f64> = numeric_values(column_series(df, name)?)?
                .into_iter()
                .flatten()
                .collect();
            if values.is_empty() {
                warn!("Column '{}' has no numeric values, skipping histogram", name);
                continue;
            }

            let file = histogram_file_name(name, &mut used);
            draw_histogram(&values, &out_dir.join(&file))?;
            written.push((name.to_string(), file));
        }

        Ok(written)
    }
}

/// `hist_<column>.png` with unsafe characters replaced; repeated names get a
/// numeric suffix.
fn histogram_file_name(column: &str, used: &mut HashSet<String>) -> String {
    let stem: String = column
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    let mut candidate = format!("hist_{}.png", stem);
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("hist_{}_{}.png", stem, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).context(format!("Failed to create '{}'", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
        .context(format!("Failed to write '{}'", path.display()))?;
    debug!("Table saved: {}", path.display());
    Ok(())
}

/// Summary rows as a table with one row per column.
pub fn summary_frame(rows: &[SummaryRow]) -> Result<DataFrame> {
    let df = df!(
        "name" => rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        "dtype" => rows.iter().map(|r| r.dtype.clone()).collect::<Vec<_>>(),
        "inferred_type" => rows.iter().map(|r| r.inferred_type.clone()).collect::<Vec<_>>(),
        "non_null" => rows.iter().map(|r| r.non_null as u64).collect::<Vec<_>>(),
        "missing" => rows.iter().map(|r| r.missing as u64).collect::<Vec<_>>(),
        "missing_share" => rows.iter().map(|r| r.missing_share).collect::<Vec<_>>(),
        "unique" => rows.iter().map(|r| r.unique as u64).collect::<Vec<_>>(),
        "example" => rows.iter().map(|r| r.example.clone()).collect::<Vec<_>>(),
        "min" => rows.iter().map(|r| r.min).collect::<Vec<_>>(),
        "max" => rows.iter().map(|r| r.max).collect::<Vec<_>>(),
        "mean" => rows.iter().map(|r| r.mean).collect::<Vec<_>>(),
        "std" => rows.iter().map(|r| r.std).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

pub fn missing_frame(missing: &MissingTable) -> Result<DataFrame> {
    let entries = &missing.entries;
    let df = df!(
        "column" => entries.iter().map(|e| e.column.clone()).collect::<Vec<_>>(),
        "missing_count" => entries.iter().map(|e| e.missing_count as u64).collect::<Vec<_>>(),
        "missing_share" => entries.iter().map(|e| e.missing_share).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Square matrix with the column names in the first column.
pub fn correlation_frame(correlation: &CorrelationMatrix) -> Result<DataFrame> {
    let taken = |name: &str| correlation.columns.iter().any(|c| c == name);
    let mut index_name = if taken("column") {
        "correlation_with".to_string()
    } else {
        "column".to_string()
    };
    while taken(&index_name) {
        index_name.push('_');
    }

    let mut columns = vec![Column::new(index_name.into(), correlation.columns.clone())];
    for (j, name) in correlation.columns.iter().enumerate() {
        let values: Vec<Option<f64>> = correlation.values.iter().map(|row| row[j]).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Top categories in long format: one row per `(column, value)`.
pub fn top_categories_frame(top: &TopCategories) -> Result<DataFrame> {
    let rows: Vec<_> = top
        .columns
        .iter()
        .flat_map(|c| c.values.iter().map(move |v| (c.column.as_str(), v)))
        .collect();

    let df = df!(
        "column" => rows.iter().map(|(c, _)| c.to_string()).collect::<Vec<_>>(),
        "value" => rows.iter().map(|(_, v)| v.value.clone()).collect::<Vec<_>>(),
        "count" => rows.iter().map(|(_, v)| v.count as u64).collect::<Vec<_>>(),
        "share" => rows.iter().map(|(_, v)| v.share).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_df() -> DataFrame {
        df!(
            "age" => [Some(25i64), Some(32), None, Some(41), Some(29), Some(35)],
            "income" => [Some(30000.0), Some(45000.0), Some(52000.0), None, Some(39000.0), Some(61000.0)],
            "city" => ["Moscow", "Kazan", "Moscow", "Omsk", "Moscow", "Kazan"],
            "const" => ["x", "x", "x", "x", "x", "x"],
        )
        .unwrap()
    }

    #[test]
    fn test_generate_writes_all_files() {
        let dir = tempdir().unwrap();
        let options = ReportOptions::builder()
            .out_dir(dir.path().join("out"))
            .title("Test report")
            .build()
            .unwrap();

        let artifacts = ReportGenerator::generate(&sample_df(), &options).unwrap();

        for file in [
            SUMMARY_FILE,
            MISSING_FILE,
            CORRELATION_FILE,
            TOP_CATEGORIES_FILE,
            QUALITY_FILE,
            MISSING_MATRIX_FILE,
            CORRELATION_HEATMAP_FILE,
            REPORT_FILE,
            "hist_age.png",
            "hist_income.png",
        ] {
            assert!(artifacts.out_dir.join(file).exists(), "missing {}", file);
        }
        assert_eq!(artifacts.files.len(), 10);

        let report = fs::read_to_string(&artifacts.report_path).unwrap();
        assert!(report.starts_with("# Test report\n"));
        assert!(report.contains("## Missing values"));
        assert!(report.contains("](hist_age.png)"));
        assert!(report.contains("](correlation_heatmap.png)"));
        assert!(report.contains("### city"));

        // 6 rows < 100 and a constant column
        assert!(artifacts.assessment.flags.too_few_rows);
        assert!(artifacts.assessment.flags.has_constant_columns);
    }

    #[test]
    fn test_histogram_limit_and_no_heatmap_without_numeric() {
        let dir = tempdir().unwrap();
        let df = df!("city" => ["a", "b", "a"]).unwrap();
        let options = ReportOptions::builder()
            .out_dir(dir.path())
            .max_hist_columns(0)
            .build()
            .unwrap();

        let artifacts = ReportGenerator::generate(&df, &options).unwrap();
        assert!(!dir.path().join(CORRELATION_HEATMAP_FILE).exists());
        assert!(dir.path().join(MISSING_MATRIX_FILE).exists());

        let report = fs::read_to_string(artifacts.report_path).unwrap();
        assert!(report.contains("No numeric columns to correlate."));
    }

    #[test]
    fn test_summary_csv_contents() {
        let dir = tempdir().unwrap();
        let options = ReportOptions::builder().out_dir(dir.path()).build().unwrap();
        ReportGenerator::generate(&sample_df(), &options).unwrap();

        let csv = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,dtype,inferred_type,non_null,missing,missing_share,unique,example,min,max,mean,std"
        );
        assert_eq!(lines.count(), 4);

        let top = fs::read_to_string(dir.path().join(TOP_CATEGORIES_FILE)).unwrap();
        assert!(top.starts_with("column,value,count,share\n"));
        assert!(top.contains("city,Moscow,3,0.5"));
    }

    #[test]
    fn test_out_dir_must_be_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();
        let options = ReportOptions::builder().out_dir(&file).build().unwrap();

        let err = ReportGenerator::generate(&sample_df(), &options).unwrap_err();
        assert!(matches!(err, EdaError::ReportGenerationFailed(_)));
    }

    #[test]
    fn test_quality_json_round_trips() {
        let dir = tempdir().unwrap();
        let options = ReportOptions::builder().out_dir(dir.path()).build().unwrap();
        let artifacts = ReportGenerator::generate(&sample_df(), &options).unwrap();

        let text = fs::read_to_string(dir.path().join(QUALITY_FILE)).unwrap();
        let parsed: QualityAssessment = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, artifacts.assessment);
    }

    #[test]
    fn test_histogram_file_name() {
        let mut used = HashSet::new();
        assert_eq!(histogram_file_name("price usd", &mut used), "hist_price_usd.png");
        assert_eq!(histogram_file_name("price/usd", &mut used), "hist_price_usd_2.png");
        assert_eq!(histogram_file_name("age", &mut used), "hist_age.png");
    }

    #[test]
    fn test_correlation_frame_shape() {
        let matrix = CorrelationMatrix {
            columns: vec!["a".to_string(), "b".to_string()],
            values: vec![vec![Some(1.0), None], vec![None, Some(1.0)]],
        };
        let df = correlation_frame(&matrix).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.get_column_names()[0].as_str(), "column");
    }

    #[test]
    fn test_correlation_frame_index_name_avoids_data_columns() {
        let names = ["column", "correlation_with", "correlation_with_"];
        let matrix = CorrelationMatrix {
            columns: names.iter().map(|n| n.to_string()).collect(),
            values: vec![vec![Some(1.0); 3]; 3],
        };
        let df = correlation_frame(&matrix).unwrap();
        assert_eq!(df.shape(), (3, 4));
        assert_eq!(df.get_column_names()[0].as_str(), "correlation_with__");
    }
}
