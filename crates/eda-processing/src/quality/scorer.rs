use crate::config::QualityThresholds;
use crate::error::{EdaError, Result};
use crate::types::{ColumnType, DatasetSummary, MissingTable, QualityAssessment, QualityFlags};
use crate::utils::share;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Score deducted when the dataset has fewer rows than `min_rows`.
pub const TOO_FEW_ROWS_PENALTY: f64 = 0.2;

/// Score deducted when at least one column holds a single value.
pub const CONSTANT_COLUMNS_PENALTY: f64 = 0.1;

/// Scores strictly above this are considered fit for modeling.
pub const OK_FOR_MODEL_THRESHOLD: f64 = 0.5;

/// Aggregate dataset shape, as sent to the `/quality` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetShape {
    pub n_rows: usize,
    pub n_cols: usize,
    pub max_missing_share: f64,
}

/// Derives quality flags and the quality score.
///
/// The score starts at `1 - max_missing_share`, so heavy missingness is
/// already priced in; `too_many_missing` adds no extra deduction. Too few
/// rows costs [`TOO_FEW_ROWS_PENALTY`] and constant columns cost
/// [`CONSTANT_COLUMNS_PENALTY`]. The result is clamped to `[0, 1]`.
/// High-cardinality categoricals are reported but not penalized.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    thresholds: QualityThresholds,
}

impl QualityScorer {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Compute quality flags from a summary and its missingness table.
    pub fn compute_flags(&self, summary: &DatasetSummary, missing: &MissingTable) -> QualityFlags {
        let max_missing_share = missing.max_missing_share();

        let constant_columns: Vec<String> = summary
            .columns
            .iter()
            .filter(|col| col.distinct <= 1)
            .map(|col| col.name.clone())
            .collect();

        let high_cardinality_columns: Vec<String> = summary
            .columns
            .iter()
            .filter(|col| {
                col.inferred_type == ColumnType::Categorical
                    && col.non_missing >= self.thresholds.high_cardinality_min_values
                    && share(col.distinct, col.non_missing) > self.thresholds.high_cardinality_share
            })
            .map(|col| col.name.clone())
            .collect();

        let too_few_rows = summary.n_rows < self.thresholds.min_rows;
        let has_constant_columns = !constant_columns.is_empty();

        debug!(
            "Quality flags: rows={} max_missing={:.3} constant={:?}",
            summary.n_rows, max_missing_share, constant_columns
        );

        QualityFlags {
            too_few_rows,
            too_many_missing: max_missing_share > self.thresholds.max_missing_share,
            has_constant_columns,
            has_high_cardinality_categoricals: !high_cardinality_columns.is_empty(),
            max_missing_share,
            constant_columns,
            high_cardinality_columns,
            quality_score: quality_score(max_missing_share, too_few_rows, has_constant_columns),
        }
    }

    /// Compute flags plus the modeling verdict.
    pub fn assess(&self, summary: &DatasetSummary, missing: &MissingTable) -> QualityAssessment {
        self.verdict(self.compute_flags(summary, missing))
    }

    /// Assess a dataset known only by its aggregate shape.
    ///
    /// Constant columns cannot be detected from the shape alone and are
    /// reported as absent.
    pub fn assess_shape(&self, shape: &DatasetShape) -> Result<QualityAssessment> {
        if !(0.0..=1.0).contains(&shape.max_missing_share) {
            return Err(EdaError::InvalidParameter(format!(
                "max_missing_share must be between 0.0 and 1.0, got {}",
                shape.max_missing_share
            )));
        }

        let too_few_rows = shape.n_rows < self.thresholds.min_rows;
        let flags = QualityFlags {
            too_few_rows,
            too_many_missing: shape.max_missing_share > self.thresholds.max_missing_share,
            has_constant_columns: false,
            has_high_cardinality_categoricals: false,
            max_missing_share: shape.max_missing_share,
            constant_columns: Vec::new(),
            high_cardinality_columns: Vec::new(),
            quality_score: quality_score(shape.max_missing_share, too_few_rows, false),
        };

        Ok(self.verdict(flags))
    }

    fn verdict(&self, flags: QualityFlags) -> QualityAssessment {
        let ok_for_model = flags.quality_score > OK_FOR_MODEL_THRESHOLD;
        QualityAssessment {
            ok_for_model,
            quality_score: flags.quality_score,
            message: self.describe(&flags, ok_for_model),
            flags,
        }
    }

    fn describe(&self, flags: &QualityFlags, ok_for_model: bool) -> String {
        let mut problems = Vec::new();
        if flags.too_few_rows {
            problems.push(format!("fewer than {} rows", self.thresholds.min_rows));
        }
        if flags.too_many_missing {
            problems.push(format!(
                "a column is {:.0}% missing (limit {:.0}%)",
                flags.max_missing_share * 100.0,
                self.thresholds.max_missing_share * 100.0
            ));
        }
        if flags.has_constant_columns {
            problems.push(format!(
                "constant columns: {}",
                flags.constant_columns.join(", ")
            ));
        }

        match (ok_for_model, problems.is_empty()) {
            (true, true) => "Data looks suitable for modeling".to_string(),
            (true, false) => format!("Data is usable for modeling, but check: {}", problems.join("; ")),
            (false, true) => "Data quality score is too low for modeling".to_string(),
            (false, false) => format!("Data is not ready for modeling: {}", problems.join("; ")),
        }
    }
}

/// Combine the missingness base score with the flag penalties.
pub fn quality_score(max_missing_share: f64, too_few_rows: bool, has_constant_columns: bool) -> f64 {
    let mut score = 1.0 - max_missing_share;
    if too_few_rows {
        score -= TOO_FEW_ROWS_PENALTY;
    }
    if has_constant_columns {
        score -= CONSTANT_COLUMNS_PENALTY;
    }
    score.clamp(0.0, 1.0)
}

/// Compute quality flags with the given thresholds.
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
    thresholds: &QualityThresholds,
) -> QualityFlags {
    QualityScorer::new(thresholds.clone()).compute_flags(summary, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnSummary, MissingEntry};

    fn create_column(name: &str, inferred_type: ColumnType, missing: usize, distinct: usize, n_rows: usize) -> ColumnSummary {
        ColumnSummary {
            name: name.to_string(),
            dtype: "str".to_string(),
            inferred_type,
            non_missing: n_rows - missing,
            missing,
            missing_share: share(missing, n_rows),
            distinct,
            example: None,
            numeric: None,
        }
    }

    fn create_inputs(n_rows: usize, columns: Vec<ColumnSummary>) -> (DatasetSummary, MissingTable) {
        let entries = columns
            .iter()
            .map(|col| MissingEntry {
                column: col.name.clone(),
                missing_count: col.missing,
                missing_share: col.missing_share,
            })
            .collect();
        let summary = DatasetSummary {
            n_rows,
            n_cols: columns.len(),
            columns,
        };
        (summary, MissingTable { n_rows, entries })
    }

    #[test]
    fn test_fifty_rows_is_too_few() {
        let (summary, missing) =
            create_inputs(50, vec![create_column("a", ColumnType::Numeric, 0, 50, 50)]);
        let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
        assert!(flags.too_few_rows);
        assert!((flags.quality_score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_sixty_percent_missing_is_too_many() {
        let (summary, missing) =
            create_inputs(200, vec![create_column("a", ColumnType::Numeric, 120, 80, 200)]);
        let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
        assert!(flags.too_many_missing);
        assert!(!flags.too_few_rows);
        assert!((flags.max_missing_share - 0.6).abs() < 1e-12);
        assert!((flags.quality_score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_constant_columns_flagged_and_penalized() {
        let (summary, missing) = create_inputs(
            150,
            vec![
                create_column("a", ColumnType::Numeric, 0, 150, 150),
                create_column("b", ColumnType::Categorical, 0, 1, 150),
                create_column("c", ColumnType::Categorical, 150, 0, 150),
            ],
        );
        let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
        assert!(flags.has_constant_columns);
        assert_eq!(flags.constant_columns, vec!["b", "c"]);
        // base 1 - 1.0 = 0, clamped at 0 after the penalty
        assert_eq!(flags.quality_score, 0.0);
    }

    #[test]
    fn test_clean_dataset_scores_one() {
        let (summary, missing) =
            create_inputs(500, vec![create_column("a", ColumnType::Numeric, 0, 400, 500)]);
        let assessment = QualityScorer::default().assess(&summary, &missing);
        assert_eq!(assessment.quality_score, 1.0);
        assert!(assessment.ok_for_model);
        assert_eq!(assessment.message, "Data looks suitable for modeling");
    }

    #[test]
    fn test_high_cardinality_is_informational() {
        let (summary, missing) =
            create_inputs(100, vec![create_column("email", ColumnType::Categorical, 0, 100, 100)]);
        let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
        assert!(flags.has_high_cardinality_categoricals);
        assert_eq!(flags.high_cardinality_columns, vec!["email"]);
        assert_eq!(flags.quality_score, 1.0);
    }

    #[test]
    fn test_assess_shape() {
        let scorer = QualityScorer::default();
        let assessment = scorer
            .assess_shape(&DatasetShape {
                n_rows: 50,
                n_cols: 3,
                max_missing_share: 0.1,
            })
            .unwrap();
        assert!(assessment.flags.too_few_rows);
        assert!(!assessment.flags.too_many_missing);
        assert!((assessment.quality_score - 0.7).abs() < 1e-12);
        assert!(assessment.ok_for_model);
        assert!(assessment.message.contains("fewer than 100 rows"));
    }

    #[test]
    fn test_assess_shape_rejects_bad_share() {
        let err = QualityScorer::default()
            .assess_shape(&DatasetShape {
                n_rows: 10,
                n_cols: 1,
                max_missing_share: 1.2,
            })
            .unwrap_err();
        assert!(matches!(err, EdaError::InvalidParameter(_)));
    }

    #[test]
    fn test_quality_score_clamped() {
        assert_eq!(quality_score(1.0, true, true), 0.0);
        assert_eq!(quality_score(0.0, false, false), 1.0);
    }
}
