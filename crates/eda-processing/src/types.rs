use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Boolean,
    Datetime,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Basic descriptive statistics of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Physical polars dtype, e.g. `i64` or `str`.
    pub dtype: String,
    pub inferred_type: ColumnType,
    pub non_missing: usize,
    pub missing: usize,
    pub missing_share: f64,
    pub distinct: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Look up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// Names of the columns with the given inferred type, in dataset order.
    pub fn columns_of_type(&self, column_type: ColumnType) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|col| col.inferred_type == column_type)
            .map(|col| col.name.as_str())
            .collect()
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of_type(ColumnType::Numeric)
    }

    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns_of_type(ColumnType::Categorical)
    }
}

/// One row of the printable per-column table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub dtype: String,
    pub inferred_type: String,
    pub non_null: usize,
    pub missing: usize,
    pub missing_share: f64,
    pub unique: usize,
    pub example: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    pub missing_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingTable {
    pub n_rows: usize,
    pub entries: Vec<MissingEntry>,
}

impl MissingTable {
    /// Largest missing share across columns (0.0 for an empty table).
    pub fn max_missing_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.missing_share)
            .fold(0.0, f64::max)
    }

    /// Total number of missing cells.
    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|entry| entry.missing_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub too_few_rows: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
    pub max_missing_share: f64,
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<String>,
    pub quality_score: f64,
}

/// Quality flags plus the modeling verdict, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub message: String,
    pub flags: QualityFlags,
}

/// Pairwise Pearson correlations of the numeric columns.
///
/// `values[i][j]` is `None` when the coefficient is undefined (fewer than
/// two complete pairs, or a constant side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient for a pair of columns by name.
    pub fn get(&self, x: &str, y: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == x)?;
        let j = self.columns.iter().position(|c| c == y)?;
        self.values[i][j]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTopCategories {
    pub column: String,
    pub values: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopCategories {
    pub columns: Vec<ColumnTopCategories>,
}

impl TopCategories {
    pub fn get(&self, column: &str) -> Option<&[CategoryCount]> {
        self.columns
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.values.as_slice())
    }
}

static_assertions::assert_impl_all!(DatasetSummary: Send, Sync);
static_assertions::assert_impl_all!(QualityAssessment: Send, Sync);
