//! Markdown rendering of the EDA report.

use crate::config::ReportOptions;
use crate::types::{
    CorrelationMatrix, DatasetSummary, MissingTable, QualityAssessment, SummaryRow, TopCategories,
};

/// Everything that goes into `report.md`.
pub struct ReportContent<'a> {
    pub options: &'a ReportOptions,
    pub generated_at: String,
    pub summary: &'a DatasetSummary,
    pub rows: &'a [SummaryRow],
    pub missing: &'a MissingTable,
    pub assessment: &'a QualityAssessment,
    pub correlation: &'a CorrelationMatrix,
    pub top_categories: &'a TopCategories,
    /// `(column, file name)` of each rendered histogram.
    pub histograms: &'a [(String, String)],
    pub missing_matrix: Option<&'a str>,
    pub correlation_heatmap: Option<&'a str>,
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Escape text used in headings and image alt text.
fn escape_inline(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '[' | ']' | '|' | '#' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_float(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    }
}

fn fmt_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn histogram_section(histograms: &[(String, String)]) -> String {
    let mut out = String::new();
    for (column, file) in histograms {
        let label = escape_inline(column);
        out.push_str(&format!("### {}\n\n![Histogram of {}]({})\n\n", label, label, file));
    }
    out
}

/// Render a GitHub-flavored Markdown table.
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!(
        "|{}|\n",
        headers.iter().map(|_| " --- ").collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

fn summary_section(rows: &[SummaryRow]) -> String {
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.name.clone(),
                row.dtype.clone(),
                row.inferred_type.clone(),
                row.non_null.to_string(),
                row.missing.to_string(),
                fmt_share(row.missing_share),
                row.unique.to_string(),
                row.example.clone(),
                fmt_float(row.min),
                fmt_float(row.max),
                fmt_float(row.mean),
                fmt_float(row.std),
            ]
        })
        .collect();

    markdown_table(
        &[
            "column", "dtype", "type", "non_null", "missing", "missing_share", "unique",
            "example", "min", "max", "mean", "std",
        ],
        &table_rows,
    )
}

fn missing_section(missing: &MissingTable) -> String {
    let rows: Vec<Vec<String>> = missing
        .entries
        .iter()
        .map(|e| vec![e.column.clone(), e.missing_count.to_string(), fmt_share(e.missing_share)])
        .collect();
    markdown_table(&["column", "missing_count", "missing_share"], &rows)
}

fn quality_section(content: &ReportContent<'_>) -> String {
    let assessment = content.assessment;
    let flags = &assessment.flags;
    let thresholds = &content.options.thresholds;
    let yes_no = |b: bool| (if b { "yes" } else { "no" }).to_string();

    let mut out = String::new();
    out.push_str(&format!("**Quality score:** {:.3}\n\n", assessment.quality_score));
    out.push_str(&format!(
        "**Ready for modeling:** {} ({})\n\n",
        yes_no(assessment.ok_for_model),
        assessment.message
    ));

    let rows = vec![
        vec![
            format!("too_few_rows (< {})", thresholds.min_rows),
            yes_no(flags.too_few_rows),
        ],
        vec![
            format!("too_many_missing (> {})", fmt_share(thresholds.max_missing_share)),
            yes_no(flags.too_many_missing),
        ],
        vec!["has_constant_columns".to_string(), yes_no(flags.has_constant_columns)],
        vec![
            "has_high_cardinality_categoricals".to_string(),
            yes_no(flags.has_high_cardinality_categoricals),
        ],
        vec!["max_missing_share".to_string(), fmt_share(flags.max_missing_share)],
    ];
    out.push_str(&markdown_table(&["flag", "value"], &rows));

    if !flags.constant_columns.is_empty() {
        out.push_str(&format!(
            "\nConstant columns: {}\n",
            flags.constant_columns.join(", ")
        ));
    }
    if !flags.high_cardinality_columns.is_empty() {
        out.push_str(&format!(
            "\nHigh-cardinality categorical columns: {}\n",
            flags.high_cardinality_columns.join(", ")
        ));
    }
    out
}

fn correlation_section(correlation: &CorrelationMatrix) -> String {
    let mut headers = vec![""];
    headers.extend(correlation.columns.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = correlation
        .columns
        .iter()
        .zip(correlation.values.iter())
        .map(|(name, values)| {
            let mut row = vec![name.clone()];
            row.extend(values.iter().map(|v| fmt_float(*v)));
            row
        })
        .collect();
    markdown_table(&headers, &rows)
}

fn top_categories_section(top: &TopCategories) -> String {
    let mut out = String::new();
    for column in &top.columns {
        out.push_str(&format!("### {}\n\n", escape_inline(&column.column)));
        let rows: Vec<Vec<String>> = column
            .values
            .iter()
            .map(|c| vec![c.value.clone(), c.count.to_string(), fmt_share(c.share)])
            .collect();
        out.push_str(&markdown_table(&["value", "count", "share"], &rows));
        out.push('\n');
    }
    out
}

/// Render the full report.
pub fn render_report(content: &ReportContent<'_>) -> String {
    let options = content.options;
    let summary = content.summary;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", options.title));
    md.push_str(&format!("_Generated at {}_\n\n", content.generated_at));

    md.push_str("## Parameters\n\n");
    let max_category_columns = options
        .max_category_columns
        .map(|n| n.to_string())
        .unwrap_or_else(|| "all".to_string());
    md.push_str(&markdown_table(
        &["parameter", "value"],
        &[
            vec!["max_hist_columns".to_string(), options.max_hist_columns.to_string()],
            vec!["top_k_categories".to_string(), options.top_k_categories.to_string()],
            vec!["max_category_columns".to_string(), max_category_columns],
            vec!["min_rows".to_string(), options.thresholds.min_rows.to_string()],
            vec![
                "max_missing_share".to_string(),
                options.thresholds.max_missing_share.to_string(),
            ],
        ],
    ));

    md.push_str("\n## Dataset overview\n\n");
    md.push_str(&format!("- Rows: {}\n", summary.n_rows));
    md.push_str(&format!("- Columns: {}\n", summary.n_cols));
    md.push_str(&format!("- Numeric columns: {}\n", summary.numeric_columns().len()));
    md.push_str(&format!(
        "- Categorical columns: {}\n\n",
        summary.categorical_columns().len()
    ));
    md.push_str(&summary_section(content.rows));

    md.push_str("\n## Missing values\n\n");
    md.push_str(&format!(
        "Total missing cells: {}\n\n",
        content.missing.total_missing()
    ));
    md.push_str(&missing_section(content.missing));
    if let Some(file) = content.missing_matrix {
        md.push_str(&format!(
            "\n![Missing matrix: one strip per column, darker = more missing]({})\n",
            file
        ));
    }

    md.push_str("\n## Data quality\n\n");
    md.push_str(&quality_section(content));

    md.push_str("\n## Correlation\n\n");
    if content.correlation.is_empty() {
        md.push_str("No numeric columns to correlate.\n");
    } else {
        md.push_str(&correlation_section(content.correlation));
        if let Some(file) = content.correlation_heatmap {
            md.push_str(&format!(
                "\n![Correlation heatmap: red = positive, blue = negative, grey = undefined]({})\n",
                file
            ));
        }
    }

    md.push_str(&format!(
        "\n## Top categories (k = {})\n\n",
        options.top_k_categories
    ));
    if content.top_categories.columns.is_empty() {
        md.push_str("No categorical columns.\n");
    } else {
        md.push_str(&top_categories_section(content.top_categories));
    }

    md.push_str("\n## Histograms\n\n");
    if content.histograms.is_empty() {
        md.push_str("No numeric columns to plot.\n");
    } else {
        md.push_str(&histogram_section(content.histograms));
    }

    md
}
