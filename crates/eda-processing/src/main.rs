//! CLI entry point for the EDA toolkit.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eda_processing::{
    LoadOptions, QualityThresholds, ReportGenerator, ReportOptions, load_csv, missing_table,
    summarize_dataset, type_counts,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "eda-cli",
    version,
    about = "Exploratory data analysis for CSV files",
    long_about = "Summarize CSV datasets and render EDA reports.\n\n\
                  EXAMPLES:\n  \
                  # Quick look at a dataset\n  \
                  eda-cli overview data/example.csv\n\n  \
                  # Semicolon-separated file in cp1251\n  \
                  eda-cli overview data.csv --sep ';' --encoding cp1251\n\n  \
                  # Full report with custom title\n  \
                  eda-cli report data/example.csv --out-dir reports --title \"Churn\""
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print dataset size and a per-column summary
    Overview {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Write CSV tables, charts and a Markdown report
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Path to the CSV file
    path: PathBuf,

    /// Column separator (use "\t" or "tab" for tabs)
    #[arg(long, default_value = ",")]
    sep: String,

    /// Text encoding label, e.g. utf-8, cp1251, latin1
    #[arg(long, default_value = "utf-8")]
    encoding: String,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Directory for report files
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,

    /// Maximum number of numeric columns to draw histograms for
    #[arg(long, default_value_t = 6)]
    max_hist_columns: usize,

    /// Number of most frequent values listed per categorical column
    #[arg(long, default_value_t = 5)]
    top_k_categories: usize,

    /// Report title
    #[arg(long, default_value = "EDA Report")]
    title: String,

    /// Limit the number of categorical columns in the top-categories section
    #[arg(long)]
    max_category_columns: Option<usize>,

    /// Datasets with fewer rows are flagged as too small
    #[arg(long, default_value_t = 100)]
    min_rows: usize,

    /// Columns missing more than this share are flagged (0.0 - 1.0)
    #[arg(long, default_value_t = 0.5)]
    max_missing_share: f64,
}

impl InputArgs {
    fn load(&self) -> Result<polars::prelude::DataFrame> {
        let options = LoadOptions::from_cli(&self.sep, &self.encoding)?;
        let df = load_csv(&self.path, &options)
            .with_context(|| format!("Failed to load {}", self.path.display()))?;
        Ok(df)
    }
}

impl ReportArgs {
    fn options(&self) -> Result<ReportOptions> {
        let thresholds = QualityThresholds::builder()
            .min_rows(self.min_rows)
            .max_missing_share(self.max_missing_share)
            .build()?;

        let mut builder = ReportOptions::builder()
            .out_dir(&self.out_dir)
            .title(&self.title)
            .max_hist_columns(self.max_hist_columns)
            .top_k_categories(self.top_k_categories)
            .thresholds(thresholds);
        if let Some(columns) = self.max_category_columns {
            builder = builder.max_category_columns(columns);
        }

        Ok(builder.build()?)
    }
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.quiet);
    debug!("{:?}", cli);

    match cli.command {
        Command::Overview { input } => run_overview(&input),
        Command::Report(args) => run_report(&args),
    }
}

/// Print the overview table.
///
/// Uses `println!` for the table itself so it is visible regardless of the
/// log level.
fn run_overview(input: &InputArgs) -> Result<()> {
    let df = input.load()?;
    let summary = summarize_dataset(&df)?;
    let missing = missing_table(&df)?;

    println!("File: {}", input.path.display());
    println!("Rows: {}", summary.n_rows);
    println!("Columns: {}", summary.n_cols);
    let counts: Vec<String> = type_counts(&summary)
        .into_iter()
        .map(|(t, n)| format!("{} {}", n, t))
        .collect();
    println!("Types: {}", counts.join(", "));
    println!("Missing cells: {}", missing.total_missing());
    println!();

    println!(
        "{:<24} {:<10} {:<12} {:>9} {:>9} {:>8} {:<20}",
        "Column", "Dtype", "Type", "Non-null", "Missing %", "Unique", "Example"
    );
    println!("{}", "-".repeat(98));

    for col in &summary.columns {
        println!(
            "{:<24} {:<10} {:<12} {:>9} {:>9.1} {:>8} {:<20}",
            truncate_str(&col.name, 23),
            truncate_str(&col.dtype, 9),
            col.inferred_type,
            col.non_missing,
            col.missing_share * 100.0,
            col.distinct,
            truncate_str(col.example.as_deref().unwrap_or(""), 20)
        );
    }

    Ok(())
}

fn run_report(args: &ReportArgs) -> Result<()> {
    let options = args.options()?;
    let df = args.input.load()?;
    info!("Dataset loaded: {:?}", df.shape());

    let artifacts = ReportGenerator::generate(&df, &options).context("Report generation failed")?;

    println!("Report written to {}", artifacts.out_dir.display());
    println!("Markdown: {}", artifacts.report_path.display());
    println!(
        "Quality score: {:.2} ({})",
        artifacts.assessment.quality_score, artifacts.assessment.message
    );
    Ok(())
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
