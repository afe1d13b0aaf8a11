//! CLI entry point for the scholarly analysis engine.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use scholarly_analysis::{
    AnalysisConfig, AnalysisDetails, AnalysisEngine, AnalysisKind, AnalysisReport, AnalysisResult,
    Dataset, DatasetSummary, ReportBody, ReportWriter,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// CLI-compatible analysis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliAnalysis {
    /// Per-variable overview of the dataset
    Summary,
    /// Distribution statistics for numeric variables
    Descriptive,
    /// IQR-based outlier detection
    Anomaly,
    /// Pairwise Pearson correlation
    Correlation,
    /// Theme extraction from a UTF-8 text file
    Theme,
}

impl CliAnalysis {
    /// The engine analysis this command runs, `None` for the summary.
    fn kind(self) -> Option<AnalysisKind> {
        match self {
            CliAnalysis::Summary => None,
            CliAnalysis::Descriptive => Some(AnalysisKind::Descriptive),
            CliAnalysis::Anomaly => Some(AnalysisKind::Anomaly),
            CliAnalysis::Correlation => Some(AnalysisKind::Correlation),
            CliAnalysis::Theme => Some(AnalysisKind::Theme),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Research data analysis with methodological rigor warnings",
    long_about = "Runs descriptive, anomaly, correlation or theme analysis over a dataset \
                  and flags conditions under which the results should not be over-trusted.\n\n\
                  EXAMPLES:\n  \
                  # Overview of every variable\n  \
                  scholarly-analysis summary -i survey.csv\n\n  \
                  # Correlations as JSON\n  \
                  scholarly-analysis correlation -i survey.parquet --json\n\n  \
                  # Themes from interview notes, saving a report\n  \
                  scholarly-analysis theme -i interviews.txt --emit-report -o reports/"
)]
struct Args {
    /// Analysis to run
    #[arg(value_enum)]
    analysis: CliAnalysis,

    /// Input file (csv or parquet; plain text for `theme`)
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// JSON file with analysis configuration
    ///
    /// Missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum sample size before a sample-size warning is raised
    #[arg(long)]
    min_sample_size: Option<usize>,

    /// Absolute correlation a pair must exceed to be reported as strong
    #[arg(long)]
    strong_threshold: Option<f64>,

    /// Multiplier applied to the IQR for outlier fences
    #[arg(long)]
    iqr_multiplier: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_<analysis>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = load_config(&args)?;
    let engine = AnalysisEngine::new(config)?;

    let started = Instant::now();
    let body = match run_analysis(&engine, &args) {
        Ok(body) => body,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return Err(e);
        }
    };
    let report = AnalysisReport::new(&args.input, started.elapsed(), body);
    info!(
        "Finished {} in {}ms with {} rigor warning(s)",
        report.result.label(),
        report.duration_ms,
        report.warning_count()
    );

    handle_output(&report, &args)
}

/// Build the configuration from defaults, an optional JSON file, and
/// command-line overrides, in that order.
fn load_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(rows) = args.min_sample_size {
        config.rigor.min_sample_size = rows;
    }
    if let Some(threshold) = args.strong_threshold {
        config.strong_correlation_threshold = threshold;
    }
    if let Some(multiplier) = args.iqr_multiplier {
        config.iqr_multiplier = multiplier;
    }

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn run_analysis(engine: &AnalysisEngine, args: &Args) -> Result<ReportBody> {
    if args.analysis.kind().is_some_and(|kind| kind.is_textual()) {
        info!("Reading text from: {}", args.input);
        let bytes = std::fs::read(&args.input)?;
        return Ok(engine.extract_themes_from_bytes(&bytes)?.into());
    }

    info!("Loading dataset from: {}", args.input);
    let df = load_table(&args.input)?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    let dataset = Dataset::from_dataframe(&df)?;

    let body = match args.analysis.kind() {
        Some(kind) => engine.run_tabular(kind, &dataset)?.into(),
        None => engine.summarize(&dataset)?.into(),
    };
    Ok(body)
}

/// Handle output based on CLI flags.
///
/// Output behavior:
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Write JSON report to file
fn handle_output(report: &AnalysisReport, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let report_path = ReportWriter::new(&args.output).write_report_to_file(report, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable(report);
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Load a tabular file, dispatching on its extension.
fn load_table(path: &str) -> Result<DataFrame> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_csv_with_fallbacks(path),
        "parquet" => {
            let file = File::open(path)?;
            Ok(ParquetReader::new(file).finish()?)
        }
        other => Err(anyhow!("Unsupported file format: {}", other)),
    }
}

/// Load CSV with multiple fallback strategies
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Pre-clean content
    let content = std::fs::read_to_string(path)?;
    let cleaned = clean_csv_content(&content);

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(std::io::Cursor::new(cleaned))
        .finish()
        .map_err(|e| anyhow!("Failed to read {}: {}", path, e))
}

/// Drop blank lines and collapse doubled quotes.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a human-readable rendering of the report.
///
/// Uses `println!` intentionally: this is the primary CLI output and must be
/// visible regardless of log level.
fn print_human_readable(report: &AnalysisReport) {
    println!();
    println!("{}", "=".repeat(80));
    match &report.result {
        ReportBody::Analysis(result) => {
            println!("{} ANALYSIS", result.kind.as_str().to_uppercase());
            println!("{}", "=".repeat(80));
            println!();
            println!("Input: {} ({}ms)", report.input_file, report.duration_ms);
            println!();
            println!("{}", result.summary);
            println!();
            print_details(result);
            print_warnings(result);
        }
        ReportBody::Summary(summary) => {
            println!("DATASET SUMMARY");
            println!("{}", "=".repeat(80));
            println!();
            println!("Input: {} ({}ms)", report.input_file, report.duration_ms);
            println!();
            print_summary(summary);
        }
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save a JSON report");
    println!("{}", "=".repeat(80));
}

fn print_summary(summary: &DatasetSummary) {
    println!("Rows: {}  Columns: {}", summary.rows, summary.columns);
    println!();
    println!(
        "{:<20} {:<12} {:>8} {:>8} {:>10} {:>10}",
        "Column", "Kind", "Count", "Missing", "Mean", "Unique"
    );
    println!("{}", "-".repeat(72));
    for var in &summary.variables {
        println!(
            "{:<20} {:<12} {:>8} {:>8} {:>10} {:>10}",
            truncate_str(&var.name, 19),
            format!("{:?}", var.kind).to_lowercase(),
            var.count,
            var.missing,
            fmt_opt(var.mean),
            var.unique.map(|u| u.to_string()).unwrap_or_else(|| "-".into())
        );
    }
    println!();
}

fn print_details(result: &AnalysisResult) {
    match &result.details {
        AnalysisDetails::Descriptive(details) => {
            println!(
                "{:<20} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10}",
                "Variable", "Count", "Mean", "Std", "Min", "Median", "Max"
            );
            println!("{}", "-".repeat(83));
            for row in &details.statistics {
                println!(
                    "{:<20} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10}",
                    truncate_str(&row.variable, 19),
                    row.count,
                    fmt_opt(row.mean),
                    fmt_opt(row.std),
                    fmt_opt(row.min),
                    fmt_opt(row.median),
                    fmt_opt(row.max)
                );
            }
            println!();
        }
        AnalysisDetails::NoNumericData {
            categorical_columns,
        } => {
            println!("Columns: {}", categorical_columns.join(", "));
            println!();
        }
        AnalysisDetails::Anomaly(details) => {
            for record in &details.anomalies {
                println!(
                    "  {}: {} outliers ({:.1}%), bounds [{:.3}, {:.3}]",
                    record.variable,
                    record.outlier_count,
                    record.outlier_percentage,
                    record.lower_bound,
                    record.upper_bound
                );
            }
            if !details.anomalies.is_empty() {
                println!();
            }
        }
        AnalysisDetails::Correlation(details) => {
            for pair in &details.strong_correlations {
                println!("  {} ~ {}: r = {:.3}", pair.var1, pair.var2, pair.correlation);
            }
            if !details.strong_correlations.is_empty() {
                println!();
            }
        }
        AnalysisDetails::Theme(details) => {
            for theme in &details.themes {
                println!(
                    "  {:<15} {:>5}  e.g. {}",
                    theme.theme,
                    theme.frequency,
                    theme.examples.join(", ")
                );
            }
            if !details.common_words.is_empty() {
                let words: Vec<String> = details
                    .common_words
                    .iter()
                    .take(10)
                    .map(|w| format!("{} ({})", w.word, w.count))
                    .collect();
                println!();
                println!("Common words: {}", words.join(", "));
            }
            println!();
        }
        AnalysisDetails::Empty {} => {}
    }
}

fn print_warnings(result: &AnalysisResult) {
    if result.rigor_warnings.is_empty() {
        return;
    }
    println!("Rigor Warnings:");
    for warning in &result.rigor_warnings {
        println!(
            "  ! [{}] {}",
            format!("{:?}", warning.severity).to_lowercase(),
            warning.message
        );
    }
    println!();
}

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
