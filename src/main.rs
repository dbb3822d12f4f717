use analytics::{AnalysisReport, AnalyticsEngine};
use analyzer::{Recommendation, RecommendationSynthesizer};
use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::{Config, load_config_or_default};
use core_types::{FiscalYear, Metric, MetricTable, MetricValue};
use serde::Serialize;
use statements::{FinancialStatements, StatementDocument};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the credit analysis tool.
fn main() -> Result<()> {
    // A missing .env file is fine; RUST_LOG may come from the real environment.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Execute the appropriate command; a failure is reported once, by anyhow.
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &config),
        Commands::Sample(args) => handle_sample(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Small-business credit analysis: UCA cash flow, EBITDA, debt service coverage
/// and financial ratios, ending in a lending recommendation.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Built-in thresholds apply if it is absent.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze financial statements loaded from a JSON file.
    Analyze(AnalyzeArgs),
    /// Analyze a generated demonstration business.
    Sample(SampleArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The statement document to analyze.
    #[arg(long)]
    input: PathBuf,

    /// Write the full report and recommendation as JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct SampleArgs {
    /// Number of fiscal years to generate.
    #[arg(long, default_value_t = 3)]
    years: usize,

    /// Label of the most recent fiscal year (defaults to the current calendar year).
    #[arg(long)]
    latest_year: Option<i32>,

    /// Write the generated statements, report and recommendation as JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,
}

/// The JSON document written by `--output`.
#[derive(Serialize)]
struct AnalysisExport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    statements: Option<StatementDocument>,
    report: &'a AnalysisReport,
    recommendation: &'a Recommendation,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let statements = statements::load_from_json(&args.input)
        .with_context(|| format!("Failed to load statements from {}", args.input.display()))?;

    let (report, recommendation) = run_analysis(&statements, config)?;
    print_analysis(&report, &recommendation, config.display.decimal_places);

    if let Some(path) = args.output {
        let export = AnalysisExport {
            statements: None,
            report: &report,
            recommendation: &recommendation,
        };
        write_json(&path, &export)?;
    }
    Ok(())
}

fn handle_sample(args: SampleArgs, config: &Config) -> Result<()> {
    let latest_year = args
        .latest_year
        .unwrap_or_else(|| chrono::Local::now().year());
    let statements = statements::sample_statements(args.years, latest_year)
        .context("Failed to generate sample statements")?;
    tracing::info!(
        years = args.years,
        latest_year,
        "Generated sample statements for a demonstration business."
    );

    let (report, recommendation) = run_analysis(&statements, config)?;
    print_analysis(&report, &recommendation, config.display.decimal_places);

    if let Some(path) = args.output {
        let export = AnalysisExport {
            statements: Some(StatementDocument::from_statements(&statements)),
            report: &report,
            recommendation: &recommendation,
        };
        write_json(&path, &export)?;
    }
    Ok(())
}

fn run_analysis(
    statements: &FinancialStatements,
    config: &Config,
) -> Result<(AnalysisReport, Recommendation)> {
    let report = AnalyticsEngine::new()
        .run(statements)
        .context("Failed to calculate credit metrics")?;
    let recommendation = RecommendationSynthesizer::new(config.recommendation.clone())
        .synthesize(&report)
        .context("Failed to synthesize a recommendation")?;
    Ok((report, recommendation))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize the report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Report written.");
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn print_analysis(report: &AnalysisReport, recommendation: &Recommendation, decimal_places: u32) {
    println!("Years analyzed: {}", join_years(&report.fiscal_years));

    print_metric_table("UCA Cash Flow Analysis", &report.uca, decimal_places);
    print_metric_table("EBITDA Analysis", &report.ebitda, decimal_places);
    print_metric_table("Debt Service Coverage Analysis", &report.coverage, decimal_places);
    print_metric_table("Financial Ratio Analysis", &report.ratios, decimal_places);

    let mut summary = new_table(&report.fiscal_years);
    for key_metric in report.key_metrics() {
        summary.add_row(metric_row(key_metric.label, &key_metric.values, decimal_places));
    }
    println!("\nKey Metrics Summary\n{summary}");

    println!("\nCredit Assessment ({})", recommendation.fiscal_year);
    for line in &recommendation.commentary {
        println!("  {line}");
    }
    println!("\nRecommendation: {}", recommendation.recommendation);
}

fn print_metric_table<M: Metric>(title: &str, table: &MetricTable<M>, decimal_places: u32) {
    let mut rendered = new_table(table.fiscal_years());
    for (metric, values) in table.rows() {
        rendered.add_row(metric_row(metric.label(), &values, decimal_places));
    }
    println!("\n{title}\n{rendered}");
}

fn new_table(fiscal_years: &[FiscalYear]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Metric")];
    header.extend(fiscal_years.iter().map(|year| Cell::new(year)));
    table.set_header(header);
    table
}

fn metric_row(label: &str, values: &[Option<MetricValue>], decimal_places: u32) -> Vec<Cell> {
    let mut row = vec![Cell::new(label)];
    row.extend(values.iter().map(|value| {
        Cell::new(format_value(*value, decimal_places)).set_alignment(CellAlignment::Right)
    }));
    row
}

/// `Infinite` renders as `∞`; an absent cell as `-`.
fn format_value(value: Option<MetricValue>, decimal_places: u32) -> String {
    match value {
        Some(value) => format!("{:.*}", decimal_places as usize, value),
        None => "-".to_string(),
    }
}

fn join_years(years: &[FiscalYear]) -> String {
    years
        .iter()
        .map(FiscalYear::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
