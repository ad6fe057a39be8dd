//! spc-check - evaluate control chart rules over a column of measurements.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_spc_rules::spc::{Analyzer, Report};
use u_spc_rules::AnalysisConfig;

/// Flag control chart rule violations in a measurement series
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Data file: one number per line, or CSV with a header row
    path: PathBuf,

    /// Column to read when the file has a header row
    #[arg(long, default_value = "Value")]
    column: String,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Near-limit band half-width in sigmas (overrides the config file)
    #[arg(long)]
    near_limit: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log zone and per-rule details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("info,u_spc_rules=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Parse measurements from plain or delimited text.
///
/// If the first non-blank line is a number the file is read as one value per
/// line; otherwise it is a header and `column` selects the field.
fn parse_values(content: &str, column: &str) -> Result<Vec<f64>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((first_no, first)) = lines.next() else {
        return Ok(Vec::new());
    };

    if let Ok(value) = first.parse::<f64>() {
        let mut values = vec![value];
        for (no, line) in lines {
            let value = line
                .parse::<f64>()
                .with_context(|| format!("line {no}: invalid number {line:?}"))?;
            values.push(value);
        }
        return Ok(values);
    }

    // Rows are counted from the header, which may follow blank lines.
    let skipped = (first_no - 1) as u64;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.trim_start().as_bytes());
    let headers = reader
        .headers()
        .with_context(|| format!("line {first_no}: invalid header"))?
        .clone();
    let Some(idx) = headers.iter().position(|name| name == column) else {
        bail!("line {first_no}: column {column:?} not found in header {first:?}");
    };

    reader
        .records()
        .map(|record| {
            let record = record.context("malformed CSV record")?;
            let no = record.position().map_or(0, |pos| pos.line()) + skipped;
            let cell = record
                .get(idx)
                .with_context(|| format!("line {no}: missing column {column:?}"))?;
            cell.parse::<f64>()
                .with_context(|| format!("line {no}: invalid number {cell:?}"))
        })
        .collect()
}

fn print_text(report: &Report) {
    let zones = report.boundaries();
    println!("===== Control Limits =====");
    println!("mean: {}", zones.mean());
    println!("sigma: {}", zones.sigma());
    for k in [3, 2, 1] {
        println!("+{k} sigma: {}", zones.upper(k));
    }
    for k in [1, 2, 3] {
        println!("-{k} sigma: {}", zones.lower(k));
    }

    println!("===== Detected Events =====");
    for v in report.violations() {
        println!("Rule: {}, Point: {}", v.rule_id(), v.start_index + 1);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(near_limit) = args.near_limit {
        config.near_limit_sigma = near_limit;
    }
    let analyzer = Analyzer::new(config)?;

    let content = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let data = parse_values(&content, &args.column)?;
    info!(path = %args.path.display(), points = data.len(), "measurements loaded");

    let report = analyzer.analyze(&data)?;
    info!(violations = report.violations().len(), "analysis complete");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    Ok(())
}
