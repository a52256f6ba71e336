use certstat::io::{read_metrics_csvs, write_stats_csv};
use certstat::pipeline::{compute_summary_statistics_by_group, GroupSource};
use certstat::{StatsConfig, StatsError, WeightConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process;

/// Compute certification summary statistics from per-thermostat savings
/// metrics.
#[derive(Parser, Debug)]
#[command(name = "certstat", version, about)]
struct Cli {
    /// Metrics CSV file(s) produced by the upstream savings computation.
    #[arg(required = true)]
    metrics: Vec<PathBuf>,

    /// CSV mapping zip codes to group labels (columns: zipcode, group).
    #[arg(long)]
    groups: PathBuf,

    /// JSON weight configuration enabling the national rollup rows.
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Demand-estimation method whose fitted columns gate row inclusion.
    #[arg(long, default_value = "dailyavg")]
    method: String,

    /// Goodness-of-fit metric consulted by the row filter.
    #[arg(long, default_value = "CVRMSE")]
    error_metric: String,

    /// Strict upper bound for the error metric. Unset means no limit.
    #[arg(long)]
    error_max: Option<f64>,

    /// Confidence level for the statistical-power estimate.
    #[arg(long, default_value_t = 0.95)]
    confidence: f64,

    /// Target ratio of standard error to mean in the power estimate.
    #[arg(long, default_value_t = 0.05)]
    ratio: f64,

    /// Extra label appended to every group name, to disambiguate runs.
    #[arg(long)]
    label_suffix: Option<String>,

    /// Output CSV path.
    #[arg(short, long, default_value = "stats.csv")]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), StatsError> {
    let mut config = StatsConfig::from_names(&cli.method, &cli.error_metric)?;
    if let Some(error_max) = cli.error_max {
        config.error_max = error_max;
    }
    config.confidence = cli.confidence;
    config.ratio = cli.ratio;

    let table = read_metrics_csvs(&cli.metrics)?;
    log::info!(
        "loaded {} metric records from {} file(s)",
        table.len(),
        cli.metrics.len()
    );

    let mut spec = certstat::GroupSpec::from_csv(&cli.groups)?;
    if let Some(suffix) = cli.label_suffix {
        spec = spec.with_label(suffix);
    }

    let weights = cli.weights.map(WeightConfig::from_path).transpose()?;

    let (records, diagnostics) = compute_summary_statistics_by_group(
        &table,
        Some(GroupSource::Spec(spec)),
        weights.as_ref(),
        &config,
    )?;
    if !diagnostics.is_empty() {
        log::info!("{} group/mode subsets had no data", diagnostics.len());
    }

    write_stats_csv(&cli.output, &records)?;
    log::info!("wrote {} rows to {}", records.len(), cli.output.display());
    Ok(())
}
