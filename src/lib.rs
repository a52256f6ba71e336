//! Certification statistics for connected-thermostat savings metrics.
//!
//! Takes per-thermostat energy-savings metrics produced upstream, filters out
//! rows whose model fits are untrustworthy, and aggregates the survivors into
//! per-group summary statistics (mean, standard error, deciles, and a
//! statistical-power estimate per tracked column) plus a two-level weighted
//! national rollup of the savings metric. Results export to a fixed-schema
//! CSV suitable for certification submissions.
//!
//! The typical flow is [`io::read_metrics_csv`] ->
//! [`pipeline::compute_summary_statistics_by_group`] ->
//! [`io::write_stats_csv`]; each stage is also usable on its own.

pub mod columns;
pub mod error;
pub mod filter;
pub mod groups;
pub mod io;
pub mod method;
pub mod national;
pub mod pipeline;
pub mod record;
pub mod stats;

/// Version stamp written into every output row.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::StatsError;
pub use groups::{GroupSpec, ZipcodeReference};
pub use method::{ErrorMetric, EstimationMethod, Mode, StatsConfig};
pub use national::WeightConfig;
pub use pipeline::{
    compute_summary_statistics, compute_summary_statistics_by_group,
    compute_summary_statistics_by_weather_station, compute_summary_statistics_by_zipcode,
    Diagnostic, GroupSource, StatsRecord,
};
pub use record::{MetricRecord, MetricTable};
pub use stats::{ColumnStats, SummaryStats};
