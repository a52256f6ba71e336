//! Per-group distributional summaries and the statistical-power estimate.
//!
//! For one group and one mode this module applies the row filter, then
//! computes mean, standard error of the mean, count, and deciles for every
//! tracked column over the kept rows, and estimates the sample size needed
//! for the configured statistical power. The result is an explicit,
//! versioned record rather than a loose key-value bag, so the output schema
//! is fixed at the type level.

use crate::columns::{self, QUANTILES};
use crate::filter::RowFilter;
use crate::method::{Mode, StatsConfig};
use crate::record::MetricRecord;
use statrs::distribution::{ContinuousCDF, Normal};

/// Derived statistics for one tracked column: the five/fourteen output slots
/// `mean`, `sem`, `n`, `q10`..`q90`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub sem: f64,
    pub n: u64,
    pub deciles: [f64; 9],
}

impl ColumnStats {
    /// The statistics of an empty column: NaN everywhere, zero count.
    pub fn empty() -> Self {
        ColumnStats {
            mean: f64::NAN,
            sem: f64::NAN,
            n: 0,
            deciles: [f64::NAN; 9],
        }
    }

    /// The median (50th percentile) slot.
    pub fn q50(&self) -> f64 {
        self.deciles[4]
    }
}

/// Summary statistics for one group and one mode. Produced once, never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    /// Group label, without the mode suffix.
    pub group: String,
    pub mode: Mode,
    /// Version stamp of the software that produced this row.
    pub sw_version: String,
    pub n_total: u64,
    pub n_kept: u64,
    pub n_discarded: u64,
    /// One entry per tracked column of this mode, in catalog order.
    column_slots: Vec<(&'static str, ColumnStats)>,
    /// Estimated sample size for the configured statistical power. May be
    /// NaN or infinite when the savings column gives it no footing.
    pub n_enough_statistical_power: f64,
}

impl SummaryStats {
    fn new(group: &str, mode: Mode, n_total: u64, n_kept: u64) -> Self {
        SummaryStats {
            group: group.to_string(),
            mode,
            sw_version: crate::VERSION.to_string(),
            n_total,
            n_kept,
            n_discarded: n_total - n_kept,
            column_slots: Vec::new(),
            n_enough_statistical_power: f64::NAN,
        }
    }

    /// The output label, `"{group}_{mode}"`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.group, self.mode)
    }

    /// Appends one column's derived fields. Slots keep insertion (catalog)
    /// order.
    fn push_column(&mut self, name: &'static str, stats: ColumnStats) {
        self.column_slots.push((name, stats));
    }

    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.column_slots
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, stats)| stats)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &ColumnStats)> {
        self.column_slots.iter().map(|(name, stats)| (*name, stats))
    }
}

/// Computes summary statistics for one mode of one group's records.
///
/// Returns `None` when the mode subset is empty; the caller reports that as
/// a diagnostic, never as an error.
pub fn summarize_mode(
    group: &str,
    mode: Mode,
    records: &[&MetricRecord],
    config: &StatsConfig,
) -> Option<SummaryStats> {
    let n_total = records.len();
    if n_total == 0 {
        return None;
    }

    let filter = RowFilter::new(config, mode);
    let (kept, _) = filter.apply(records);

    let mut stats = SummaryStats::new(group, mode, n_total as u64, kept.len() as u64);
    for &name in columns::tracked_columns(mode) {
        stats.push_column(name, column_stats(&column_values(&kept, name)));
    }

    let savings_column = config.method.savings_column(mode);
    stats.n_enough_statistical_power = statistical_power_estimate(
        stats.column(&savings_column),
        config.confidence,
        config.ratio,
    );

    Some(stats)
}

/// Collects the finite values of one column. Nulls are absent by
/// construction; infinities are clipped to null here.
fn column_values(records: &[&MetricRecord], column: &str) -> Vec<f64> {
    records
        .iter()
        .filter_map(|r| r.value(column))
        .filter(|v| v.is_finite())
        .collect()
}

/// Mean, population-SEM, count, and deciles of a finite-valued sample.
pub fn column_stats(values: &[f64]) -> ColumnStats {
    let n = values.len();
    if n == 0 {
        return ColumnStats::empty();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let sem = variance.sqrt() / (n as f64).sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let mut deciles = [f64::NAN; 9];
    for (slot, quantile) in deciles.iter_mut().zip(QUANTILES) {
        *slot = quantile_sorted(&sorted, quantile as f64 / 100.0);
    }

    ColumnStats {
        mean,
        sem,
        n: n as u64,
        deciles,
    }
}

/// The p-th quantile of pre-sorted data with inclusive linear interpolation
/// (the R-7 method). The caller guarantees `sorted` is non-empty and
/// non-decreasing.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        sorted[n - 1]
    } else {
        (1.0 - g) * sorted[j] + g * sorted[j + 1]
    }
}

/// Estimates the sample size needed so the standard error of the savings
/// mean falls within `ratio` of the mean at the given confidence level:
///
/// ```text
/// z        = Phi^-1(1 - (1 - confidence) / 2)
/// std      = sem * sqrt(n)
/// target   = mean * ratio
/// target_n = (std * z / target)^2
/// ```
///
/// Undefined inputs (no savings column, zero mean) surface as NaN or
/// infinity, never as an error.
fn statistical_power_estimate(savings: Option<&ColumnStats>, confidence: f64, ratio: f64) -> f64 {
    let Some(savings) = savings else {
        return f64::NAN;
    };
    let z = Normal::standard().inverse_cdf(1.0 - (1.0 - confidence) / 2.0);
    let std = savings.sem * (savings.n as f64).sqrt();
    let target_interval = savings.mean * ratio;
    (std * z / target_interval).powi(2)
}
