//! The two-level weighted national rollup.
//!
//! Observed groups are assigned to named weight groups by an externally
//! supplied weight configuration. Within each weight group the per-group
//! savings mean and median are averaged weighted by kept-record count; the
//! weight-group averages are then combined by their configured weights into
//! one national mean and median per mode. Every zero-division and
//! missing-group case degrades to a skip or NaN, never an error: a weight
//! group nobody observed contributes nothing, and an observed group no
//! weight group references is deliberately ignored.

use crate::error::StatsError;
use crate::method::{EstimationMethod, Mode};
use crate::stats::SummaryStats;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One named weight group: a national weight and the observed-group labels
/// that belong to it.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightGroup {
    pub weight: f64,
    pub components: Vec<String>,
}

/// External weight configuration, one weight-group table per mode.
///
/// ```json
/// {
///   "heating": {
///     "climate_zone_1": { "weight": 0.4, "components": ["group_a", "group_b"] }
///   },
///   "cooling": { ... }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct WeightConfig {
    pub heating: BTreeMap<String, WeightGroup>,
    pub cooling: BTreeMap<String, WeightGroup>,
}

impl WeightConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StatsError::WeightsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn for_mode(&self, mode: Mode) -> &BTreeMap<String, WeightGroup> {
        match mode {
            Mode::Heating => &self.heating,
            Mode::Cooling => &self.cooling,
        }
    }
}

/// One national pseudo-group row: the weighted mean and median of the
/// configured method's fixed-baseline percent-savings metric.
#[derive(Debug, Clone)]
pub struct NationalRollup {
    pub mode: Mode,
    /// The savings column the rollup summarizes; names the output columns.
    pub savings_column: String,
    pub weighted_mean: f64,
    pub weighted_median: f64,
}

impl NationalRollup {
    /// The output label, `national_heating` or `national_cooling`.
    pub fn label(&self) -> String {
        format!("national_{}", self.mode)
    }
}

/// Rolls the per-group stats up to one national row per mode.
pub fn national_rollup(
    stats: &[SummaryStats],
    weights: &WeightConfig,
    method: EstimationMethod,
) -> Vec<NationalRollup> {
    Mode::BOTH
        .iter()
        .map(|&mode| rollup_mode(stats, weights.for_mode(mode), method, mode))
        .collect()
}

#[derive(Default)]
struct WeightGroupAccum {
    mean_numerator: f64,
    median_numerator: f64,
    count: f64,
}

fn rollup_mode(
    stats: &[SummaryStats],
    weight_groups: &BTreeMap<String, WeightGroup>,
    method: EstimationMethod,
    mode: Mode,
) -> NationalRollup {
    let savings_column = method.savings_column(mode);

    let component_to_group: HashMap<&str, &str> = weight_groups
        .iter()
        .flat_map(|(name, wg)| {
            wg.components
                .iter()
                .map(move |component| (component.as_str(), name.as_str()))
        })
        .collect();

    let mut accums: HashMap<&str, WeightGroupAccum> = HashMap::new();
    for group_stats in stats.iter().filter(|s| s.mode == mode) {
        // Groups no weight group references contribute nothing.
        let Some(&weight_group) = component_to_group.get(group_stats.group.as_str()) else {
            continue;
        };
        // Savings columns are always tracked for the row's own mode.
        let Some(savings) = group_stats.column(&savings_column) else {
            continue;
        };
        let count = group_stats.n_kept as f64;
        let accum = accums.entry(weight_group).or_default();
        accum.mean_numerator += savings.mean * count;
        accum.median_numerator += savings.q50() * count;
        accum.count += count;
    }

    let mut national_mean_numerator = 0.0;
    let mut national_median_numerator = 0.0;
    let mut national_denominator = 0.0;
    for (name, wg) in weight_groups {
        // A weight group with no contributing observed groups (or only
        // zero-count ones) is skipped entirely.
        let Some(accum) = accums.get(name.as_str()) else {
            continue;
        };
        if accum.count == 0.0 {
            continue;
        }
        national_mean_numerator += (accum.mean_numerator / accum.count) * wg.weight;
        national_median_numerator += (accum.median_numerator / accum.count) * wg.weight;
        national_denominator += wg.weight;
    }

    let (weighted_mean, weighted_median) = if national_denominator == 0.0 {
        (f64::NAN, f64::NAN)
    } else {
        (
            national_mean_numerator / national_denominator,
            national_median_numerator / national_denominator,
        )
    };

    NationalRollup {
        mode,
        savings_column,
        weighted_mean,
        weighted_median,
    }
}
