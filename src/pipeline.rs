//! Orchestration: group iteration, per-group summaries, national rollup.
//!
//! Group-level computation is pure and independent across groups, so the
//! per-group stage runs on the rayon pool; the national rollup is the join
//! point that needs every per-group result. Data-sparsity problems are
//! collected into an explicit diagnostics list (and logged) instead of a
//! process-wide warning channel, so callers can inspect or discard them.

use crate::error::StatsError;
use crate::groups::{GroupSpec, ZipcodeReference};
use crate::method::{Mode, StatsConfig};
use crate::national::{national_rollup, NationalRollup, WeightConfig};
use crate::record::{mode_subset, MetricRecord, MetricTable};
use crate::stats::{summarize_mode, SummaryStats};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Label used for the partition of records whose zip code is absent from the
/// group mapping.
pub const UNGROUPED_LABEL: &str = "ungrouped";

/// A non-fatal data-quality finding. Diagnostics accompany results; they
/// never abort a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A group/mode subset contained no records, so no stats row was
    /// produced for it.
    EmptyGroup { label: String, mode: Mode },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyGroup { label, mode } => write!(
                f,
                "not enough data to compute summary statistics for {label} {mode}"
            ),
        }
    }
}

/// One row of the final result set.
#[derive(Debug, Clone)]
pub enum StatsRecord {
    Group(SummaryStats),
    National(NationalRollup),
}

impl StatsRecord {
    pub fn label(&self) -> String {
        match self {
            StatsRecord::Group(stats) => stats.label(),
            StatsRecord::National(rollup) => rollup.label(),
        }
    }
}

/// Where the zip-code -> group mapping comes from. Exactly one source must
/// be supplied; `None` at the call site is a configuration error.
#[derive(Debug)]
pub enum GroupSource {
    Spec(GroupSpec),
    CsvPath(PathBuf),
    Mapping(HashMap<String, String>),
}

impl GroupSource {
    fn into_spec(self) -> Result<GroupSpec, StatsError> {
        match self {
            GroupSource::Spec(spec) => Ok(spec),
            GroupSource::CsvPath(path) => GroupSpec::from_csv(path),
            GroupSource::Mapping(mapping) => Ok(GroupSpec::from_mapping(mapping)),
        }
    }
}

/// Computes summary statistics for one labeled set of records, split into
/// heating and cooling views. Empty views produce a diagnostic instead of a
/// row.
pub fn compute_summary_statistics(
    records: &[&MetricRecord],
    label: &str,
    config: &StatsConfig,
) -> (Vec<SummaryStats>, Vec<Diagnostic>) {
    let mut stats = Vec::new();
    let mut diagnostics = Vec::new();

    for mode in Mode::BOTH {
        let subset = mode_subset(records, mode);
        match summarize_mode(label, mode, &subset, config) {
            Some(row) => stats.push(row),
            None => {
                let diagnostic = Diagnostic::EmptyGroup {
                    label: label.to_string(),
                    mode,
                };
                log::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
            }
        }
    }
    (stats, diagnostics)
}

/// Computes summary statistics for every group yielded by the group source,
/// then applies the national rollup when a weight configuration is supplied.
///
/// The only failure modes are configuration errors (no group source, an
/// unreadable group table); all data-quality issues surface as diagnostics
/// plus NaN or omitted rows.
pub fn compute_summary_statistics_by_group(
    table: &MetricTable,
    source: Option<GroupSource>,
    weights: Option<&WeightConfig>,
    config: &StatsConfig,
) -> Result<(Vec<StatsRecord>, Vec<Diagnostic>), StatsError> {
    let spec = source.ok_or(StatsError::MissingGroupSource)?.into_spec()?;

    let partitions = spec.iter_groups(table);
    let per_group: Vec<(Vec<SummaryStats>, Vec<Diagnostic>)> = partitions
        .into_par_iter()
        .map(|partition| {
            let label = partition.name.as_deref().unwrap_or(UNGROUPED_LABEL);
            compute_summary_statistics(&partition.records, label, config)
        })
        .collect();

    let mut group_stats = Vec::new();
    let mut diagnostics = Vec::new();
    for (stats, mut partition_diagnostics) in per_group {
        group_stats.extend(stats);
        diagnostics.append(&mut partition_diagnostics);
    }

    let rollups = weights.map(|weights| national_rollup(&group_stats, weights, config.method));

    let mut records: Vec<StatsRecord> = group_stats.into_iter().map(StatsRecord::Group).collect();
    if let Some(rollups) = rollups {
        records.extend(rollups.into_iter().map(StatsRecord::National));
    }
    Ok((records, diagnostics))
}

/// Summary statistics grouped by zip code itself (each zip code known to the
/// injected reference index forms its own group).
pub fn compute_summary_statistics_by_zipcode(
    table: &MetricTable,
    reference: &dyn ZipcodeReference,
    config: &StatsConfig,
) -> Result<(Vec<StatsRecord>, Vec<Diagnostic>), StatsError> {
    let identity: HashMap<String, String> = reference
        .known_zipcodes()
        .into_iter()
        .map(|z| (z.clone(), z))
        .collect();
    compute_summary_statistics_by_group(table, Some(GroupSource::Mapping(identity)), None, config)
}

/// Summary statistics grouped by the weather station used to find each
/// thermostat's outdoor temperature data.
pub fn compute_summary_statistics_by_weather_station(
    table: &MetricTable,
    reference: &dyn ZipcodeReference,
    config: &StatsConfig,
) -> Result<(Vec<StatsRecord>, Vec<Diagnostic>), StatsError> {
    let stations: HashMap<String, String> = reference
        .known_zipcodes()
        .into_iter()
        .filter_map(|z| reference.station_for(&z).map(|station| (z, station)))
        .collect();
    compute_summary_statistics_by_group(table, Some(GroupSource::Mapping(stations)), None, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::InMemoryZipcodeReference;
    use approx::assert_relative_eq;

    fn heating_record(zipcode: &str, savings: f64) -> MetricRecord {
        MetricRecord::new(zipcode, "heating_ALL")
            .with("n_days_in_inputfile_date_range", 365.0)
            .with("n_days_insufficient_data", 2.0)
            .with("tau_dailyavgHTD", 5.0)
            .with("cv_root_mean_sq_err_dailyavgHTD", 0.4)
            .with("percent_savings_dailyavgHTD_baseline90", savings)
    }

    fn abc_mapping() -> HashMap<String, String> {
        HashMap::from([
            ("01234".to_string(), "group_a".to_string()),
            ("12345".to_string(), "group_a".to_string()),
            ("43210".to_string(), "group_b".to_string()),
        ])
    }

    #[test]
    fn missing_group_source_is_a_configuration_error() {
        let table = MetricTable::new();
        let result =
            compute_summary_statistics_by_group(&table, None, None, &StatsConfig::default());
        assert!(matches!(result, Err(StatsError::MissingGroupSource)));
    }

    #[test]
    fn grouped_run_with_weights_produces_national_rows() {
        let table = MetricTable::from_records(vec![
            heating_record("01234", 0.10),
            heating_record("12345", 0.20),
            heating_record("43210", 0.30),
        ]);
        let weights: WeightConfig = serde_json::from_str(
            r#"{
                "heating": {
                    "w1": { "weight": 1.0, "components": ["group_a"] },
                    "w2": { "weight": 1.0, "components": ["group_b"] }
                },
                "cooling": {}
            }"#,
        )
        .unwrap();

        let (records, diagnostics) = compute_summary_statistics_by_group(
            &table,
            Some(GroupSource::Mapping(abc_mapping())),
            Some(&weights),
            &StatsConfig::default(),
        )
        .unwrap();

        // Two heating group rows, two national rows; the cooling views are
        // empty and produce diagnostics instead.
        let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            vec![
                "group_a_heating",
                "group_b_heating",
                "national_heating",
                "national_cooling"
            ]
        );
        assert_eq!(diagnostics.len(), 2);

        let StatsRecord::National(heating) = &records[2] else {
            panic!("expected national row");
        };
        assert_relative_eq!(heating.weighted_mean, 0.225, epsilon = 1e-12);
        let StatsRecord::National(cooling) = &records[3] else {
            panic!("expected national row");
        };
        assert!(cooling.weighted_mean.is_nan());
    }

    #[test]
    fn empty_group_produces_exactly_one_diagnostic_per_mode() {
        let (stats, diagnostics) =
            compute_summary_statistics(&[], "group_a", &StatsConfig::default());
        assert!(stats.is_empty());
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::EmptyGroup {
                    label: "group_a".to_string(),
                    mode: Mode::Heating
                },
                Diagnostic::EmptyGroup {
                    label: "group_a".to_string(),
                    mode: Mode::Cooling
                },
            ]
        );
    }

    #[test]
    fn unmapped_zipcodes_land_in_the_ungrouped_partition() {
        let table = MetricTable::from_records(vec![
            heating_record("01234", 0.10),
            heating_record("99999", 0.50),
        ]);
        let (records, _) = compute_summary_statistics_by_group(
            &table,
            Some(GroupSource::Mapping(abc_mapping())),
            None,
            &StatsConfig::default(),
        )
        .unwrap();

        let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
        assert!(labels.contains(&"ungrouped_heating".to_string()));
    }

    #[test]
    fn by_zipcode_groups_each_zipcode_separately() {
        let reference = InMemoryZipcodeReference::new(HashMap::from([
            ("01234".to_string(), "STATION_A".to_string()),
            ("43210".to_string(), "STATION_A".to_string()),
        ]));
        let table = MetricTable::from_records(vec![
            heating_record("01234", 0.10),
            heating_record("43210", 0.30),
        ]);

        let (records, _) =
            compute_summary_statistics_by_zipcode(&table, &reference, &StatsConfig::default())
                .unwrap();
        let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["01234_heating", "43210_heating"]);
    }

    #[test]
    fn by_weather_station_merges_zipcodes_sharing_a_station() {
        let reference = InMemoryZipcodeReference::new(HashMap::from([
            ("01234".to_string(), "STATION_A".to_string()),
            ("43210".to_string(), "STATION_A".to_string()),
        ]));
        let table = MetricTable::from_records(vec![
            heating_record("01234", 0.10),
            heating_record("43210", 0.30),
        ]);

        let (records, _) = compute_summary_statistics_by_weather_station(
            &table,
            &reference,
            &StatsConfig::default(),
        )
        .unwrap();
        let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["STATION_A_heating"]);

        let StatsRecord::Group(stats) = &records[0] else {
            panic!("expected group row");
        };
        assert_eq!(stats.n_total, 2);
    }
}
