//! RowFilter: the three-rule gate deciding whether a record participates in
//! statistics.
//!
//! All three rules must pass. A null cell fails whichever rule consults it;
//! a record is never rejected with an error, only excluded.

use crate::method::{Mode, StatsConfig};
use crate::record::MetricRecord;

/// Maximum tolerated fraction of days with insufficient data.
const MAX_INSUFFICIENT_DATA_FRACTION: f64 = 0.05;

/// Physically plausible range for the fitted time constant tau. A fit whose
/// tau lands outside this range is considered an artifact of the model, not
/// a description of the building.
const TAU_PHYSICAL_RANGE: (f64, f64) = (-10.0, 50.0);

/// Record gate for one mode under one configuration. Column names are
/// resolved once at construction.
#[derive(Debug, Clone)]
pub struct RowFilter {
    tau_column: String,
    error_column: String,
    error_max: f64,
}

impl RowFilter {
    pub fn new(config: &StatsConfig, mode: Mode) -> Self {
        RowFilter {
            tau_column: config.method.tau_column(mode),
            error_column: config.error_metric.column(config.method, mode),
            error_max: config.error_max,
        }
    }

    /// Whether the record passes all three rules.
    pub fn accept(&self, record: &MetricRecord) -> bool {
        self.has_sufficient_data(record)
            && self.has_physical_tau(record)
            && self.has_good_enough_fit(record)
    }

    /// Data-sufficiency: fewer than 5% of days in the input date range may
    /// have insufficient data. A zero-day date range fails rather than
    /// dividing by zero.
    fn has_sufficient_data(&self, record: &MetricRecord) -> bool {
        let insufficient = record.value("n_days_insufficient_data");
        let range = record.value("n_days_in_inputfile_date_range");
        match (insufficient, range) {
            (Some(insufficient), Some(range)) if range != 0.0 => {
                insufficient / range < MAX_INSUFFICIENT_DATA_FRACTION
            }
            _ => false,
        }
    }

    /// Physical plausibility: tau for the configured method must lie in
    /// [-10, 50].
    fn has_physical_tau(&self, record: &MetricRecord) -> bool {
        match record.value(&self.tau_column) {
            Some(tau) => (TAU_PHYSICAL_RANGE.0..=TAU_PHYSICAL_RANGE.1).contains(&tau),
            None => false,
        }
    }

    /// Goodness-of-fit: the configured error metric must be strictly below
    /// the configured maximum.
    fn has_good_enough_fit(&self, record: &MetricRecord) -> bool {
        match record.value(&self.error_column) {
            Some(err) => err < self.error_max,
            None => false,
        }
    }

    /// Splits records into (kept, n_discarded).
    pub fn apply<'a>(&self, records: &[&'a MetricRecord]) -> (Vec<&'a MetricRecord>, usize) {
        let kept: Vec<&MetricRecord> = records
            .iter()
            .copied()
            .filter(|r| self.accept(r))
            .collect();
        let n_discarded = records.len() - kept.len();
        (kept, n_discarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::EstimationMethod;

    fn passing_record() -> MetricRecord {
        MetricRecord::new("01234", "heating_ALL")
            .with("n_days_in_inputfile_date_range", 365.0)
            .with("n_days_insufficient_data", 2.0)
            .with("tau_dailyavgHTD", 5.0)
            .with("cv_root_mean_sq_err_dailyavgHTD", 0.4)
    }

    fn filter() -> RowFilter {
        RowFilter::new(&StatsConfig::default(), Mode::Heating)
    }

    #[test]
    fn accepts_a_record_passing_all_rules() {
        assert!(filter().accept(&passing_record()));
    }

    #[test]
    fn zero_day_date_range_always_fails() {
        let record = MetricRecord::new("01234", "heating_ALL")
            .with("n_days_in_inputfile_date_range", 0.0)
            .with("n_days_insufficient_data", 0.0)
            .with("tau_dailyavgHTD", 5.0)
            .with("cv_root_mean_sq_err_dailyavgHTD", 0.4);
        assert!(!filter().accept(&record));
    }

    #[test]
    fn insufficient_data_fraction_is_a_strict_bound() {
        let boundary = MetricRecord::new("01234", "heating_ALL")
            .with("n_days_in_inputfile_date_range", 100.0)
            .with("n_days_insufficient_data", 5.0)
            .with("tau_dailyavgHTD", 5.0)
            .with("cv_root_mean_sq_err_dailyavgHTD", 0.4);
        assert!(!filter().accept(&boundary));

        let below = MetricRecord::new("01234", "heating_ALL")
            .with("n_days_in_inputfile_date_range", 100.0)
            .with("n_days_insufficient_data", 4.0)
            .with("tau_dailyavgHTD", 5.0)
            .with("cv_root_mean_sq_err_dailyavgHTD", 0.4);
        assert!(filter().accept(&below));
    }

    #[test]
    fn implausible_tau_fails() {
        for tau in [-10.5, 50.5, f64::INFINITY] {
            let record = MetricRecord::new("01234", "heating_ALL")
                .with("n_days_in_inputfile_date_range", 365.0)
                .with("n_days_insufficient_data", 0.0)
                .with("tau_dailyavgHTD", tau)
                .with("cv_root_mean_sq_err_dailyavgHTD", 0.4);
            assert!(!filter().accept(&record), "tau = {tau} should fail");
        }
        // Endpoints are inclusive.
        for tau in [-10.0, 50.0] {
            let record = MetricRecord::new("01234", "heating_ALL")
                .with("n_days_in_inputfile_date_range", 365.0)
                .with("n_days_insufficient_data", 0.0)
                .with("tau_dailyavgHTD", tau)
                .with("cv_root_mean_sq_err_dailyavgHTD", 0.4);
            assert!(filter().accept(&record), "tau = {tau} should pass");
        }
    }

    #[test]
    fn missing_tau_or_error_metric_fails() {
        let no_tau = MetricRecord::new("01234", "heating_ALL")
            .with("n_days_in_inputfile_date_range", 365.0)
            .with("n_days_insufficient_data", 0.0)
            .with("cv_root_mean_sq_err_dailyavgHTD", 0.4);
        assert!(!filter().accept(&no_tau));

        let no_err = MetricRecord::new("01234", "heating_ALL")
            .with("n_days_in_inputfile_date_range", 365.0)
            .with("n_days_insufficient_data", 0.0)
            .with("tau_dailyavgHTD", 5.0);
        let config = StatsConfig {
            error_max: 0.5,
            ..StatsConfig::default()
        };
        assert!(!RowFilter::new(&config, Mode::Heating).accept(&no_err));
    }

    #[test]
    fn error_metric_bound_is_strict() {
        let mut config = StatsConfig {
            error_max: 0.4,
            ..StatsConfig::default()
        };
        let filter = RowFilter::new(&config, Mode::Heating);
        assert!(!filter.accept(&passing_record()));

        config.error_max = 0.401;
        let filter = RowFilter::new(&config, Mode::Heating);
        assert!(filter.accept(&passing_record()));
    }

    #[test]
    fn filter_selects_configured_method_columns() {
        let config = StatsConfig {
            method: EstimationMethod::DeltaT,
            ..StatsConfig::default()
        };
        let filter = RowFilter::new(&config, Mode::Cooling);

        let record = MetricRecord::new("01234", "cooling_ALL")
            .with("n_days_in_inputfile_date_range", 365.0)
            .with("n_days_insufficient_data", 0.0)
            .with("tau_deltaT_cooling", 12.0)
            .with("cv_root_mean_sq_err_deltaT_cooling", 0.2)
            // Implausible tau under a method the filter is not configured for.
            .with("tau_dailyavgCTD", 500.0);
        assert!(filter.accept(&record));
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = [
            passing_record(),
            MetricRecord::new("12345", "heating_ALL"),
            passing_record(),
        ];
        let refs: Vec<&MetricRecord> = records.iter().collect();
        let filter = filter();
        let (once, discarded) = filter.apply(&refs);
        assert_eq!(discarded, 1);
        let (twice, discarded_again) = filter.apply(&once);
        assert_eq!(discarded_again, 0);
        assert_eq!(once.len(), twice.len());
    }
}
