//! Closed enumerations for the string-selected knobs of the engine.
//!
//! The estimation method and error metric choose which column-name family the
//! row filter and the power estimate consult. Both are validated when the
//! configuration is built, so an unrecognized name fails the run before any
//! row is processed rather than deep inside the computation.

use crate::error::StatsError;
use std::fmt;
use std::str::FromStr;

/// Core-day-set mode. A record's `heating_or_cooling` tag is matched by
/// substring, so a tag containing both "heating" and "cooling" participates
/// in both views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Heating,
    Cooling,
}

impl Mode {
    pub const BOTH: [Mode; 2] = [Mode::Heating, Mode::Cooling];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Heating => "heating",
            Mode::Cooling => "cooling",
        }
    }

    /// Substring predicate over the `heating_or_cooling` tag.
    pub fn matches(&self, tag: &str) -> bool {
        tag.contains(self.as_str())
    }

    /// Fixed-baseline suffix: the 90th-percentile comfort temperature for
    /// heating, the 10th for cooling.
    pub fn baseline(&self) -> &'static str {
        match self {
            Mode::Heating => "baseline90",
            Mode::Cooling => "baseline10",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-thermostat demand-estimation method whose fitted columns gate
/// record inclusion and feed the statistical-power extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationMethod {
    DailyAvg,
    HourlyAvg,
    DeltaT,
}

impl EstimationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimationMethod::DailyAvg => "dailyavg",
            EstimationMethod::HourlyAvg => "hourlyavg",
            EstimationMethod::DeltaT => "deltaT",
        }
    }

    /// Column-name family for this method and mode, e.g. `dailyavgHTD`,
    /// `hourlyavgCTD`, `deltaT_heating`.
    pub fn family(&self, mode: Mode) -> String {
        match self {
            EstimationMethod::DeltaT => format!("deltaT_{}", mode.as_str()),
            _ => {
                let degree_days = match mode {
                    Mode::Heating => "HTD",
                    Mode::Cooling => "CTD",
                };
                format!("{}{}", self.as_str(), degree_days)
            }
        }
    }

    /// Fixed-baseline family, e.g. `dailyavgHTD_baseline90`.
    pub fn baseline_family(&self, mode: Mode) -> String {
        format!("{}_{}", self.family(mode), mode.baseline())
    }

    /// The fitted time-constant column consulted by the plausibility rule.
    pub fn tau_column(&self, mode: Mode) -> String {
        format!("tau_{}", self.family(mode))
    }

    /// The fixed-baseline percent-savings column used for the power estimate
    /// and the national rollup.
    pub fn savings_column(&self, mode: Mode) -> String {
        format!("percent_savings_{}", self.baseline_family(mode))
    }
}

impl FromStr for EstimationMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, StatsError> {
        match s {
            "dailyavg" => Ok(EstimationMethod::DailyAvg),
            "hourlyavg" => Ok(EstimationMethod::HourlyAvg),
            "deltaT" => Ok(EstimationMethod::DeltaT),
            other => Err(StatsError::UnknownMethod(other.to_string())),
        }
    }
}

/// Goodness-of-fit metric consulted by the row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMetric {
    Mse,
    Rmse,
    Cvrmse,
    Mae,
    Mape,
}

impl ErrorMetric {
    /// Column-name prefix for this metric.
    pub fn column_prefix(&self) -> &'static str {
        match self {
            ErrorMetric::Mse => "mean_sq_err",
            ErrorMetric::Rmse => "root_mean_sq_err",
            ErrorMetric::Cvrmse => "cv_root_mean_sq_err",
            ErrorMetric::Mae => "mean_abs_err",
            ErrorMetric::Mape => "mean_abs_pct_err",
        }
    }

    /// Full column name for this metric under the given method and mode,
    /// e.g. `cv_root_mean_sq_err_dailyavgHTD`.
    pub fn column(&self, method: EstimationMethod, mode: Mode) -> String {
        format!("{}_{}", self.column_prefix(), method.family(mode))
    }
}

impl FromStr for ErrorMetric {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, StatsError> {
        match s {
            "MSE" => Ok(ErrorMetric::Mse),
            "RMSE" => Ok(ErrorMetric::Rmse),
            "CVRMSE" => Ok(ErrorMetric::Cvrmse),
            "MAE" => Ok(ErrorMetric::Mae),
            "MAPE" => Ok(ErrorMetric::Mape),
            other => Err(StatsError::UnknownErrorMetric(other.to_string())),
        }
    }
}

/// Engine configuration. Built once up front; building it is the point at
/// which configuration errors surface.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub method: EstimationMethod,
    pub error_metric: ErrorMetric,
    /// Strict upper bound for the configured error metric. The default of
    /// `+inf` imposes no limit.
    pub error_max: f64,
    /// Confidence level for the statistical-power estimate.
    pub confidence: f64,
    /// Desired ratio of standard error to mean in the power estimate.
    pub ratio: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            method: EstimationMethod::DailyAvg,
            error_metric: ErrorMetric::Cvrmse,
            error_max: f64::INFINITY,
            confidence: 0.95,
            ratio: 0.05,
        }
    }
}

impl StatsConfig {
    /// Parses the method and metric names, rejecting unrecognized values
    /// before any data is touched.
    pub fn from_names(method: &str, error_metric: &str) -> Result<Self, StatsError> {
        Ok(StatsConfig {
            method: method.parse()?,
            error_metric: error_metric.parse()?,
            ..StatsConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_families_cover_all_modes() {
        assert_eq!(
            EstimationMethod::DailyAvg.family(Mode::Heating),
            "dailyavgHTD"
        );
        assert_eq!(
            EstimationMethod::HourlyAvg.family(Mode::Cooling),
            "hourlyavgCTD"
        );
        assert_eq!(
            EstimationMethod::DeltaT.family(Mode::Heating),
            "deltaT_heating"
        );
        assert_eq!(
            EstimationMethod::DeltaT.savings_column(Mode::Cooling),
            "percent_savings_deltaT_cooling_baseline10"
        );
        assert_eq!(
            EstimationMethod::DailyAvg.tau_column(Mode::Cooling),
            "tau_dailyavgCTD"
        );
    }

    #[test]
    fn error_metric_columns_match_schema() {
        assert_eq!(
            ErrorMetric::Cvrmse.column(EstimationMethod::DailyAvg, Mode::Heating),
            "cv_root_mean_sq_err_dailyavgHTD"
        );
        assert_eq!(
            ErrorMetric::Mape.column(EstimationMethod::DeltaT, Mode::Cooling),
            "mean_abs_pct_err_deltaT_cooling"
        );
    }

    #[test]
    fn unrecognized_names_are_configuration_errors() {
        assert!(matches!(
            "BOGUS".parse::<ErrorMetric>(),
            Err(StatsError::UnknownErrorMetric(_))
        ));
        assert!(matches!(
            "weekly".parse::<EstimationMethod>(),
            Err(StatsError::UnknownMethod(_))
        ));
        assert!(StatsConfig::from_names("dailyavg", "CVRMSE").is_ok());
    }

    #[test]
    fn mode_matching_is_substring_based() {
        assert!(Mode::Heating.matches("heating_ALL"));
        assert!(!Mode::Heating.matches("cooling_ALL"));
        // A dual tag participates in both views.
        assert!(Mode::Heating.matches("heating_and_cooling"));
        assert!(Mode::Cooling.matches("heating_and_cooling"));
    }
}
