//! ColumnCatalog: the tracked numeric columns and the fixed output schema.
//!
//! Column names are not configurable. The catalog enforces the exact schema
//! of the upstream metrics file and reproduces the output column order the
//! certification pipeline depends on; any reordering here is an
//! incompatibility, not a refactor.

use crate::method::Mode;

/// Decile points reported for every tracked column.
pub const QUANTILES: [u32; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Real- or integer-valued columns tracked for heating core-day sets.
pub static HEATING_COLUMNS: &[&str] = &[
    "n_days_in_inputfile_date_range",
    "n_days_both_heating_and_cooling",
    "n_days_insufficient_data",
    "n_core_heating_days",
    "baseline90_core_heating_comfort_temperature",
    "regional_average_baseline_heating_comfort_temperature",
    "percent_savings_deltaT_heating_baseline90",
    "avoided_daily_mean_core_day_runtime_deltaT_heating_baseline90",
    "avoided_total_core_day_runtime_deltaT_heating_baseline90",
    "baseline_daily_mean_core_day_runtime_deltaT_heating_baseline90",
    "baseline_total_core_day_runtime_deltaT_heating_baseline90",
    "_daily_mean_core_day_demand_baseline_deltaT_heating_baseline90",
    "percent_savings_deltaT_heating_baseline_regional",
    "avoided_daily_mean_core_day_runtime_deltaT_heating_baseline_regional",
    "avoided_total_core_day_runtime_deltaT_heating_baseline_regional",
    "baseline_daily_mean_core_day_runtime_deltaT_heating_baseline_regional",
    "baseline_total_core_day_runtime_deltaT_heating_baseline_regional",
    "_daily_mean_core_day_demand_baseline_deltaT_heating_baseline_regional",
    "mean_demand_deltaT_heating",
    "alpha_deltaT_heating",
    "tau_deltaT_heating",
    "mean_sq_err_deltaT_heating",
    "root_mean_sq_err_deltaT_heating",
    "cv_root_mean_sq_err_deltaT_heating",
    "mean_abs_err_deltaT_heating",
    "mean_abs_pct_err_deltaT_heating",
    "percent_savings_dailyavgHTD_baseline90",
    "avoided_daily_mean_core_day_runtime_dailyavgHTD_baseline90",
    "avoided_total_core_day_runtime_dailyavgHTD_baseline90",
    "baseline_daily_mean_core_day_runtime_dailyavgHTD_baseline90",
    "baseline_total_core_day_runtime_dailyavgHTD_baseline90",
    "_daily_mean_core_day_demand_baseline_dailyavgHTD_baseline90",
    "percent_savings_dailyavgHTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_dailyavgHTD_baseline_regional",
    "avoided_total_core_day_runtime_dailyavgHTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_dailyavgHTD_baseline_regional",
    "baseline_total_core_day_runtime_dailyavgHTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_dailyavgHTD_baseline_regional",
    "mean_demand_dailyavgHTD",
    "alpha_dailyavgHTD",
    "tau_dailyavgHTD",
    "mean_sq_err_dailyavgHTD",
    "root_mean_sq_err_dailyavgHTD",
    "cv_root_mean_sq_err_dailyavgHTD",
    "mean_abs_err_dailyavgHTD",
    "mean_abs_pct_err_dailyavgHTD",
    "percent_savings_hourlyavgHTD_baseline90",
    "avoided_daily_mean_core_day_runtime_hourlyavgHTD_baseline90",
    "avoided_total_core_day_runtime_hourlyavgHTD_baseline90",
    "baseline_daily_mean_core_day_runtime_hourlyavgHTD_baseline90",
    "baseline_total_core_day_runtime_hourlyavgHTD_baseline90",
    "_daily_mean_core_day_demand_baseline_hourlyavgHTD_baseline90",
    "percent_savings_hourlyavgHTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_hourlyavgHTD_baseline_regional",
    "avoided_total_core_day_runtime_hourlyavgHTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_hourlyavgHTD_baseline_regional",
    "baseline_total_core_day_runtime_hourlyavgHTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_hourlyavgHTD_baseline_regional",
    "mean_demand_hourlyavgHTD",
    "alpha_hourlyavgHTD",
    "tau_hourlyavgHTD",
    "mean_sq_err_hourlyavgHTD",
    "root_mean_sq_err_hourlyavgHTD",
    "cv_root_mean_sq_err_hourlyavgHTD",
    "mean_abs_err_hourlyavgHTD",
    "mean_abs_pct_err_hourlyavgHTD",
    "total_core_heating_runtime",
    "total_auxiliary_heating_core_day_runtime",
    "total_emergency_heating_core_day_runtime",
    "daily_mean_core_heating_runtime",
    "rhu_00F_to_05F",
    "rhu_05F_to_10F",
    "rhu_10F_to_15F",
    "rhu_15F_to_20F",
    "rhu_20F_to_25F",
    "rhu_25F_to_30F",
    "rhu_30F_to_35F",
    "rhu_35F_to_40F",
    "rhu_40F_to_45F",
    "rhu_45F_to_50F",
    "rhu_50F_to_55F",
    "rhu_55F_to_60F",
];

/// Real- or integer-valued columns tracked for cooling core-day sets.
pub static COOLING_COLUMNS: &[&str] = &[
    "n_days_in_inputfile_date_range",
    "n_days_both_heating_and_cooling",
    "n_days_insufficient_data",
    "n_core_cooling_days",
    "baseline10_core_cooling_comfort_temperature",
    "regional_average_baseline_cooling_comfort_temperature",
    "percent_savings_deltaT_cooling_baseline10",
    "avoided_daily_mean_core_day_runtime_deltaT_cooling_baseline10",
    "avoided_total_core_day_runtime_deltaT_cooling_baseline10",
    "baseline_daily_mean_core_day_runtime_deltaT_cooling_baseline10",
    "baseline_total_core_day_runtime_deltaT_cooling_baseline10",
    "_daily_mean_core_day_demand_baseline_deltaT_cooling_baseline10",
    "percent_savings_deltaT_cooling_baseline_regional",
    "avoided_daily_mean_core_day_runtime_deltaT_cooling_baseline_regional",
    "avoided_total_core_day_runtime_deltaT_cooling_baseline_regional",
    "baseline_daily_mean_core_day_runtime_deltaT_cooling_baseline_regional",
    "baseline_total_core_day_runtime_deltaT_cooling_baseline_regional",
    "_daily_mean_core_day_demand_baseline_deltaT_cooling_baseline_regional",
    "mean_demand_deltaT_cooling",
    "alpha_deltaT_cooling",
    "tau_deltaT_cooling",
    "mean_sq_err_deltaT_cooling",
    "root_mean_sq_err_deltaT_cooling",
    "cv_root_mean_sq_err_deltaT_cooling",
    "mean_abs_err_deltaT_cooling",
    "mean_abs_pct_err_deltaT_cooling",
    "percent_savings_dailyavgCTD_baseline10",
    "avoided_daily_mean_core_day_runtime_dailyavgCTD_baseline10",
    "avoided_total_core_day_runtime_dailyavgCTD_baseline10",
    "baseline_daily_mean_core_day_runtime_dailyavgCTD_baseline10",
    "baseline_total_core_day_runtime_dailyavgCTD_baseline10",
    "_daily_mean_core_day_demand_baseline_dailyavgCTD_baseline10",
    "percent_savings_dailyavgCTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_dailyavgCTD_baseline_regional",
    "avoided_total_core_day_runtime_dailyavgCTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_dailyavgCTD_baseline_regional",
    "baseline_total_core_day_runtime_dailyavgCTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_dailyavgCTD_baseline_regional",
    "mean_demand_dailyavgCTD",
    "alpha_dailyavgCTD",
    "tau_dailyavgCTD",
    "mean_sq_err_dailyavgCTD",
    "root_mean_sq_err_dailyavgCTD",
    "cv_root_mean_sq_err_dailyavgCTD",
    "mean_abs_err_dailyavgCTD",
    "mean_abs_pct_err_dailyavgCTD",
    "percent_savings_hourlyavgCTD_baseline10",
    "avoided_daily_mean_core_day_runtime_hourlyavgCTD_baseline10",
    "avoided_total_core_day_runtime_hourlyavgCTD_baseline10",
    "baseline_daily_mean_core_day_runtime_hourlyavgCTD_baseline10",
    "baseline_total_core_day_runtime_hourlyavgCTD_baseline10",
    "_daily_mean_core_day_demand_baseline_hourlyavgCTD_baseline10",
    "percent_savings_hourlyavgCTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_hourlyavgCTD_baseline_regional",
    "avoided_total_core_day_runtime_hourlyavgCTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_hourlyavgCTD_baseline_regional",
    "baseline_total_core_day_runtime_hourlyavgCTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_hourlyavgCTD_baseline_regional",
    "mean_demand_hourlyavgCTD",
    "alpha_hourlyavgCTD",
    "tau_hourlyavgCTD",
    "mean_sq_err_hourlyavgCTD",
    "root_mean_sq_err_hourlyavgCTD",
    "cv_root_mean_sq_err_hourlyavgCTD",
    "mean_abs_err_hourlyavgCTD",
    "mean_abs_pct_err_hourlyavgCTD",
    "total_core_cooling_runtime",
    "daily_mean_core_cooling_runtime",
];

/// Union of the heating and cooling column sets, in output order.
pub static ALL_COLUMNS: &[&str] = &[
    "n_days_in_inputfile_date_range",
    "n_days_both_heating_and_cooling",
    "n_days_insufficient_data",
    "n_core_cooling_days",
    "n_core_heating_days",
    "baseline10_core_cooling_comfort_temperature",
    "baseline90_core_heating_comfort_temperature",
    "regional_average_baseline_cooling_comfort_temperature",
    "regional_average_baseline_heating_comfort_temperature",
    "percent_savings_deltaT_cooling_baseline10",
    "avoided_daily_mean_core_day_runtime_deltaT_cooling_baseline10",
    "avoided_total_core_day_runtime_deltaT_cooling_baseline10",
    "baseline_daily_mean_core_day_runtime_deltaT_cooling_baseline10",
    "baseline_total_core_day_runtime_deltaT_cooling_baseline10",
    "_daily_mean_core_day_demand_baseline_deltaT_cooling_baseline10",
    "percent_savings_deltaT_cooling_baseline_regional",
    "avoided_daily_mean_core_day_runtime_deltaT_cooling_baseline_regional",
    "avoided_total_core_day_runtime_deltaT_cooling_baseline_regional",
    "baseline_daily_mean_core_day_runtime_deltaT_cooling_baseline_regional",
    "baseline_total_core_day_runtime_deltaT_cooling_baseline_regional",
    "_daily_mean_core_day_demand_baseline_deltaT_cooling_baseline_regional",
    "mean_demand_deltaT_cooling",
    "alpha_deltaT_cooling",
    "tau_deltaT_cooling",
    "mean_sq_err_deltaT_cooling",
    "root_mean_sq_err_deltaT_cooling",
    "cv_root_mean_sq_err_deltaT_cooling",
    "mean_abs_err_deltaT_cooling",
    "mean_abs_pct_err_deltaT_cooling",
    "percent_savings_dailyavgCTD_baseline10",
    "avoided_daily_mean_core_day_runtime_dailyavgCTD_baseline10",
    "avoided_total_core_day_runtime_dailyavgCTD_baseline10",
    "baseline_daily_mean_core_day_runtime_dailyavgCTD_baseline10",
    "baseline_total_core_day_runtime_dailyavgCTD_baseline10",
    "_daily_mean_core_day_demand_baseline_dailyavgCTD_baseline10",
    "percent_savings_dailyavgCTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_dailyavgCTD_baseline_regional",
    "avoided_total_core_day_runtime_dailyavgCTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_dailyavgCTD_baseline_regional",
    "baseline_total_core_day_runtime_dailyavgCTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_dailyavgCTD_baseline_regional",
    "mean_demand_dailyavgCTD",
    "alpha_dailyavgCTD",
    "tau_dailyavgCTD",
    "mean_sq_err_dailyavgCTD",
    "root_mean_sq_err_dailyavgCTD",
    "cv_root_mean_sq_err_dailyavgCTD",
    "mean_abs_err_dailyavgCTD",
    "mean_abs_pct_err_dailyavgCTD",
    "percent_savings_hourlyavgCTD_baseline10",
    "avoided_daily_mean_core_day_runtime_hourlyavgCTD_baseline10",
    "avoided_total_core_day_runtime_hourlyavgCTD_baseline10",
    "baseline_daily_mean_core_day_runtime_hourlyavgCTD_baseline10",
    "baseline_total_core_day_runtime_hourlyavgCTD_baseline10",
    "_daily_mean_core_day_demand_baseline_hourlyavgCTD_baseline10",
    "percent_savings_hourlyavgCTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_hourlyavgCTD_baseline_regional",
    "avoided_total_core_day_runtime_hourlyavgCTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_hourlyavgCTD_baseline_regional",
    "baseline_total_core_day_runtime_hourlyavgCTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_hourlyavgCTD_baseline_regional",
    "mean_demand_hourlyavgCTD",
    "alpha_hourlyavgCTD",
    "tau_hourlyavgCTD",
    "mean_sq_err_hourlyavgCTD",
    "root_mean_sq_err_hourlyavgCTD",
    "cv_root_mean_sq_err_hourlyavgCTD",
    "mean_abs_err_hourlyavgCTD",
    "mean_abs_pct_err_hourlyavgCTD",
    "percent_savings_deltaT_heating_baseline90",
    "avoided_daily_mean_core_day_runtime_deltaT_heating_baseline90",
    "avoided_total_core_day_runtime_deltaT_heating_baseline90",
    "baseline_daily_mean_core_day_runtime_deltaT_heating_baseline90",
    "baseline_total_core_day_runtime_deltaT_heating_baseline90",
    "_daily_mean_core_day_demand_baseline_deltaT_heating_baseline90",
    "percent_savings_deltaT_heating_baseline_regional",
    "avoided_daily_mean_core_day_runtime_deltaT_heating_baseline_regional",
    "avoided_total_core_day_runtime_deltaT_heating_baseline_regional",
    "baseline_daily_mean_core_day_runtime_deltaT_heating_baseline_regional",
    "baseline_total_core_day_runtime_deltaT_heating_baseline_regional",
    "_daily_mean_core_day_demand_baseline_deltaT_heating_baseline_regional",
    "mean_demand_deltaT_heating",
    "alpha_deltaT_heating",
    "tau_deltaT_heating",
    "mean_sq_err_deltaT_heating",
    "root_mean_sq_err_deltaT_heating",
    "cv_root_mean_sq_err_deltaT_heating",
    "mean_abs_err_deltaT_heating",
    "mean_abs_pct_err_deltaT_heating",
    "percent_savings_dailyavgHTD_baseline90",
    "avoided_daily_mean_core_day_runtime_dailyavgHTD_baseline90",
    "avoided_total_core_day_runtime_dailyavgHTD_baseline90",
    "baseline_daily_mean_core_day_runtime_dailyavgHTD_baseline90",
    "baseline_total_core_day_runtime_dailyavgHTD_baseline90",
    "_daily_mean_core_day_demand_baseline_dailyavgHTD_baseline90",
    "percent_savings_dailyavgHTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_dailyavgHTD_baseline_regional",
    "avoided_total_core_day_runtime_dailyavgHTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_dailyavgHTD_baseline_regional",
    "baseline_total_core_day_runtime_dailyavgHTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_dailyavgHTD_baseline_regional",
    "mean_demand_dailyavgHTD",
    "alpha_dailyavgHTD",
    "tau_dailyavgHTD",
    "mean_sq_err_dailyavgHTD",
    "root_mean_sq_err_dailyavgHTD",
    "cv_root_mean_sq_err_dailyavgHTD",
    "mean_abs_err_dailyavgHTD",
    "mean_abs_pct_err_dailyavgHTD",
    "percent_savings_hourlyavgHTD_baseline90",
    "avoided_daily_mean_core_day_runtime_hourlyavgHTD_baseline90",
    "avoided_total_core_day_runtime_hourlyavgHTD_baseline90",
    "baseline_daily_mean_core_day_runtime_hourlyavgHTD_baseline90",
    "baseline_total_core_day_runtime_hourlyavgHTD_baseline90",
    "_daily_mean_core_day_demand_baseline_hourlyavgHTD_baseline90",
    "percent_savings_hourlyavgHTD_baseline_regional",
    "avoided_daily_mean_core_day_runtime_hourlyavgHTD_baseline_regional",
    "avoided_total_core_day_runtime_hourlyavgHTD_baseline_regional",
    "baseline_daily_mean_core_day_runtime_hourlyavgHTD_baseline_regional",
    "baseline_total_core_day_runtime_hourlyavgHTD_baseline_regional",
    "_daily_mean_core_day_demand_baseline_hourlyavgHTD_baseline_regional",
    "mean_demand_hourlyavgHTD",
    "alpha_hourlyavgHTD",
    "tau_hourlyavgHTD",
    "mean_sq_err_hourlyavgHTD",
    "root_mean_sq_err_hourlyavgHTD",
    "cv_root_mean_sq_err_hourlyavgHTD",
    "mean_abs_err_hourlyavgHTD",
    "mean_abs_pct_err_hourlyavgHTD",
    "total_core_cooling_runtime",
    "total_core_heating_runtime",
    "total_auxiliary_heating_core_day_runtime",
    "total_emergency_heating_core_day_runtime",
    "daily_mean_core_cooling_runtime",
    "daily_mean_core_heating_runtime",
    "rhu_00F_to_05F",
    "rhu_05F_to_10F",
    "rhu_10F_to_15F",
    "rhu_15F_to_20F",
    "rhu_20F_to_25F",
    "rhu_25F_to_30F",
    "rhu_30F_to_35F",
    "rhu_35F_to_40F",
    "rhu_40F_to_45F",
    "rhu_45F_to_50F",
    "rhu_50F_to_55F",
    "rhu_55F_to_60F",
];

/// The twelve national-rollup columns appended after the per-column blocks.
pub static NATIONAL_COLUMNS: &[&str] = &[
    "percent_savings_dailyavgCTD_baseline10_mean_national_weighted_mean",
    "percent_savings_dailyavgHTD_baseline90_mean_national_weighted_mean",
    "percent_savings_deltaT_cooling_baseline10_mean_national_weighted_mean",
    "percent_savings_deltaT_heating_baseline90_mean_national_weighted_mean",
    "percent_savings_hourlyavgCTD_baseline10_mean_national_weighted_mean",
    "percent_savings_hourlyavgHTD_baseline90_mean_national_weighted_mean",
    "percent_savings_dailyavgCTD_baseline10_q50_national_weighted_mean",
    "percent_savings_dailyavgHTD_baseline90_q50_national_weighted_mean",
    "percent_savings_deltaT_cooling_baseline10_q50_national_weighted_mean",
    "percent_savings_deltaT_heating_baseline90_q50_national_weighted_mean",
    "percent_savings_hourlyavgCTD_baseline10_q50_national_weighted_mean",
    "percent_savings_hourlyavgHTD_baseline90_q50_national_weighted_mean",
];

/// The tracked columns for one mode.
pub fn tracked_columns(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Heating => HEATING_COLUMNS,
        Mode::Cooling => COOLING_COLUMNS,
    }
}

/// The full, fixed output header: general columns, then fourteen derived
/// fields per tracked column, then the national-rollup columns.
pub fn output_columns() -> Vec<String> {
    let mut columns: Vec<String> = vec![
        "label".to_string(),
        "sw_version".to_string(),
        "n_thermostat_core_day_sets_total".to_string(),
        "n_thermostat_core_day_sets_kept".to_string(),
        "n_thermostat_core_day_sets_discarded".to_string(),
        "n_enough_statistical_power".to_string(),
    ];
    for name in ALL_COLUMNS {
        columns.push(format!("{name}_mean"));
        columns.push(format!("{name}_sem"));
        columns.push(format!("{name}_n"));
        for quantile in QUANTILES {
            columns.push(format!("{name}_q{quantile}"));
        }
    }
    columns.extend(NATIONAL_COLUMNS.iter().map(|c| c.to_string()));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_set_is_the_union_of_both_modes() {
        use std::collections::HashSet;
        let all: HashSet<_> = ALL_COLUMNS.iter().collect();
        for name in HEATING_COLUMNS.iter().chain(COOLING_COLUMNS) {
            assert!(all.contains(name), "{name} missing from combined set");
        }
        assert_eq!(
            all.len(),
            HEATING_COLUMNS
                .iter()
                .chain(COOLING_COLUMNS)
                .collect::<HashSet<_>>()
                .len()
        );
    }

    #[test]
    fn output_header_shape_is_fixed() {
        let columns = output_columns();
        assert_eq!(columns[0], "label");
        assert_eq!(columns[5], "n_enough_statistical_power");
        assert_eq!(
            columns.len(),
            6 + ALL_COLUMNS.len() * (3 + QUANTILES.len()) + NATIONAL_COLUMNS.len()
        );
        // Per-column blocks are contiguous: mean, sem, n, q10..q90.
        assert_eq!(columns[6], format!("{}_mean", ALL_COLUMNS[0]));
        assert_eq!(columns[8], format!("{}_n", ALL_COLUMNS[0]));
        assert_eq!(columns[9], format!("{}_q10", ALL_COLUMNS[0]));
        assert_eq!(
            columns[columns.len() - 1],
            "percent_savings_hourlyavgHTD_baseline90_q50_national_weighted_mean"
        );
    }
}
