//! CSV boundary: metrics input and the fixed-schema stats output.
//!
//! Reading is lenient about values and strict about structure: the identity
//! columns must exist, while any numeric cell that fails to parse is treated
//! as null rather than failing the file. Writing always emits the full fixed
//! header; cells with nothing to say are left empty.

use crate::columns;
use crate::error::StatsError;
use crate::pipeline::StatsRecord;
use crate::record::{MetricRecord, MetricTable};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// Reads one upstream metrics CSV into a table.
///
/// The `zipcode` and `heating_or_cooling` columns are required. Every other
/// column is read as a numeric cell; empty or unparseable cells become null.
pub fn read_metrics_csv(path: impl AsRef<Path>) -> Result<MetricTable, StatsError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let headers = reader.headers()?.clone();
    let zipcode_idx = required_column(&headers, "zipcode")?;
    let tag_idx = required_column(&headers, "heating_or_cooling")?;

    let mut table = MetricTable::new();
    for row in reader.records() {
        let row = row?;
        let zipcode = row.get(zipcode_idx).unwrap_or("").trim();
        let tag = row.get(tag_idx).unwrap_or("").trim();
        let mut record = MetricRecord::new(zipcode, tag);
        for (idx, cell) in row.iter().enumerate() {
            if idx == zipcode_idx || idx == tag_idx {
                continue;
            }
            if let Ok(value) = cell.trim().parse::<f64>() {
                record.insert(&headers[idx], value);
            }
        }
        table.push(record);
    }
    Ok(table)
}

/// Reads several metrics CSVs and concatenates them, for upstream runs that
/// produce one file per batch.
pub fn read_metrics_csvs<P: AsRef<Path>>(paths: &[P]) -> Result<MetricTable, StatsError> {
    let tables = paths
        .iter()
        .map(read_metrics_csv)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MetricTable::combine(tables))
}

/// Writes the stats rows to a CSV file with the fixed output header.
pub fn write_stats_csv(path: impl AsRef<Path>, records: &[StatsRecord]) -> Result<(), StatsError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_stats(file, records)
}

/// Writes the stats rows to any writer. Every row carries the full header;
/// columns a row has no value for (the other mode's blocks, the national
/// columns of group rows) stay empty, and NaN cells are written empty too.
pub fn write_stats<W: Write>(writer: W, records: &[StatsRecord]) -> Result<(), StatsError> {
    let header = columns::output_columns();
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&header)?;

    for record in records {
        let cells = row_cells(record);
        let row: Vec<&str> = header
            .iter()
            .map(|column| cells.get(column.as_str()).map(String::as_str).unwrap_or(""))
            .collect();
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn row_cells(record: &StatsRecord) -> HashMap<String, String> {
    let mut cells = HashMap::new();
    cells.insert("label".to_string(), record.label());

    match record {
        StatsRecord::Group(stats) => {
            cells.insert("sw_version".to_string(), stats.sw_version.clone());
            cells.insert(
                "n_thermostat_core_day_sets_total".to_string(),
                stats.n_total.to_string(),
            );
            cells.insert(
                "n_thermostat_core_day_sets_kept".to_string(),
                stats.n_kept.to_string(),
            );
            cells.insert(
                "n_thermostat_core_day_sets_discarded".to_string(),
                stats.n_discarded.to_string(),
            );
            if let Some(power) = float_cell(stats.n_enough_statistical_power) {
                cells.insert("n_enough_statistical_power".to_string(), power);
            }
            for (name, column) in stats.columns() {
                if let Some(mean) = float_cell(column.mean) {
                    cells.insert(format!("{name}_mean"), mean);
                }
                if let Some(sem) = float_cell(column.sem) {
                    cells.insert(format!("{name}_sem"), sem);
                }
                cells.insert(format!("{name}_n"), column.n.to_string());
                for (quantile, value) in columns::QUANTILES.iter().zip(column.deciles) {
                    if let Some(value) = float_cell(value) {
                        cells.insert(format!("{name}_q{quantile}"), value);
                    }
                }
            }
        }
        StatsRecord::National(rollup) => {
            let base = &rollup.savings_column;
            if let Some(mean) = float_cell(rollup.weighted_mean) {
                cells.insert(format!("{base}_mean_national_weighted_mean"), mean);
            }
            if let Some(median) = float_cell(rollup.weighted_median) {
                cells.insert(format!("{base}_q50_national_weighted_mean"), median);
            }
        }
    }
    cells
}

/// NaN has no CSV representation in this schema; it renders as an empty cell.
fn float_cell(value: f64) -> Option<String> {
    if value.is_nan() {
        None
    } else {
        Some(value.to_string())
    }
}

fn required_column(headers: &csv::StringRecord, name: &str) -> Result<usize, StatsError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| StatsError::ColumnNotFound(name.to_string()))
}
