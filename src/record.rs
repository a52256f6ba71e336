//! Typed input rows for the statistics engine.
//!
//! A `MetricRecord` is one thermostat/core-day-set row of the upstream
//! metrics table. The engine never mutates records; every downstream stage
//! borrows them.

use crate::method::Mode;
use std::collections::HashMap;

/// One thermostat/core-day-set row. Numeric cells are stored by column name;
/// a column that was empty or unparseable upstream is simply absent, which is
/// how "null" is represented throughout the engine.
#[derive(Debug, Clone)]
pub struct MetricRecord {
    /// USPS ZIP code as a string. Leading zeros are significant.
    pub zipcode: String,
    /// Mode tag containing "heating" and/or "cooling".
    pub heating_or_cooling: String,
    values: HashMap<String, f64>,
}

impl MetricRecord {
    pub fn new(zipcode: impl Into<String>, heating_or_cooling: impl Into<String>) -> Self {
        MetricRecord {
            zipcode: zipcode.into(),
            heating_or_cooling: heating_or_cooling.into(),
            values: HashMap::new(),
        }
    }

    /// Sets a numeric cell. NaN is treated as null and not stored.
    pub fn insert(&mut self, column: impl Into<String>, value: f64) {
        if !value.is_nan() {
            self.values.insert(column.into(), value);
        }
    }

    /// Builder-style `insert` for test fixtures and callers assembling rows.
    pub fn with(mut self, column: impl Into<String>, value: f64) -> Self {
        self.insert(column, value);
        self
    }

    /// The value of a numeric cell, or `None` if the cell is null.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Whether this record belongs to the given mode's view.
    pub fn in_mode(&self, mode: Mode) -> bool {
        mode.matches(&self.heating_or_cooling)
    }
}

/// An immutable batch of metric records.
#[derive(Debug, Clone, Default)]
pub struct MetricTable {
    records: Vec<MetricRecord>,
}

impl MetricTable {
    pub fn new() -> Self {
        MetricTable::default()
    }

    pub fn from_records(records: Vec<MetricRecord>) -> Self {
        MetricTable { records }
    }

    /// Concatenates batch outputs into one table. Useful when upstream
    /// metrics were produced in batches.
    pub fn combine(tables: impl IntoIterator<Item = MetricTable>) -> Self {
        let records = tables.into_iter().flat_map(|t| t.records).collect();
        MetricTable { records }
    }

    pub fn push(&mut self, record: MetricRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a MetricTable {
    type Item = &'a MetricRecord;
    type IntoIter = std::slice::Iter<'a, MetricRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The subset of `records` belonging to the given mode's view. Substring
/// matching means the heating and cooling subsets need not be disjoint.
pub fn mode_subset<'a>(records: &[&'a MetricRecord], mode: Mode) -> Vec<&'a MetricRecord> {
    records.iter().copied().filter(|r| r.in_mode(mode)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_cells_are_null() {
        let record = MetricRecord::new("01234", "heating_ALL")
            .with("tau_dailyavgHTD", f64::NAN)
            .with("alpha_dailyavgHTD", 2.5);
        assert_eq!(record.value("tau_dailyavgHTD"), None);
        assert_eq!(record.value("alpha_dailyavgHTD"), Some(2.5));
        assert_eq!(record.value("never_set"), None);
    }

    #[test]
    fn dual_tagged_records_appear_in_both_subsets() {
        let heating = MetricRecord::new("01234", "heating_ALL");
        let cooling = MetricRecord::new("01234", "cooling_ALL");
        let dual = MetricRecord::new("01234", "heating_and_cooling");
        let rows = [&heating, &cooling, &dual];

        assert_eq!(mode_subset(&rows, Mode::Heating).len(), 2);
        assert_eq!(mode_subset(&rows, Mode::Cooling).len(), 2);
    }

    #[test]
    fn combine_preserves_all_rows() {
        let a = MetricTable::from_records(vec![MetricRecord::new("01234", "heating_ALL")]);
        let b = MetricTable::from_records(vec![
            MetricRecord::new("12345", "cooling_ALL"),
            MetricRecord::new("43210", "heating_ALL"),
        ]);
        let combined = MetricTable::combine([a, b]);
        assert_eq!(combined.len(), 3);
    }
}
