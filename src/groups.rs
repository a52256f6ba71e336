//! GroupSpec: the raw-key -> group-label mapping and grouped iteration.
//!
//! Groupings come either from a two-column CSV (`zipcode`,`group`) or from an
//! in-memory mapping, e.g. one derived from an injected [`ZipcodeReference`].
//! Zip codes are strings end to end; parsing them as numbers would destroy
//! leading zeros.

use crate::error::StatsError;
use crate::record::{MetricRecord, MetricTable};
use itertools::Itertools;
use std::collections::HashMap;
use std::path::Path;

/// A read-only zip-code reference index supplied by a collaborator. The
/// engine never loads reference data itself.
pub trait ZipcodeReference {
    /// All zip codes known to the index.
    fn known_zipcodes(&self) -> Vec<String>;

    /// The weather station used for a zip code's outdoor temperature data.
    fn station_for(&self, zipcode: &str) -> Option<String>;
}

/// A reference index held entirely in memory, keyed zip code -> station.
#[derive(Debug, Clone, Default)]
pub struct InMemoryZipcodeReference {
    stations: HashMap<String, String>,
}

impl InMemoryZipcodeReference {
    pub fn new(stations: HashMap<String, String>) -> Self {
        InMemoryZipcodeReference { stations }
    }
}

impl ZipcodeReference for InMemoryZipcodeReference {
    fn known_zipcodes(&self) -> Vec<String> {
        self.stations.keys().cloned().collect()
    }

    fn station_for(&self, zipcode: &str) -> Option<String> {
        self.stations.get(zipcode).cloned()
    }
}

/// One partition yielded by [`GroupSpec::iter_groups`]. `name` is `None` for
/// the partition of records whose zip code is absent from the mapping.
#[derive(Debug)]
pub struct GroupPartition<'a> {
    pub name: Option<String>,
    pub records: Vec<&'a MetricRecord>,
}

/// Mapping from zip codes to group labels. Built once, read-only thereafter.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    mapping: HashMap<String, String>,
    label: Option<String>,
}

impl GroupSpec {
    /// Builds a spec from an in-memory zip code -> group mapping.
    pub fn from_mapping(mapping: HashMap<String, String>) -> Self {
        GroupSpec {
            mapping,
            label: None,
        }
    }

    /// Loads a spec from a CSV file with `zipcode` and `group` columns, e.g.
    ///
    /// ```text
    /// zipcode,group
    /// 01234,group_a
    /// 12345,group_a
    /// 43210,group_b
    /// ```
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();
        let zipcode_idx = column_index(&headers, "zipcode")?;
        let group_idx = column_index(&headers, "group")?;

        let mut mapping = HashMap::new();
        for row in reader.records() {
            let row = row?;
            let zipcode = row.get(zipcode_idx).unwrap_or("").trim();
            let group = row.get(group_idx).unwrap_or("").trim();
            if !zipcode.is_empty() {
                mapping.insert(zipcode.to_string(), group.to_string());
            }
        }
        Ok(GroupSpec::from_mapping(mapping))
    }

    /// Appends an extra label to every group name this spec yields, for cases
    /// where two grouping methods could produce ambiguous names.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The group label assigned to a zip code, before the extra label is
    /// applied.
    pub fn group_for(&self, zipcode: &str) -> Option<&str> {
        self.mapping.get(zipcode).map(String::as_str)
    }

    fn labeled(&self, group: &str) -> String {
        match &self.label {
            Some(label) => format!("{group}_{label}"),
            None => group.to_string(),
        }
    }

    /// Partitions a table by resolved group label. Records whose zip code is
    /// not in the mapping form one unnamed partition. Partitions are sorted
    /// by name, unnamed last, so the output order is deterministic; nothing
    /// downstream depends on the order.
    pub fn iter_groups<'a>(&self, table: &'a MetricTable) -> Vec<GroupPartition<'a>> {
        let mut named: HashMap<&str, Vec<&MetricRecord>> = HashMap::new();
        let mut unnamed: Vec<&MetricRecord> = Vec::new();

        for record in table {
            match self.group_for(&record.zipcode) {
                Some(group) => named.entry(group).or_default().push(record),
                None => unnamed.push(record),
            }
        }

        let mut partitions: Vec<GroupPartition<'a>> = named
            .into_iter()
            .map(|(group, records)| GroupPartition {
                name: Some(self.labeled(group)),
                records,
            })
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect();

        if !unnamed.is_empty() {
            partitions.push(GroupPartition {
                name: None,
                records: unnamed,
            });
        }
        partitions
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, StatsError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| StatsError::ColumnNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MetricRecord;

    fn spec_abc() -> GroupSpec {
        GroupSpec::from_mapping(HashMap::from([
            ("01234".to_string(), "group_a".to_string()),
            ("12345".to_string(), "group_a".to_string()),
            ("43210".to_string(), "group_b".to_string()),
        ]))
    }

    fn table(zipcodes: &[&str]) -> MetricTable {
        MetricTable::from_records(
            zipcodes
                .iter()
                .map(|z| MetricRecord::new(*z, "heating_ALL"))
                .collect(),
        )
    }

    #[test]
    fn partitions_by_resolved_group() {
        let spec = spec_abc();
        let table = table(&["01234", "12345", "43210"]);
        let partitions = spec.iter_groups(&table);

        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].name.as_deref(), Some("group_a"));
        assert_eq!(partitions[0].records.len(), 2);
        assert_eq!(partitions[1].name.as_deref(), Some("group_b"));
        assert_eq!(partitions[1].records.len(), 1);
    }

    #[test]
    fn unmapped_zipcodes_form_one_unnamed_partition() {
        let spec = spec_abc();
        let table = table(&["01234", "99999", "88888"]);
        let partitions = spec.iter_groups(&table);

        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[1].name, None);
        assert_eq!(partitions[1].records.len(), 2);
    }

    #[test]
    fn extra_label_disambiguates_group_names() {
        let spec = spec_abc().with_label("by_climate");
        let table = table(&["43210"]);
        let partitions = spec.iter_groups(&table);
        assert_eq!(partitions[0].name.as_deref(), Some("group_b_by_climate"));
    }

    #[test]
    fn csv_spec_keeps_leading_zeros() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zipcode,group").unwrap();
        writeln!(file, "01234,group_a").unwrap();
        writeln!(file, "43210,group_b").unwrap();
        file.flush().unwrap();

        let spec = GroupSpec::from_csv(file.path()).unwrap();
        assert_eq!(spec.group_for("01234"), Some("group_a"));
        assert_eq!(spec.group_for("1234"), None);
    }

    #[test]
    fn csv_spec_requires_both_columns() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zipcode,label").unwrap();
        writeln!(file, "01234,group_a").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            GroupSpec::from_csv(file.path()),
            Err(StatsError::ColumnNotFound(c)) if c == "group"
        ));
    }
}
