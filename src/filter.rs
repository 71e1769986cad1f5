//! Country and year-range selection over dataset rows.

use crate::models::{HealthRecord, YearRange};
use std::collections::BTreeSet;

/// Keep records whose country is selected and whose year lies in `range` (inclusive).
///
/// Output preserves input order. An empty country set yields an empty result.
pub fn filter_records(
    records: &[HealthRecord],
    countries: &BTreeSet<String>,
    range: YearRange,
) -> Vec<HealthRecord> {
    FilterQuery::new(countries.clone(), range).apply(records)
}

/// A reusable filter predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub countries: BTreeSet<String>,
    pub range: YearRange,
}

impl FilterQuery {
    pub fn new(countries: BTreeSet<String>, range: YearRange) -> Self {
        Self { countries, range }
    }

    pub fn matches(&self, record: &HealthRecord) -> bool {
        self.countries.contains(&record.country) && self.range.contains(record.year)
    }

    pub fn apply(&self, records: &[HealthRecord]) -> Vec<HealthRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_country_full_range() {
        let ds = Dataset::sample();
        let out = filter_records(ds.records(), &set(&["USA"]), YearRange::new(2020, 2024));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "USA");
        assert_eq!(out[0].year, 2020);
        assert_eq!(out[0].life_expectancy, 78.5);
    }

    #[test]
    fn empty_selection_yields_nothing() {
        let ds = Dataset::sample();
        let out = filter_records(ds.records(), &BTreeSet::new(), YearRange::new(2020, 2024));
        assert!(out.is_empty());
    }

    #[test]
    fn narrow_range_limits_rows() {
        let ds = Dataset::sample();
        let all: BTreeSet<String> = ds.countries().into_iter().map(String::from).collect();
        let out = filter_records(ds.records(), &all, YearRange::new(2021, 2022));
        let got: Vec<(&str, i32)> = out.iter().map(|r| (r.country.as_str(), r.year)).collect();
        assert_eq!(got, vec![("Canada", 2021), ("Germany", 2022)]);
    }
}
