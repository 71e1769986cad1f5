//! The fixed in-memory table behind the dashboard.

use crate::models::{HealthRecord, YearRange};

/// Immutable table of health records, created fresh at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<HealthRecord>,
}

impl Dataset {
    pub fn new(records: Vec<HealthRecord>) -> Self {
        Self { records }
    }

    /// The five-country sample: one record per country, each tied to a distinct year.
    pub fn sample() -> Self {
        let rows: [(&str, i32, f64, f64, f64, f64, f64, f64); 5] = [
            ("USA", 2020, 78.5, 5.9, 60.0, 10.5, 6.5, 85.0),
            ("Canada", 2021, 80.0, 4.5, 70.0, 9.8, 6.0, 98.0),
            ("Germany", 2022, 79.4, 3.5, 88.0, 9.0, 5.8, 80.0),
            ("Rwanda", 2023, 66.0, 30.0, 90.0, 6.5, 4.0, 95.0),
            ("Burundi", 2024, 61.5, 40.0, 85.0, 5.0, 3.5, 96.0),
        ];
        let records = rows
            .into_iter()
            .map(
                |(country, year, life, infant, access, diabetes, heart, vaccination)| HealthRecord {
                    country: country.to_string(),
                    year,
                    life_expectancy: life,
                    infant_mortality: infant,
                    healthcare_access: access,
                    diabetes,
                    heart_disease: heart,
                    vaccination,
                },
            )
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.records {
            if !out.contains(&r.country.as_str()) {
                out.push(r.country.as_str());
            }
        }
        out
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.records.iter().any(|r| r.country == country)
    }

    /// `[min(year), max(year)]`, or `None` for an empty table.
    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some(YearRange::new(min, max))
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_one_year_per_country() {
        let ds = Dataset::sample();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.countries(), vec!["USA", "Canada", "Germany", "Rwanda", "Burundi"]);
        assert_eq!(ds.year_bounds(), Some(YearRange::new(2020, 2024)));
        assert!(!ds.has_country("France"));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::new(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds(), None);
    }
}
