use crate::models::{HealthRecord, Indicator};
use serde::{Deserialize, Serialize};

/// Summary statistics of one indicator over a group of records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Country name, or `None` for the summary over every record.
    pub country: Option<String>,
    pub indicator: Indicator,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

impl Summary {
    fn from_values(country: Option<String>, indicator: Indicator, mut vals: Vec<f64>) -> Self {
        vals.sort_by(|a, b| a.total_cmp(b));
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        Summary { country, indicator, count, min, max, mean, median }
    }
}

/// Statistics of `indicator` across all `records`.
pub fn overall_summary(records: &[HealthRecord], indicator: Indicator) -> Summary {
    let vals = records.iter().map(|r| r.value(indicator)).collect();
    Summary::from_values(None, indicator, vals)
}

/// Per-country statistics of `indicator`, in order of first appearance.
pub fn grouped_summary(records: &[HealthRecord], indicator: Indicator) -> Vec<Summary> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for r in records {
        let v = r.value(indicator);
        match groups.iter_mut().find(|(c, _)| *c == r.country) {
            Some((_, vals)) => vals.push(v),
            None => groups.push((r.country.clone(), vec![v])),
        }
    }
    groups
        .into_iter()
        .map(|(country, vals)| Summary::from_values(Some(country), indicator, vals))
        .collect()
}

/// Largest value of `indicator`, or `None` when `records` is empty.
pub fn max_value(records: &[HealthRecord], indicator: Indicator) -> Option<f64> {
    records
        .iter()
        .map(|r| r.value(indicator))
        .max_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn overall_over_sample() {
        let ds = Dataset::sample();
        let s = overall_summary(ds.records(), Indicator::InfantMortality);
        assert_eq!(s.count, 5);
        assert_eq!(s.min, Some(3.5));
        assert_eq!(s.max, Some(40.0));
        assert_eq!(s.median, Some(5.9));
    }

    #[test]
    fn empty_has_no_max() {
        assert_eq!(max_value(&[], Indicator::Diabetes), None);
        let s = overall_summary(&[], Indicator::Diabetes);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
    }
}
