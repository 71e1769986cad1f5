//! CSV / JSON serialization of the full dataset for download.

use crate::models::{HealthRecord, Indicator};
use anyhow::Result;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row: `country`, `Year`, then every indicator column name.
pub fn csv_header() -> Vec<&'static str> {
    let mut header = vec!["country", "Year"];
    header.extend(Indicator::ALL.iter().map(|i| i.column()));
    header
}

/// Neutralize cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Integer columns print as `85`, float columns always keep a decimal point (`40.0`).
fn format_cell(indicator: Indicator, v: f64) -> String {
    if indicator.is_integer_valued() {
        format!("{v:.0}")
    } else if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

/// Write records as CSV with header to any writer.
pub fn write_csv<W: Write>(records: &[HealthRecord], out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(out);
    wtr.write_record(csv_header())?;
    for r in records {
        let mut row: Vec<String> = Vec::with_capacity(8);
        row.push(sanitize_cell(&r.country).into_owned());
        row.push(r.year.to_string());
        row.extend(Indicator::ALL.iter().map(|i| format_cell(*i, r.value(*i))));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV bytes for a download response.
pub fn to_csv_bytes(records: &[HealthRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

/// Pretty JSON array of records.
pub fn to_json_bytes(records: &[HealthRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Save records as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[HealthRecord], path: P) -> Result<()> {
    let f = File::create(path)?;
    write_csv(records, f)
}

/// Save records as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[HealthRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    f.write_all(&to_json_bytes(records)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let ds = Dataset::sample();
        save_csv(ds.records(), &csvp).unwrap();
        save_json(ds.records(), &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn integer_and_float_columns_keep_their_shape() {
        let ds = Dataset::sample();
        let text = String::from_utf8(to_csv_bytes(ds.records()).unwrap()).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[1], "USA,2020,78.5,5.9,60,10.5,6.5,85");
        assert_eq!(rows[2], "Canada,2021,80.0,4.5,70,9.8,6.0,98");
    }

    #[test]
    fn cell_formatting() {
        assert_eq!(format_cell(Indicator::Diabetes, 5.0), "5.0");
        assert_eq!(format_cell(Indicator::Diabetes, 10.5), "10.5");
        assert_eq!(format_cell(Indicator::Vaccination, 96.0), "96");
    }

    #[test]
    fn sanitize_prefixes_formula_starters() {
        assert_eq!(sanitize_cell("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(sanitize_cell("Canada"), "Canada");
    }
}
