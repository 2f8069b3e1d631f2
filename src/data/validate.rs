//! Schema validation of uploaded tables
//!
//! Entry point for every upload: a raw table of named string columns comes
//! in, a normalized [`Dataset`] comes out. A missing required column is
//! fatal to the whole upload; an unparseable date only disqualifies that
//! record from date-range filtering.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use super::dataset::Dataset;
use super::record::EmployeeRecord;
use super::schema::{FeatureField, RiskLabel, DATE_COLUMN, LABEL_COLUMN, N_FEATURES};
use crate::error::{Error, Result};

/// Raw tabular data as supplied by the ingestion collaborator
///
/// Column names and cell values are untyped strings; nothing here has been
/// checked against the canonical schema yet.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read a table from a CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }
}

/// Date formats accepted for `fecha_registro`
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Validate a raw table against the canonical schema
///
/// Requires all 14 feature columns plus `riesgo` and `fecha_registro`.
/// Fails with [`Error::Schema`] listing every absent column; no partial
/// processing is attempted. Rows with an unparseable date are retained with
/// no date. A non-numeric feature cell or an out-of-set label is fatal.
pub fn validate(table: &RawTable) -> Result<Dataset> {
    let column_index: HashMap<&str, usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut missing: Vec<String> = FeatureField::ALL
        .iter()
        .map(|f| f.column_name())
        .chain([LABEL_COLUMN, DATE_COLUMN])
        .filter(|name| !column_index.contains_key(name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        missing.sort();
        return Err(Error::Schema { missing });
    }

    let label_idx = column_index[LABEL_COLUMN];
    let date_idx = column_index[DATE_COLUMN];
    let feature_idx: Vec<usize> = FeatureField::ALL
        .iter()
        .map(|f| column_index[f.column_name()])
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    let mut undated = 0usize;

    for (row_no, row) in table.rows.iter().enumerate() {
        let mut features = [0.0f64; N_FEATURES];
        for (slot, &col) in features.iter_mut().zip(&feature_idx) {
            let cell = row.get(col).map(|s| s.trim()).unwrap_or("");
            *slot = cell.parse::<f64>().map_err(|_| {
                Error::Parse(format!(
                    "row {}: non-numeric value {:?} in column {:?}",
                    row_no + 1,
                    cell,
                    table.headers[col]
                ))
            })?;
        }

        let label_cell = row.get(label_idx).map(|s| s.as_str()).unwrap_or("");
        let riesgo = RiskLabel::parse(label_cell)?;

        let date_cell = row.get(date_idx).map(|s| s.as_str()).unwrap_or("");
        let fecha = parse_date(date_cell);
        if fecha.is_none() {
            undated += 1;
            warn!(row = row_no + 1, value = date_cell, "unparseable fecha_registro, record excluded from date ranges");
        }

        records.push(EmployeeRecord::new(features, riesgo, fecha));
    }

    debug!(
        records = records.len(),
        undated, "validated uploaded table against canonical schema"
    );

    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_headers() -> Vec<String> {
        let mut headers = FeatureField::column_names();
        headers.push(LABEL_COLUMN.to_string());
        headers.push(DATE_COLUMN.to_string());
        headers
    }

    fn row(label: &str, date: &str) -> Vec<String> {
        let mut row: Vec<String> = (0..N_FEATURES).map(|i| (i as f64).to_string()).collect();
        row.push(label.to_string());
        row.push(date.to_string());
        row
    }

    #[test]
    fn accepts_complete_table() {
        let table = RawTable {
            headers: full_headers(),
            rows: vec![row("bajo", "2024-01-05"), row("alto", "2024-01-20")],
        };

        let dataset = validate(&table).unwrap();
        assert_eq!(dataset.n_samples(), 2);
        assert_eq!(dataset.records()[0].riesgo, RiskLabel::Bajo);
        assert_eq!(dataset.records()[0].features[3], 3.0);
        assert!(dataset.records()[1].fecha.is_some());
    }

    #[test]
    fn missing_columns_are_fatal_and_reported() {
        let mut headers = full_headers();
        headers.retain(|h| h != "nivel_burnout" && h != LABEL_COLUMN);
        let table = RawTable {
            headers,
            rows: vec![],
        };

        match validate(&table) {
            Err(Error::Schema { missing }) => {
                assert!(missing.contains(&"nivel_burnout".to_string()));
                assert!(missing.contains(&"riesgo".to_string()));
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_kept_but_undated() {
        let table = RawTable {
            headers: full_headers(),
            rows: vec![row("medio", "pronto")],
        };

        let dataset = validate(&table).unwrap();
        assert_eq!(dataset.n_samples(), 1);
        assert!(dataset.records()[0].fecha.is_none());
    }

    #[test]
    fn bad_label_is_fatal() {
        let table = RawTable {
            headers: full_headers(),
            rows: vec![row("extremo", "2024-01-05")],
        };
        assert!(matches!(validate(&table), Err(Error::UnknownLabel(_))));
    }

    #[test]
    fn non_numeric_feature_is_fatal() {
        let mut bad = row("bajo", "2024-01-05");
        bad[0] = "muchas".to_string();
        let table = RawTable {
            headers: full_headers(),
            rows: vec![bad],
        };
        assert!(matches!(validate(&table), Err(Error::Parse(_))));
    }

    #[test]
    fn alternate_date_formats_parse() {
        assert!(parse_date("2024-01-05").is_some());
        assert!(parse_date("2024-01-05 09:30:00").is_some());
        assert!(parse_date("05/01/2024").is_some());
        assert!(parse_date("January 5th").is_none());
    }
}
