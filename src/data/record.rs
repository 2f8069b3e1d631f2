//! Employee record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schema::{FeatureField, RiskLabel, N_FEATURES};

/// One validated row of employee telemetry
///
/// Feature values are stored in canonical schema order. `fecha` is `None`
/// when the uploaded timestamp failed to parse; such records stay in the
/// dataset but match no finite date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub features: [f64; N_FEATURES],
    pub riesgo: RiskLabel,
    pub fecha: Option<NaiveDate>,
}

impl EmployeeRecord {
    pub fn new(features: [f64; N_FEATURES], riesgo: RiskLabel, fecha: Option<NaiveDate>) -> Self {
        Self {
            features,
            riesgo,
            fecha,
        }
    }

    /// Value for a single schema field
    pub fn value(&self, field: FeatureField) -> f64 {
        self.features[field.index()]
    }

    /// True when the record's date falls inside the closed interval
    /// [start, end]; undated records match no range.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        match self.fecha {
            Some(d) => d >= start && d <= end,
            None => false,
        }
    }
}
