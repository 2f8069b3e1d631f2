//! Feature vector construction
//!
//! Projects a validated record, or a sparse name→value mapping from the
//! interactive input boundary, onto the fixed 14-element vector the model
//! consumes. Raw values flow through untouched; no scaling is applied, so
//! slider-scale inputs (0–10) and bulk-upload values share one feature
//! space. That mismatch is a documented property of the system, not
//! something to normalize away here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::{EmployeeRecord, FeatureField};
use crate::error::{Error, Result};

/// Default value for a feature the interactive path leaves unset
pub const DEFAULT_SLIDER_VALUE: f64 = 5.0;

/// An ordered numeric vector aligned to the canonical feature schema
///
/// Position i always corresponds to canonical feature i. The vector carries
/// the schema names it was built against so a model fitted on a different
/// ordering can refuse it instead of silently mis-predicting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
    feature_names: Vec<String>,
}

impl FeatureVector {
    /// Build from a validated employee record
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            values: record.features.to_vec(),
            feature_names: FeatureField::column_names(),
        }
    }

    /// Build from a sparse name→value mapping (interactive input path)
    ///
    /// Every canonical name missing from the map takes
    /// [`DEFAULT_SLIDER_VALUE`]. A name outside the canonical schema is
    /// rejected rather than dropped.
    pub fn from_sparse(input: &HashMap<String, f64>) -> Result<Self> {
        for name in input.keys() {
            if !FeatureField::ALL.iter().any(|f| f.column_name() == name) {
                return Err(Error::Parse(format!("unknown feature name {name:?}")));
            }
        }

        let values = FeatureField::ALL
            .iter()
            .map(|f| {
                input
                    .get(f.column_name())
                    .copied()
                    .unwrap_or(DEFAULT_SLIDER_VALUE)
            })
            .collect();

        Ok(Self {
            values,
            feature_names: FeatureField::column_names(),
        })
    }

    /// Build from explicit parts; lengths must agree
    pub fn from_parts(feature_names: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if feature_names.len() != values.len() {
            return Err(Error::Parse(format!(
                "feature vector has {} names but {} values",
                feature_names.len(),
                values.len()
            )));
        }
        Ok(Self {
            values,
            feature_names,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
