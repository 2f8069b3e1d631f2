//! Data structures and validation module
//!
//! Provides the canonical feature schema, employee records, datasets and
//! the schema validator that stands between uploads and the model.

mod dataset;
mod record;
mod schema;
mod validate;

pub use dataset::Dataset;
pub use record::EmployeeRecord;
pub use schema::{FeatureField, RiskLabel, DATE_COLUMN, LABEL_COLUMN, N_CLASSES, N_FEATURES};
pub use validate::{validate, RawTable};
