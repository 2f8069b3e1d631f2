//! Error types for the risk assessment engine

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the engine
///
/// Every failure here is structural or data-quality; nothing is retryable
/// and nothing is recovered internally. The caller gets the error as-is.
#[derive(Error, Debug)]
pub enum Error {
    /// Required columns missing from an uploaded table
    #[error("dataset is missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Training requested on a dataset with no rows
    #[error("cannot train on an empty dataset")]
    EmptyTrainingSet,

    /// Inference requested before any training call
    #[error("no trained model available; train on a dataset first")]
    ModelNotTrained,

    /// Feature vector ordering does not match the ordering the model was fitted with
    #[error("feature ordering mismatch: model was fitted on [{expected}], got [{got}]")]
    FeatureOrder { expected: String, got: String },

    /// A risk label outside the defined set (bajo, medio, alto)
    #[error("unknown risk label: {0:?}")]
    UnknownLabel(String),

    /// A cell that should hold a numeric feature value failed to parse
    #[error("failed to parse value: {0}")]
    Parse(String),

    /// CSV read error at the ingestion boundary
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
