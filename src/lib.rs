//! # HR Risk ML - Employee Mental-Health Risk Assessment Engine
//!
//! This library assesses employee mental-health risk from periodic workplace
//! telemetry and classifies each employee into a risk bucket (bajo, medio,
//! alto) with a recommended action.
//!
//! ## Modules
//!
//! - `data` - Canonical feature schema, records, datasets and schema validation
//! - `features` - Feature-vector construction from records or sparse input
//! - `models` - Decision tree and bagged random forest classifiers
//! - `interpret` - Risk label to color/recommendation mapping
//! - `trend` - Month-by-label temporal aggregation
//! - `session` - Per-session context tying dataset, model and filters together

pub mod data;
pub mod error;
pub mod features;
pub mod interpret;
pub mod models;
pub mod session;
pub mod trend;

pub use data::{Dataset, EmployeeRecord, FeatureField, RawTable, RiskLabel};
pub use error::{Error, Result};
pub use features::FeatureVector;
pub use interpret::RiskGuidance;
pub use models::{RandomForest, TrainedModel};
pub use session::Session;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{validate, Dataset, EmployeeRecord, FeatureField, RawTable, RiskLabel};
    pub use crate::error::{Error, Result};
    pub use crate::features::{FeatureVector, DEFAULT_SLIDER_VALUE};
    pub use crate::interpret::{interpret, RiskGuidance};
    pub use crate::models::{
        Classifier, FittedClassifier, ForestConfig, RandomForest, TrainedModel, DEFAULT_SEED,
    };
    pub use crate::session::Session;
    pub use crate::trend::{monthly_trend, MonthBucket, TrendTable};
}
