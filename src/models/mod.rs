//! Model module
//!
//! The engine only needs one capability from a classifier: fit a dataset,
//! then map feature vectors to risk labels. The [`Classifier`] and
//! [`FittedClassifier`] traits express that seam so the bagged-forest
//! implementation can be swapped without touching the rest of the core.

mod decision_tree;
mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use random_forest::{ForestConfig, RandomForest, RandomForestModel};

use crate::data::{Dataset, RiskLabel};
use crate::error::{Error, Result};
use crate::features::FeatureVector;

/// Base random seed for ensemble training
///
/// Explicit and overridable (via [`ForestConfig::seed`]) so training stays
/// reproducible: identical dataset + identical seed means identical model
/// behavior.
pub const DEFAULT_SEED: u64 = 42;

/// A trainable classifier
pub trait Classifier {
    /// Fit a new model to the dataset; every call produces a fresh model
    fn fit(&self, dataset: &Dataset) -> Result<TrainedModel>;
}

/// A frozen, fitted classifier
pub trait FittedClassifier: Send + Sync + std::fmt::Debug {
    /// Class index for one feature row in the fitted ordering
    fn predict_class(&self, features: &[f64]) -> usize;
}

/// A fitted classifier plus the exact feature ordering it was trained with
///
/// Created fresh on every training invocation, discarded when a new dataset
/// is trained on. Prediction is a pure function of the frozen state.
#[derive(Debug)]
pub struct TrainedModel {
    fitted: Box<dyn FittedClassifier>,
    feature_names: Vec<String>,
}

impl TrainedModel {
    pub fn new(fitted: Box<dyn FittedClassifier>, feature_names: Vec<String>) -> Self {
        Self {
            fitted,
            feature_names,
        }
    }

    /// Feature ordering the model was fitted with
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Predict the risk label for a feature vector
    ///
    /// The vector must carry the exact ordering the model was trained with;
    /// a divergent schema fails with [`Error::FeatureOrder`] instead of
    /// silently producing a nonsensical label.
    pub fn predict(&self, vector: &FeatureVector) -> Result<RiskLabel> {
        if vector.feature_names() != self.feature_names.as_slice() {
            return Err(Error::FeatureOrder {
                expected: self.feature_names.join(", "),
                got: vector.feature_names().join(", "),
            });
        }

        let class = self.fitted.predict_class(vector.values());
        Ok(RiskLabel::from_class_index(class))
    }
}
