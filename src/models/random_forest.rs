//! Bagged random forest classifier
//!
//! The production classifier behind the engine: 100 decision trees trained
//! independently on bootstrap samples of the training set, majority-voting
//! at inference. Robust to heterogeneous, noisy telemetry features without
//! requiring feature scaling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::decision_tree::{DecisionTree, TreeConfig};
use super::{Classifier, FittedClassifier, TrainedModel, DEFAULT_SEED};
use crate::data::{Dataset, FeatureField, N_CLASSES};
use crate::error::{Error, Result};

/// Random forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Max features per split (sqrt of total if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Base random seed; reproducibility contract of the whole engine
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

/// Random forest trainer
///
/// Stateless between training calls: `fit` produces a new frozen
/// [`RandomForestModel`] bound to the dataset it was given.
#[derive(Debug, Clone, Default)]
pub struct RandomForest {
    config: ForestConfig,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    /// Train a forest on the dataset
    ///
    /// Fails with [`Error::EmptyTrainingSet`] when no rows are present.
    /// Identical dataset and seed produce identical tree structure.
    pub fn fit(&self, dataset: &Dataset) -> Result<RandomForestModel> {
        if dataset.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }

        let n_features = dataset.features(0).len();
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize);

        debug!(
            n_trees = self.config.n_trees,
            samples = dataset.n_samples(),
            max_features,
            seed = self.config.seed,
            "fitting random forest"
        );

        let trees: Vec<DecisionTree> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_config = TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: self.config.seed.wrapping_add(i as u64),
                };

                let mut tree = DecisionTree::new(tree_config);

                if self.config.bootstrap {
                    let sample = dataset.bootstrap_sample(self.config.seed.wrapping_add(i as u64));
                    tree.fit(&sample);
                } else {
                    tree.fit(dataset);
                }

                tree
            })
            .collect();

        info!(
            n_trees = trees.len(),
            samples = dataset.n_samples(),
            "random forest trained"
        );

        Ok(RandomForestModel { trees })
    }
}

impl Classifier for RandomForest {
    fn fit(&self, dataset: &Dataset) -> Result<TrainedModel> {
        let model = RandomForest::fit(self, dataset)?;
        Ok(TrainedModel::new(
            Box::new(model),
            FeatureField::column_names(),
        ))
    }
}

/// A fitted forest, frozen at training time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestModel {
    trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    /// Number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Per-class vote fractions for a feature row, in fixed label order
    pub fn vote_shares(&self, features: &[f64]) -> [f64; N_CLASSES] {
        let mut votes = [0usize; N_CLASSES];
        for tree in &self.trees {
            votes[tree.predict_one(features).min(N_CLASSES - 1)] += 1;
        }

        let total = self.trees.len().max(1) as f64;
        let mut shares = [0.0; N_CLASSES];
        for i in 0..N_CLASSES {
            shares[i] = votes[i] as f64 / total;
        }
        shares
    }
}

impl FittedClassifier for RandomForestModel {
    /// Majority vote over the frozen ensemble; ties break to the lowest
    /// class index, deterministically
    fn predict_class(&self, features: &[f64]) -> usize {
        let mut votes = [0usize; N_CLASSES];
        for tree in &self.trees {
            votes[tree.predict_one(features).min(N_CLASSES - 1)] += 1;
        }

        let mut best = 0;
        for (i, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EmployeeRecord, RiskLabel, N_FEATURES};
    use crate::features::FeatureVector;

    fn banded_dataset() -> Dataset {
        let mut records = Vec::new();
        for i in 0..60 {
            let x = i as f64 / 10.0;
            let riesgo = if x < 2.0 {
                RiskLabel::Bajo
            } else if x < 4.0 {
                RiskLabel::Medio
            } else {
                RiskLabel::Alto
            };
            let mut features = [5.0; N_FEATURES];
            features[0] = x;
            records.push(EmployeeRecord::new(features, riesgo, None));
        }
        Dataset::new(records)
    }

    #[test]
    fn empty_dataset_is_fatal() {
        let forest = RandomForest::default();
        assert!(matches!(
            forest.fit(&Dataset::default()),
            Err(Error::EmptyTrainingSet)
        ));
    }

    #[test]
    fn training_is_seed_deterministic() {
        let dataset = banded_dataset();
        let config = ForestConfig {
            n_trees: 15,
            ..Default::default()
        };

        let a = RandomForest::new(config.clone()).fit(&dataset).unwrap();
        let b = RandomForest::new(config).fit(&dataset).unwrap();

        for i in 0..dataset.n_samples() {
            assert_eq!(
                a.predict_class(dataset.features(i)),
                b.predict_class(dataset.features(i))
            );
        }
    }

    #[test]
    fn single_class_dataset_always_predicts_that_class() {
        let mut records = Vec::new();
        for i in 0..20 {
            let mut features = [0.0; N_FEATURES];
            features[0] = i as f64;
            records.push(EmployeeRecord::new(features, RiskLabel::Bajo, None));
        }
        let dataset = Dataset::new(records);

        let model = RandomForest::default().fit(&dataset).unwrap();
        assert_eq!(model.predict_class(&[5.0; N_FEATURES]), RiskLabel::Bajo.class_index());
        assert_eq!(model.predict_class(&[1000.0; N_FEATURES]), RiskLabel::Bajo.class_index());
    }

    #[test]
    fn vote_shares_sum_to_one() {
        let dataset = banded_dataset();
        let model = RandomForest::new(ForestConfig {
            n_trees: 11,
            ..Default::default()
        })
        .fit(&dataset)
        .unwrap();

        let shares = model.vote_shares(&[5.0; N_FEATURES]);
        let total: f64 = shares.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trained_model_rejects_foreign_ordering() {
        let dataset = banded_dataset();
        let model = Classifier::fit(&RandomForest::default(), &dataset).unwrap();

        let reordered = FeatureVector::from_parts(
            (0..N_FEATURES).map(|i| format!("col_{i}")).collect(),
            vec![5.0; N_FEATURES],
        )
        .unwrap();

        assert!(matches!(
            model.predict(&reordered),
            Err(Error::FeatureOrder { .. })
        ));
    }
}
