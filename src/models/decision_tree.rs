//! Decision tree classifier
//!
//! Multiclass CART with Gini impurity, the weak learner inside the bagged
//! ensemble. Fitting consumes a dataset and produces a frozen tree; there is
//! no incremental update.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::data::{Dataset, N_CLASSES};

/// Decision tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree
    pub max_depth: usize,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Maximum features to consider per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: crate::models::DEFAULT_SEED,
        }
    }
}

/// Tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index for split
    feature_idx: Option<usize>,
    /// Threshold for split
    threshold: Option<f64>,
    /// Majority class at this node
    class: usize,
    /// Sample count per class at this node
    class_counts: [usize; N_CLASSES],
    /// Number of samples in this node
    n_samples: usize,
    /// Left child
    left: Option<Box<TreeNode>>,
    /// Right child
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(class_counts: [usize; N_CLASSES], n_samples: usize) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            class: majority_class(&class_counts),
            class_counts,
            n_samples,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn depth(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            1 + self
                .left
                .as_ref()
                .map(|n| n.depth())
                .unwrap_or(0)
                .max(self.right.as_ref().map(|n| n.depth()).unwrap_or(0))
        }
    }
}

/// Majority class with deterministic low-index tie-break
fn majority_class(counts: &[usize; N_CLASSES]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best
}

fn count_classes(dataset: &Dataset, indices: &[usize]) -> [usize; N_CLASSES] {
    let mut counts = [0usize; N_CLASSES];
    for &i in indices {
        counts[dataset.class_index(i)] += 1;
    }
    counts
}

/// Multiclass Gini impurity
fn gini(counts: &[usize; N_CLASSES], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Decision tree classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
}

impl DecisionTree {
    /// Create a new decision tree with config
    pub fn new(config: TreeConfig) -> Self {
        Self { config, root: None }
    }

    /// Train the decision tree on every sample of the dataset
    pub fn fit(&mut self, dataset: &Dataset) {
        let indices: Vec<usize> = (0..dataset.n_samples()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.root = Some(self.build_tree(dataset, &indices, 0, &mut rng));
    }

    /// Build tree recursively
    fn build_tree(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        let class_counts = count_classes(dataset, indices);
        let impurity = gini(&class_counts, n);

        if depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || impurity < 1e-10
        {
            return TreeNode::leaf(class_counts, n);
        }

        let best_split = self.find_best_split(dataset, indices, impurity, rng);

        match best_split {
            Some((feature_idx, threshold, left_indices, right_indices)) => {
                if left_indices.len() < self.config.min_samples_leaf
                    || right_indices.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(class_counts, n);
                }

                let left = self.build_tree(dataset, &left_indices, depth + 1, rng);
                let right = self.build_tree(dataset, &right_indices, depth + 1, rng);

                TreeNode {
                    feature_idx: Some(feature_idx),
                    threshold: Some(threshold),
                    class: majority_class(&class_counts),
                    class_counts,
                    n_samples: n,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(class_counts, n),
        }
    }

    /// Find the split with the highest Gini gain
    fn find_best_split(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let n_features = dataset.features(indices[0]).len();
        let max_features = self.config.max_features.unwrap_or(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features.min(n_features));

        let mut best_gain = 0.0;
        let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| dataset.features(i)[feature_idx])
                .collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| dataset.features(i)[feature_idx] <= threshold);

                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_counts = count_classes(dataset, &left_idx);
                let right_counts = count_classes(dataset, &right_idx);

                let n_left = left_idx.len() as f64;
                let n_right = right_idx.len() as f64;
                let n_total = n_left + n_right;

                let weighted_impurity = (n_left * gini(&left_counts, left_idx.len())
                    + n_right * gini(&right_counts, right_idx.len()))
                    / n_total;
                let gain = parent_impurity - weighted_impurity;

                if gain > best_gain {
                    best_gain = gain;
                    best_split = Some((feature_idx, threshold, left_idx, right_idx));
                }
            }
        }

        best_split
    }

    /// Predicted class index for a single feature row
    pub fn predict_one(&self, features: &[f64]) -> usize {
        match &self.root {
            Some(node) => Self::traverse(node, features),
            None => 0,
        }
    }

    fn traverse(node: &TreeNode, features: &[f64]) -> usize {
        if node.is_leaf() {
            return node.class;
        }

        // Split nodes always carry both children and split parameters
        let feature_idx = node.feature_idx.unwrap_or(0);
        let threshold = node.threshold.unwrap_or(0.0);

        let child = if features.get(feature_idx).copied().unwrap_or(0.0) <= threshold {
            node.left.as_deref()
        } else {
            node.right.as_deref()
        };

        match child {
            Some(c) => Self::traverse(c, features),
            None => node.class,
        }
    }

    /// Tree depth after fitting
    pub fn depth(&self) -> usize {
        self.root.as_ref().map(|r| r.depth()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EmployeeRecord, RiskLabel, N_FEATURES};

    fn dataset_three_bands() -> Dataset {
        let mut records = Vec::new();
        for i in 0..90 {
            let x = i as f64 / 10.0;
            let riesgo = if x < 3.0 {
                RiskLabel::Bajo
            } else if x < 6.0 {
                RiskLabel::Medio
            } else {
                RiskLabel::Alto
            };
            let mut features = [0.0; N_FEATURES];
            features[0] = x;
            records.push(EmployeeRecord::new(features, riesgo, None));
        }
        Dataset::new(records)
    }

    #[test]
    fn separates_three_classes() {
        let dataset = dataset_three_bands();
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&dataset);

        let correct = (0..dataset.n_samples())
            .filter(|&i| tree.predict_one(dataset.features(i)) == dataset.class_index(i))
            .count();
        assert!(correct as f64 / dataset.n_samples() as f64 > 0.95);
    }

    #[test]
    fn pure_dataset_yields_single_leaf() {
        let mut records = Vec::new();
        for _ in 0..20 {
            records.push(EmployeeRecord::new([5.0; N_FEATURES], RiskLabel::Medio, None));
        }
        let dataset = Dataset::new(records);

        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&dataset);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_one(&[0.0; N_FEATURES]), RiskLabel::Medio.class_index());
    }

    #[test]
    fn gini_is_zero_for_pure_and_max_for_uniform() {
        assert_eq!(gini(&[10, 0, 0], 10), 0.0);
        let uniform = gini(&[10, 10, 10], 30);
        assert!((uniform - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn majority_tie_breaks_to_lowest_class() {
        assert_eq!(majority_class(&[3, 3, 1]), 0);
        assert_eq!(majority_class(&[1, 4, 4]), 1);
    }
}
