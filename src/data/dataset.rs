//! Dataset of validated employee records

use chrono::NaiveDate;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::record::EmployeeRecord;
use super::schema::{FeatureField, RiskLabel, N_CLASSES};

/// An ordered sequence of employee records sharing the canonical schema
///
/// Produced by the schema validator, mutated only by date-range filtering
/// (which returns a new, smaller dataset), discarded at end of session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<EmployeeRecord>,
}

impl Dataset {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Number of records
    pub fn n_samples(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature row for sample i, in canonical order
    pub fn features(&self, i: usize) -> &[f64] {
        &self.records[i].features
    }

    /// Class index of sample i
    pub fn class_index(&self, i: usize) -> usize {
        self.records[i].riesgo.class_index()
    }

    /// First n records, for preview display
    pub fn head(&self, n: usize) -> &[EmployeeRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// New dataset containing only records whose date falls in the closed
    /// interval [start, end], order preserved
    ///
    /// Records with an unparseable (absent) date are excluded from every
    /// range, never from the base dataset itself.
    pub fn filter_dates(&self, start: NaiveDate, end: NaiveDate) -> Dataset {
        Dataset {
            records: self
                .records
                .iter()
                .filter(|r| r.in_range(start, end))
                .cloned()
                .collect(),
        }
    }

    /// Earliest and latest parsed dates present, if any record carries one
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.fecha);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }

    /// Record count per risk label, in fixed label order
    pub fn label_distribution(&self) -> [usize; N_CLASSES] {
        let mut counts = [0usize; N_CLASSES];
        for record in &self.records {
            counts[record.riesgo.class_index()] += 1;
        }
        counts
    }

    /// Mean value of one feature per risk label, in fixed label order
    ///
    /// Labels with no records report 0.0.
    pub fn mean_feature_by_label(&self, field: FeatureField) -> [f64; N_CLASSES] {
        let mut sums = [0.0f64; N_CLASSES];
        let mut counts = [0usize; N_CLASSES];
        for record in &self.records {
            let idx = record.riesgo.class_index();
            sums[idx] += record.value(field);
            counts[idx] += 1;
        }

        let mut means = [0.0f64; N_CLASSES];
        for i in 0..N_CLASSES {
            if counts[i] > 0 {
                means[i] = sums[i] / counts[i] as f64;
            }
        }
        means
    }

    /// The set of distinct labels present
    pub fn distinct_labels(&self) -> Vec<RiskLabel> {
        let counts = self.label_distribution();
        RiskLabel::ALL
            .into_iter()
            .filter(|l| counts[l.class_index()] > 0)
            .collect()
    }

    /// Subset of the dataset by record indices
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
        }
    }

    /// Bootstrap sample (random sample with replacement), seeded
    pub fn bootstrap_sample(&self, seed: u64) -> Dataset {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.subset(&indices)
    }
}
