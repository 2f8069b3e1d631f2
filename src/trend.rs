//! Temporal risk trend aggregation
//!
//! Buckets a filtered dataset by calendar month and risk label into a count
//! table: one row per month in chronological order, one column per label in
//! fixed order, zero-filled where a month has no records of a label.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, RiskLabel, N_CLASSES};

/// Counts for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Month key, `YYYY-MM`
    pub month: String,
    /// Record count per label, in fixed label order (bajo, medio, alto)
    pub counts: [usize; N_CLASSES],
}

impl MonthBucket {
    pub fn count(&self, label: RiskLabel) -> usize {
        self.counts[label.class_index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Month-by-label count table, rows in chronological order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendTable {
    pub months: Vec<MonthBucket>,
}

impl TrendTable {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn month(&self, key: &str) -> Option<&MonthBucket> {
        self.months.iter().find(|m| m.month == key)
    }
}

/// Group a dataset's records by month and risk label
///
/// Undated records belong to no month and are left out. Purely derived;
/// the dataset is not touched.
pub fn monthly_trend(dataset: &Dataset) -> TrendTable {
    let mut buckets: BTreeMap<String, [usize; N_CLASSES]> = BTreeMap::new();

    for record in dataset.records() {
        let Some(fecha) = record.fecha else {
            continue;
        };
        let key = fecha.format("%Y-%m").to_string();
        buckets.entry(key).or_insert([0; N_CLASSES])[record.riesgo.class_index()] += 1;
    }

    TrendTable {
        months: buckets
            .into_iter()
            .map(|(month, counts)| MonthBucket { month, counts })
            .collect(),
    }
}
