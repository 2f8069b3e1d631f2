//! Session context
//!
//! One session owns one dataset and one trained model; there is no
//! module-level state, so two sessions never contend for anything. The
//! model is retrained eagerly whenever the active dataset changes and the
//! previous model is discarded, mirroring the upload/filter/predict flow
//! of the dashboard this engine backs.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::info;

use crate::data::{validate, Dataset, RawTable};
use crate::error::{Error, Result};
use crate::features::FeatureVector;
use crate::interpret::RiskGuidance;
use crate::models::{Classifier, RandomForest, TrainedModel};

/// A single user session of the risk assessment engine
pub struct Session {
    classifier: Box<dyn Classifier>,
    base: Option<Dataset>,
    active: Option<Dataset>,
    model: Option<TrainedModel>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session backed by the default bagged-forest classifier
    pub fn new() -> Self {
        Self::with_classifier(Box::new(RandomForest::default()))
    }

    /// Session backed by any classifier implementation
    pub fn with_classifier(classifier: Box<dyn Classifier>) -> Self {
        Self {
            classifier,
            base: None,
            active: None,
            model: None,
        }
    }

    /// Validate an uploaded table, adopt it as the session dataset and
    /// train on it
    ///
    /// A schema failure is fatal to the whole upload; nothing of the
    /// previous session state survives a successful load.
    pub fn load_table(&mut self, table: &RawTable) -> Result<()> {
        let dataset = validate(table)?;
        self.load_dataset(dataset)
    }

    /// Adopt an already-validated dataset and train on it
    pub fn load_dataset(&mut self, dataset: Dataset) -> Result<()> {
        info!(records = dataset.n_samples(), "session dataset loaded");
        self.base = Some(dataset.clone());
        self.active = Some(dataset);
        self.retrain()
    }

    /// Restrict the active dataset to the closed date interval [start, end]
    /// and retrain on the filtered set
    ///
    /// The previous model is discarded even when the new filtered set turns
    /// out identical; retraining is eager by design.
    pub fn filter_dates(&mut self, start: NaiveDate, end: NaiveDate) -> Result<()> {
        let base = self.base.as_ref().ok_or(Error::ModelNotTrained)?;
        let filtered = base.filter_dates(start, end);
        info!(
            records = filtered.n_samples(),
            %start,
            %end,
            "date filter applied, retraining"
        );
        self.active = Some(filtered);
        self.retrain()
    }

    /// Drop any date filter and retrain on the full dataset
    pub fn clear_filter(&mut self) -> Result<()> {
        let base = self.base.as_ref().ok_or(Error::ModelNotTrained)?.clone();
        self.active = Some(base);
        self.retrain()
    }

    fn retrain(&mut self) -> Result<()> {
        self.model = None;
        let active = self.active.as_ref().ok_or(Error::ModelNotTrained)?;
        self.model = Some(self.classifier.fit(active)?);
        Ok(())
    }

    /// The active (possibly filtered) dataset
    pub fn dataset(&self) -> Option<&Dataset> {
        self.active.as_ref()
    }

    /// The current trained model, if training has happened
    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_ref()
    }

    /// Predict the risk for a feature vector and interpret it
    ///
    /// Fails with [`Error::ModelNotTrained`] before the first successful
    /// training call.
    pub fn predict(&self, vector: &FeatureVector) -> Result<RiskGuidance> {
        let model = self.model.as_ref().ok_or(Error::ModelNotTrained)?;
        let label = model.predict(vector)?;
        Ok(RiskGuidance::for_label(label))
    }

    /// Predict from a sparse name→value mapping (interactive input path)
    pub fn predict_sparse(&self, input: &HashMap<String, f64>) -> Result<RiskGuidance> {
        self.predict(&FeatureVector::from_sparse(input)?)
    }

    /// Month-by-label trend table over the active dataset
    pub fn trend(&self) -> Result<crate::trend::TrendTable> {
        let active = self.active.as_ref().ok_or(Error::ModelNotTrained)?;
        Ok(crate::trend::monthly_trend(active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EmployeeRecord, RiskLabel, N_FEATURES};

    fn record(x: f64, riesgo: RiskLabel, fecha: &str) -> EmployeeRecord {
        let mut features = [5.0; N_FEATURES];
        features[0] = x;
        EmployeeRecord::new(
            features,
            riesgo,
            NaiveDate::parse_from_str(fecha, "%Y-%m-%d").ok(),
        )
    }

    fn low_only_dataset() -> Dataset {
        Dataset::new(
            (0..10)
                .map(|i| record(i as f64, RiskLabel::Bajo, "2024-01-05"))
                .collect(),
        )
    }

    #[test]
    fn predict_before_training_is_fatal() {
        let session = Session::new();
        let vector = FeatureVector::from_sparse(&HashMap::new()).unwrap();
        assert!(matches!(
            session.predict(&vector),
            Err(Error::ModelNotTrained)
        ));
    }

    #[test]
    fn default_sliders_on_low_only_data_predict_low() {
        let mut session = Session::new();
        session.load_dataset(low_only_dataset()).unwrap();

        let guidance = session.predict_sparse(&HashMap::new()).unwrap();
        assert_eq!(guidance.label, RiskLabel::Bajo);
        assert_eq!(guidance.color, "#C8E6C9");
    }

    #[test]
    fn filter_to_empty_range_fails_training_and_clears_model() {
        let mut session = Session::new();
        session.load_dataset(low_only_dataset()).unwrap();
        assert!(session.model().is_some());

        let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(1990, 12, 31).unwrap();
        assert!(matches!(
            session.filter_dates(start, end),
            Err(Error::EmptyTrainingSet)
        ));
        assert!(session.model().is_none());

        let vector = FeatureVector::from_sparse(&HashMap::new()).unwrap();
        assert!(matches!(
            session.predict(&vector),
            Err(Error::ModelNotTrained)
        ));
    }

    #[test]
    fn clear_filter_restores_full_dataset() {
        let mut session = Session::new();
        let mut records = low_only_dataset().records().to_vec();
        records.push(record(9.0, RiskLabel::Alto, "2024-03-01"));
        session.load_dataset(Dataset::new(records)).unwrap();

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        session.filter_dates(start, end).unwrap();
        assert_eq!(session.dataset().unwrap().n_samples(), 10);

        session.clear_filter().unwrap();
        assert_eq!(session.dataset().unwrap().n_samples(), 11);
    }

    #[test]
    fn two_sessions_do_not_share_state() {
        let mut a = Session::new();
        let b = Session::new();
        a.load_dataset(low_only_dataset()).unwrap();

        assert!(a.model().is_some());
        assert!(b.model().is_none());
        assert!(b.dataset().is_none());
    }
}
