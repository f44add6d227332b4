use crate::core::ScoreMatrix;
use crate::models::{Model, ModelError};
use std::thread;
use std::time::Duration;

/// Returns canned predictions (and optionally probabilities) regardless of `x`.
pub struct FixedModel {
    predictions: Vec<usize>,
    probabilities: Option<ScoreMatrix>,
    strict: bool,
}

impl FixedModel {
    /// Fails when asked to predict a different number of rows.
    pub fn new(predictions: Vec<usize>) -> Self {
        Self {
            predictions,
            probabilities: None,
            strict: true,
        }
    }

    /// Returns the canned predictions whatever the number of rows.
    pub fn lenient(predictions: Vec<usize>) -> Self {
        Self {
            strict: false,
            ..Self::new(predictions)
        }
    }

    pub fn with_probabilities(mut self, probabilities: ScoreMatrix) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    fn check_rows(&self, x: &[Vec<f64>]) -> Result<(), ModelError> {
        if self.strict && x.len() != self.predictions.len() {
            return Err(ModelError::Prediction(format!(
                "expected {} rows, got {}",
                self.predictions.len(),
                x.len()
            )));
        }
        Ok(())
    }
}

impl Model for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ModelError> {
        self.check_rows(x)?;
        Ok(self.predictions.clone())
    }

    fn predict_proba(&self, x: &[Vec<f64>]) -> Result<ScoreMatrix, ModelError> {
        self.check_rows(x)?;
        self.probabilities.clone().ok_or_else(|| ModelError::Unsupported {
            model: self.name().to_string(),
            capability: "predict_proba",
        })
    }
}

/// Every call fails.
pub struct FailingModel;

impl Model for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, _x: &[Vec<f64>]) -> Result<Vec<usize>, ModelError> {
        Err(ModelError::Prediction("model is broken".into()))
    }
}

/// Sleeps before answering, for computation-time checks.
pub struct SlowModel {
    inner: FixedModel,
    delay: Duration,
}

impl SlowModel {
    pub fn new(predictions: Vec<usize>, delay: Duration) -> Self {
        Self {
            inner: FixedModel::new(predictions),
            delay,
        }
    }
}

impl Model for SlowModel {
    fn name(&self) -> &str {
        "slow"
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ModelError> {
        thread::sleep(self.delay);
        self.inner.predict(x)
    }
}
