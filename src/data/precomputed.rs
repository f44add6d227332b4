use crate::core::ScoreMatrix;
use crate::models::{Model, ModelError};
use serde::Deserialize;

/// A model reduced to its recorded outputs on one test set.
#[derive(Debug, Clone, Deserialize)]
pub struct PrecomputedModel {
    pub name: String,
    pub predictions: Vec<usize>,
    #[serde(default)]
    pub probabilities: Option<ScoreMatrix>,
}

impl PrecomputedModel {
    fn check_rows(&self, x: &[Vec<f64>]) -> Result<(), ModelError> {
        if x.len() != self.predictions.len() {
            return Err(ModelError::Prediction(format!(
                "{} recorded {} predictions, asked for {} rows",
                self.name,
                self.predictions.len(),
                x.len()
            )));
        }
        Ok(())
    }
}

impl Model for PrecomputedModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ModelError> {
        self.check_rows(x)?;
        Ok(self.predictions.clone())
    }

    fn predict_proba(&self, x: &[Vec<f64>]) -> Result<ScoreMatrix, ModelError> {
        self.check_rows(x)?;
        self.probabilities.clone().ok_or_else(|| ModelError::Unsupported {
            model: self.name.clone(),
            capability: "predict_proba",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(json: &str) -> PrecomputedModel {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn replays_recorded_outputs() {
        let m = model(r#"{"name": "forest", "predictions": [1, 0], "probabilities": [[0.3, 0.7], [0.9, 0.1]]}"#);
        let x = vec![vec![], vec![]];
        assert_eq!(m.name(), "forest");
        assert_eq!(m.predict(&x).unwrap(), vec![1, 0]);
        assert_eq!(m.predict_proba(&x).unwrap().column(1), vec![0.7, 0.1]);
    }

    #[test]
    fn missing_probabilities_are_unsupported() {
        let m = model(r#"{"name": "svm", "predictions": [1]}"#);
        let err = m.predict_proba(&[vec![]]).unwrap_err();
        assert_eq!(err.to_string(), "svm does not support predict_proba");
    }

    #[test]
    fn row_count_must_match() {
        let m = model(r#"{"name": "svm", "predictions": [1, 1]}"#);
        assert!(matches!(m.predict(&[vec![]]), Err(ModelError::Prediction(_))));
    }
}
