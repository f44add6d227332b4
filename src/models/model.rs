use crate::core::ScoreMatrix;
use crate::metrics::MetricsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{model} does not support {capability}")]
    Unsupported {
        model: String,
        capability: &'static str,
    },

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Fitted classifier as seen by the report heuristics.
///
/// `predict` is mandatory. `predict_proba` is an optional capability: the
/// default implementation reports it as unsupported, which the comparison
/// checks turn into report content instead of a failure.
pub trait Model {
    /// Human readable name, used in logs.
    fn name(&self) -> &str {
        "model"
    }

    /// Hard class predictions, one per row of `x`.
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ModelError>;

    /// Per-class probabilities, one row per row of `x`.
    fn predict_proba(&self, _x: &[Vec<f64>]) -> Result<ScoreMatrix, ModelError> {
        Err(ModelError::Unsupported {
            model: self.name().to_string(),
            capability: "predict_proba",
        })
    }
}
