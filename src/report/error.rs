use crate::metrics::MetricsError;
use crate::models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
