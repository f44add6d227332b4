use crate::metrics::{
    CalibrationCurve, ConfusionMatrix, CumulativeGain, PrecisionRecall, Roc, TargetDistribution,
};
use serde::Serialize;

/// Plot data embedded in a report; rendering is left to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "plot", content = "data", rename_all = "snake_case")]
pub enum Artifact {
    Roc(Roc),
    PrecisionRecall(PrecisionRecall),
    Calibration(CalibrationCurve),
    ConfusionMatrix(ConfusionMatrix),
    TargetDistribution(TargetDistribution),
    CumulativeGain(CumulativeGain),
}

/// One unit of report content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Guideline {
    Text(String),
    Artifact(Artifact),
}

impl Guideline {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Guideline::Text(t) => Some(t),
            Guideline::Artifact(_) => None,
        }
    }

    pub fn as_artifact(&self) -> Option<&Artifact> {
        match self {
            Guideline::Text(_) => None,
            Guideline::Artifact(a) => Some(a),
        }
    }
}

impl From<&str> for Guideline {
    fn from(t: &str) -> Self {
        Guideline::Text(t.to_string())
    }
}

impl From<String> for Guideline {
    fn from(t: String) -> Self {
        Guideline::Text(t)
    }
}

impl From<Artifact> for Guideline {
    fn from(a: Artifact) -> Self {
        Guideline::Artifact(a)
    }
}
