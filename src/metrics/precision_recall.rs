use crate::core::{ScoreMatrix, label_binarize};
use crate::metrics::MetricsError;
use crate::metrics::roc::{auc, check_binary_input, cumulative_counts};
use serde::Serialize;

/// Precision-recall curve of a single binary problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub thresholds: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PrCurve {
    /// Area under the curve over `(recall, precision)`.
    pub fn auc(&self) -> Result<f64, MetricsError> {
        auc(&self.recall, &self.precision)
    }
}

/// Precision-recall curve for binary labels, starting at `(recall 0, precision 1)`.
pub fn precision_recall_curve(labels: &[bool], scores: &[f64]) -> Result<PrCurve, MetricsError> {
    check_binary_input(labels, scores)?;

    let total_pos = labels.iter().filter(|&&l| l).count();
    if total_pos == 0 {
        return Err(MetricsError::NoPositiveSamples);
    }
    let p = total_pos as f64;

    let mut precision = vec![1.0];
    let mut recall = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];
    for c in cumulative_counts(labels, scores) {
        precision.push(c.tp as f64 / (c.tp + c.fp) as f64);
        recall.push(c.tp as f64 / p);
        thresholds.push(c.threshold);
    }

    Ok(PrCurve {
        precision,
        recall,
        thresholds,
        label: None,
    })
}

/// Precision-recall curves for one estimator's scores, dispatched like [`crate::metrics::Roc`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecisionRecall {
    pub curves: Vec<PrCurve>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub micro_average: Option<PrCurve>,
}

impl PrecisionRecall {
    pub fn from_raw_data(y_true: &[usize], y_score: &ScoreMatrix) -> Result<Self, MetricsError> {
        y_score.check_labels(y_true)?;

        if !y_score.is_multiclass() {
            let positive: Vec<bool> = y_true.iter().map(|&y| y == 1).collect();
            let curve = precision_recall_curve(&positive, &y_score.positive_scores()?)?;
            return Ok(Self {
                curves: vec![curve],
                micro_average: None,
            });
        }

        let classes: Vec<usize> = (0..y_score.n_columns()).collect();
        let indicators = label_binarize(y_true, &classes);
        let mut curves = Vec::with_capacity(classes.len());
        for (&c, column) in classes.iter().zip(&indicators) {
            let mut curve = precision_recall_curve(column, &y_score.column(c))?;
            curve.label = Some(format!("(class {c})"));
            curves.push(curve);
        }

        let flat_labels: Vec<bool> = y_true
            .iter()
            .flat_map(|&y| classes.iter().map(move |&c| y == c))
            .collect();
        let mut micro = precision_recall_curve(&flat_labels, &y_score.ravel())?;
        micro.label = Some("micro-average".into());

        Ok(Self {
            curves,
            micro_average: Some(micro),
        })
    }
}
