use crate::core::{ScoreMatrix, label_binarize};
use crate::metrics::MetricsError;
use serde::Serialize;
use std::cmp::Ordering;

/// One point per distinct score, walked from the highest score down.
pub(crate) struct ThresholdCounts {
    pub threshold: f64,
    pub tp: usize,
    pub fp: usize,
}

/// Sample indices sorted by descending score.
pub(crate) fn descending_order(scores: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..scores.len()).collect();
    idx.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    idx
}

/// Cumulative true/false positive counts at each distinct score threshold.
pub(crate) fn cumulative_counts(labels: &[bool], scores: &[f64]) -> Vec<ThresholdCounts> {
    let order = descending_order(scores);
    let mut out = Vec::new();
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < order.len() {
        let current = scores[order[i]];
        while i < order.len() && scores[order[i]] == current {
            if labels[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        out.push(ThresholdCounts {
            threshold: current,
            tp,
            fp,
        });
    }
    out
}

pub(crate) fn check_binary_input(labels: &[bool], scores: &[f64]) -> Result<(), MetricsError> {
    if scores.is_empty() {
        return Err(MetricsError::EmptyInput);
    }
    if scores.len() != labels.len() {
        return Err(MetricsError::LengthMismatch {
            what: "scores",
            expected: labels.len(),
            actual: scores.len(),
        });
    }
    Ok(())
}

/// Area under a piecewise-linear curve (trapezoidal rule).
///
/// `x` must be monotonic. A decreasing `x` yields the same positive area as
/// its increasing mirror.
pub fn auc(x: &[f64], y: &[f64]) -> Result<f64, MetricsError> {
    if x.len() != y.len() {
        return Err(MetricsError::LengthMismatch {
            what: "y",
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(MetricsError::EmptyInput);
    }

    let increasing = x.windows(2).all(|w| w[1] >= w[0]);
    let decreasing = x.windows(2).all(|w| w[1] <= w[0]);
    let direction = match (increasing, decreasing) {
        (true, _) => 1.0,
        (false, true) => -1.0,
        (false, false) => return Err(MetricsError::NonMonotonic),
    };

    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();
    Ok(direction * area)
}

/// ROC curve of a single binary problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub thresholds: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RocCurve {
    /// Curve from precomputed rates; thresholds are left empty.
    pub fn new(fpr: Vec<f64>, tpr: Vec<f64>, label: Option<String>) -> Result<Self, MetricsError> {
        if fpr.len() != tpr.len() {
            return Err(MetricsError::LengthMismatch {
                what: "tpr",
                expected: fpr.len(),
                actual: tpr.len(),
            });
        }
        Ok(Self {
            fpr,
            tpr,
            thresholds: Vec::new(),
            label,
        })
    }

    pub fn auc(&self) -> Result<f64, MetricsError> {
        auc(&self.fpr, &self.tpr)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// ROC curve for binary labels and scores, from `(0, 0)` to `(1, 1)`.
pub fn roc_curve(labels: &[bool], scores: &[f64]) -> Result<RocCurve, MetricsError> {
    check_binary_input(labels, scores)?;

    let total_pos = labels.iter().filter(|&&l| l).count();
    let total_neg = labels.len() - total_pos;
    if total_pos == 0 {
        return Err(MetricsError::NoPositiveSamples);
    }
    if total_neg == 0 {
        return Err(MetricsError::NoNegativeSamples);
    }

    let (p, n) = (total_pos as f64, total_neg as f64);
    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];
    for c in cumulative_counts(labels, scores) {
        fpr.push(c.fp as f64 / n);
        tpr.push(c.tp as f64 / p);
        thresholds.push(c.threshold);
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
        label: None,
    })
}

/// Set of ROC curves for one estimator's scores.
///
/// Binary scores produce one unlabelled curve. Multi-class scores produce a
/// one-vs-rest curve per class, labelled `"(class N)"`, plus a
/// micro-average over the binarized labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roc {
    pub curves: Vec<RocCurve>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub micro_average: Option<RocCurve>,
}

impl Roc {
    pub fn from_curves(curves: Vec<RocCurve>) -> Self {
        Self {
            curves,
            micro_average: None,
        }
    }

    pub fn from_raw_data(y_true: &[usize], y_score: &ScoreMatrix) -> Result<Self, MetricsError> {
        let curves = Self::per_class(y_true, y_score)?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        if !y_score.is_multiclass() {
            return Ok(Self::from_curves(curves));
        }

        let classes: Vec<usize> = (0..y_score.n_columns()).collect();
        let flat_labels: Vec<bool> = y_true
            .iter()
            .flat_map(|&y| classes.iter().map(move |&c| y == c))
            .collect();
        let micro = roc_curve(&flat_labels, &y_score.ravel())?.with_label("micro-average");

        Ok(Self {
            curves,
            micro_average: Some(micro),
        })
    }

    /// Each curve of [`Roc::from_raw_data`] on its own, without the
    /// micro-average.
    ///
    /// Shape errors fail the whole call. A class that cannot be scored
    /// (no positive or no negative sample) only fails its own entry.
    pub fn per_class(
        y_true: &[usize],
        y_score: &ScoreMatrix,
    ) -> Result<Vec<Result<RocCurve, MetricsError>>, MetricsError> {
        y_score.check_labels(y_true)?;

        if !y_score.is_multiclass() {
            let positive: Vec<bool> = y_true.iter().map(|&y| y == 1).collect();
            return Ok(vec![roc_curve(&positive, &y_score.positive_scores()?)]);
        }

        let classes: Vec<usize> = (0..y_score.n_columns()).collect();
        let indicators = label_binarize(y_true, &classes);
        Ok(classes
            .iter()
            .zip(&indicators)
            .map(|(&c, column)| {
                roc_curve(column, &y_score.column(c))
                    .map(|curve| curve.with_label(format!("(class {c})")))
            })
            .collect())
    }

    /// AUC of every per-class curve, in curve order.
    pub fn aucs(&self) -> Result<Vec<f64>, MetricsError> {
        self.curves.iter().map(RocCurve::auc).collect()
    }
}
