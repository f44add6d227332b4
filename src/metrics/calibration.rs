use crate::core::ScoreMatrix;
use crate::metrics::MetricsError;
use crate::metrics::roc::check_binary_input;
use serde::Serialize;

/// Observed positive frequency against mean predicted probability, per bin.
///
/// Only non-empty bins are reported, so both vectors may be shorter than
/// `n_bins`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationCurve {
    pub prob_true: Vec<f64>,
    pub prob_pred: Vec<f64>,
    pub counts: Vec<usize>,
    pub n_bins: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Uniform-width calibration curve of binary labels against probabilities.
///
/// Bin `k` covers `(k / n_bins, (k + 1) / n_bins]`; a probability of `0`
/// falls in the first bin.
pub fn calibration_curve(
    labels: &[bool],
    probabilities: &[f64],
    n_bins: usize,
) -> Result<CalibrationCurve, MetricsError> {
    check_binary_input(labels, probabilities)?;
    if n_bins == 0 {
        return Err(MetricsError::InvalidScores("n_bins must be > 0".into()));
    }
    if let Some(p) = probabilities.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(MetricsError::InvalidScores(format!(
            "probability {p} is outside [0, 1]"
        )));
    }

    let inner_edges: Vec<f64> = (1..n_bins).map(|k| k as f64 / n_bins as f64).collect();
    let mut sum_true = vec![0.0; n_bins];
    let mut sum_pred = vec![0.0; n_bins];
    let mut counts = vec![0usize; n_bins];

    for (&y, &p) in labels.iter().zip(probabilities) {
        let bin = inner_edges.iter().filter(|&&e| e < p).count();
        counts[bin] += 1;
        sum_pred[bin] += p;
        if y {
            sum_true[bin] += 1.0;
        }
    }

    let mut curve = CalibrationCurve {
        prob_true: Vec::new(),
        prob_pred: Vec::new(),
        counts: Vec::new(),
        n_bins,
        label: None,
    };
    for k in 0..n_bins {
        if counts[k] == 0 {
            continue;
        }
        let n = counts[k] as f64;
        curve.prob_true.push(sum_true[k] / n);
        curve.prob_pred.push(sum_pred[k] / n);
        curve.counts.push(counts[k]);
    }
    Ok(curve)
}

pub struct Calibration;

impl Calibration {
    /// Calibration curve of the positive-class probabilities.
    ///
    /// Multi-class scores are rejected with [`MetricsError::NotBinary`].
    pub fn from_raw_data(
        y_true: &[usize],
        y_score: &ScoreMatrix,
        n_bins: usize,
    ) -> Result<CalibrationCurve, MetricsError> {
        y_score.check_labels(y_true)?;
        let probabilities = y_score.positive_scores()?;
        let positive: Vec<bool> = y_true.iter().map(|&y| y == 1).collect();
        calibration_curve(&positive, &probabilities, n_bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_and_means() {
        let c = calibration_curve(
            &[false, true, false, true, true],
            &[0.1, 0.15, 0.8, 0.9, 1.0],
            2,
        )
        .unwrap();
        assert_eq!(c.counts, vec![2, 3]);
        assert!((c.prob_true[0] - 0.5).abs() < 1e-12);
        assert!((c.prob_pred[0] - 0.125).abs() < 1e-12);
        assert!((c.prob_true[1] - 2.0 / 3.0).abs() < 1e-12);
        assert!((c.prob_pred[1] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn edge_values_land_in_lower_bin_and_empty_bins_are_skipped() {
        let c = calibration_curve(&[false, true], &[0.0, 0.5], 4).unwrap();
        assert_eq!(c.counts, vec![1, 1]);
        assert_eq!(c.prob_pred, vec![0.0, 0.5]);
        assert_eq!(c.n_bins, 4);
    }

    #[test]
    fn rejects_out_of_range_probabilities_and_zero_bins() {
        assert!(calibration_curve(&[true], &[1.2], 10).is_err());
        assert!(calibration_curve(&[true], &[0.2], 0).is_err());
    }

    #[test]
    fn multiclass_scores_are_not_binary() {
        let s = ScoreMatrix::new(vec![vec![0.2, 0.3, 0.5], vec![0.5, 0.3, 0.2]]).unwrap();
        assert_eq!(
            Calibration::from_raw_data(&[2, 0], &s, 10).unwrap_err(),
            MetricsError::NotBinary { n_columns: 3 }
        );
    }
}
