use crate::core::ScoreMatrix;
use crate::metrics::MetricsError;
use crate::metrics::roc::{check_binary_input, descending_order};
use serde::Serialize;

/// Fraction of positives captured against fraction of samples targeted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GainCurve {
    pub percentages: Vec<f64>,
    pub gains: Vec<f64>,
    pub label: String,
}

/// Cumulative gain of `labels` when samples are taken in descending score order.
///
/// Both vectors start at `0`.
pub fn cumulative_gain_curve(
    labels: &[bool],
    scores: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), MetricsError> {
    check_binary_input(labels, scores)?;
    let total_pos = labels.iter().filter(|&&l| l).count();
    if total_pos == 0 {
        return Err(MetricsError::NoPositiveSamples);
    }

    let n = labels.len() as f64;
    let mut percentages = vec![0.0];
    let mut gains = vec![0.0];
    let mut hits = 0usize;
    for (rank, i) in descending_order(scores).into_iter().enumerate() {
        if labels[i] {
            hits += 1;
        }
        percentages.push((rank + 1) as f64 / n);
        gains.push(hits as f64 / total_pos as f64);
    }
    Ok((percentages, gains))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeGain {
    pub curves: Vec<GainCurve>,
}

impl CumulativeGain {
    /// One curve per score column; two-column scores yield `class 0` and `class 1`.
    ///
    /// Only binary problems are supported.
    pub fn from_raw_data(y_true: &[usize], y_score: &ScoreMatrix) -> Result<Self, MetricsError> {
        y_score.check_labels(y_true)?;
        if y_score.is_multiclass() {
            return Err(MetricsError::NotBinary {
                n_columns: y_score.n_columns(),
            });
        }

        let first_class = 2 - y_score.n_columns();
        let mut curves = Vec::with_capacity(y_score.n_columns());
        for c in 0..y_score.n_columns() {
            let class = first_class + c;
            let labels: Vec<bool> = y_true.iter().map(|&y| y == class).collect();
            let (percentages, gains) = cumulative_gain_curve(&labels, &y_score.column(c))?;
            curves.push(GainCurve {
                percentages,
                gains,
                label: format!("class {class}"),
            });
        }
        Ok(Self { curves })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gains_climb_to_one() {
        let (pct, gains) =
            cumulative_gain_curve(&[true, false, true, false], &[0.9, 0.2, 0.6, 0.4]).unwrap();
        assert_eq!(pct, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(gains, vec![0.0, 0.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn two_columns_give_a_curve_per_class() {
        let s = ScoreMatrix::new(vec![vec![0.9, 0.1], vec![0.3, 0.7], vec![0.4, 0.6]]).unwrap();
        let g = CumulativeGain::from_raw_data(&[0, 1, 1], &s).unwrap();
        let labels: Vec<_> = g.curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["class 0", "class 1"]);
        assert_eq!(g.curves[0].gains, vec![0.0, 1.0, 1.0, 1.0]);
        assert_eq!(g.curves[1].gains, vec![0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn single_column_is_the_positive_class() {
        let s = ScoreMatrix::from_binary_scores(vec![0.2, 0.8]).unwrap();
        let g = CumulativeGain::from_raw_data(&[0, 1], &s).unwrap();
        assert_eq!(g.curves.len(), 1);
        assert_eq!(g.curves[0].label, "class 1");
    }

    #[test]
    fn multiclass_is_rejected() {
        let s = ScoreMatrix::new(vec![vec![0.2, 0.3, 0.5]]).unwrap();
        assert!(matches!(
            CumulativeGain::from_raw_data(&[2], &s).unwrap_err(),
            MetricsError::NotBinary { n_columns: 3 }
        ));
    }
}
