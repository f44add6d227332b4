use crate::core::check_inputs;
use crate::metrics::MetricsError;

/// Fraction of predictions that match the ground truth.
pub fn accuracy_score(y_true: &[usize], y_pred: &[usize]) -> Result<f64, MetricsError> {
    check_inputs(y_true, y_pred)?;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_matches() {
        let acc = accuracy_score(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
        assert!((acc - 0.75).abs() < 1e-12);
        assert_eq!(accuracy_score(&[2, 2], &[2, 2]).unwrap(), 1.0);
    }

    #[test]
    fn propagates_input_errors() {
        assert_eq!(accuracy_score(&[], &[]).unwrap_err(), MetricsError::EmptyInput);
        assert!(accuracy_score(&[0], &[0, 1]).is_err());
    }
}
