use crate::metrics::MetricsError;

/// One-vs-rest indicator columns, one per entry of `classes`.
///
/// `out[k][i]` is `true` when sample `i` has label `classes[k]`.
pub fn label_binarize(y: &[usize], classes: &[usize]) -> Vec<Vec<bool>> {
    classes
        .iter()
        .map(|&c| y.iter().map(|&v| v == c).collect())
        .collect()
}

/// Largest supported class count. Labels are dense class indices
/// `0..MAX_CLASSES`, so per-class tables stay small.
pub const MAX_CLASSES: usize = 1024;

/// Validates a pair of label vectors before any metric runs on them.
pub fn check_inputs(y_true: &[usize], y_pred: &[usize]) -> Result<(), MetricsError> {
    if y_true.is_empty() {
        return Err(MetricsError::EmptyInput);
    }
    if y_true.len() != y_pred.len() {
        return Err(MetricsError::LengthMismatch {
            what: "y_pred",
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if let Some(&max) = y_true.iter().chain(y_pred).max() {
        if max >= MAX_CLASSES {
            return Err(MetricsError::TooManyClasses {
                n_classes: max + 1,
                max: MAX_CLASSES,
            });
        }
    }
    Ok(())
}
