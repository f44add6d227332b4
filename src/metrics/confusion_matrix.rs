use crate::core::{MAX_CLASSES, check_inputs};
use crate::metrics::MetricsError;
use serde::Serialize;

/// Row-major confusion matrix.
///
/// Entry `(i, j)` counts samples whose actual class is `i` and predicted
/// class is `j`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    n_classes: usize,
    counts: Vec<usize>,
}

impl ConfusionMatrix {
    /// Builds a matrix from label vectors.
    ///
    /// `n_classes` is inferred as `max(label) + 1` when `None`. Labels at or
    /// beyond an explicit `n_classes` are ignored. More than
    /// [`MAX_CLASSES`] classes is an error.
    pub fn from_labels(
        y_true: &[usize],
        y_pred: &[usize],
        n_classes: Option<usize>,
    ) -> Result<Self, MetricsError> {
        check_inputs(y_true, y_pred)?;

        let nc = n_classes.unwrap_or_else(|| {
            let max_t = y_true.iter().copied().max().unwrap_or(0);
            let max_p = y_pred.iter().copied().max().unwrap_or(0);
            max_t.max(max_p) + 1
        });
        if nc > MAX_CLASSES {
            return Err(MetricsError::TooManyClasses {
                n_classes: nc,
                max: MAX_CLASSES,
            });
        }

        let mut counts = vec![0usize; nc * nc];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t < nc && p < nc {
                counts[t * nc + p] += 1;
            }
        }
        Ok(Self {
            n_classes: nc,
            counts,
        })
    }

    /// Builds a matrix from explicit rows; every row must have one entry per row.
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Self, MetricsError> {
        let nc = rows.len();
        if nc == 0 {
            return Err(MetricsError::EmptyInput);
        }
        let mut counts = Vec::with_capacity(nc * nc);
        for row in rows {
            if row.len() != nc {
                return Err(MetricsError::LengthMismatch {
                    what: "confusion matrix row",
                    expected: nc,
                    actual: row.len(),
                });
            }
            counts.extend(row);
        }
        Ok(Self {
            n_classes: nc,
            counts,
        })
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    #[inline]
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual * self.n_classes + predicted]
    }

    pub fn rows(&self) -> Vec<Vec<usize>> {
        self.counts
            .chunks(self.n_classes)
            .map(|r| r.to_vec())
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Element-wise sum of two matrices over the same label set.
    pub fn combine(&self, other: &ConfusionMatrix) -> Result<ConfusionMatrix, MetricsError> {
        if self.n_classes != other.n_classes {
            return Err(MetricsError::ShapeMismatch {
                left: self.n_classes,
                right: other.n_classes,
            });
        }
        Ok(Self {
            n_classes: self.n_classes,
            counts: self
                .counts
                .iter()
                .zip(&other.counts)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }
}
