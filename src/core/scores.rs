use crate::metrics::MetricsError;
use serde::{Deserialize, Serialize};

/// Dense `n_samples x n_columns` matrix of estimator scores.
///
/// Column `c` holds the score for class `c`. A single column is read as the
/// positive-class score of a binary problem; two columns are read as
/// `[negative, positive]`; more columns mean a multi-class problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScores", into = "Vec<Vec<f64>>")]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
    n_columns: usize,
}

impl ScoreMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, MetricsError> {
        let Some(first) = rows.first() else {
            return Err(MetricsError::EmptyInput);
        };
        let n_columns = first.len();
        if n_columns == 0 {
            return Err(MetricsError::InvalidScores("rows have no columns".into()));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_columns {
                return Err(MetricsError::InvalidScores(format!(
                    "row {i} has {} columns, expected {n_columns}",
                    row.len()
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(MetricsError::InvalidScores(format!(
                    "row {i} contains a non-finite score"
                )));
            }
        }
        Ok(Self { rows, n_columns })
    }

    /// Wraps a flat vector of positive-class scores as a one-column matrix.
    pub fn from_binary_scores(scores: Vec<f64>) -> Result<Self, MetricsError> {
        Self::new(scores.into_iter().map(|s| vec![s]).collect())
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    #[inline]
    pub fn is_multiclass(&self) -> bool {
        self.n_columns > 2
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn column(&self, c: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[c]).collect()
    }

    /// Scores of the positive class (label `1`) for binary problems.
    pub fn positive_scores(&self) -> Result<Vec<f64>, MetricsError> {
        match self.n_columns {
            1 => Ok(self.column(0)),
            2 => Ok(self.column(1)),
            n => Err(MetricsError::NotBinary { n_columns: n }),
        }
    }

    /// All values, row after row.
    pub fn ravel(&self) -> Vec<f64> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Number of classes the matrix can score; one column still means two classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_columns.max(2)
    }

    /// Checks that `y_true` has one entry per row and no label without a column.
    pub fn check_labels(&self, y_true: &[usize]) -> Result<(), MetricsError> {
        if y_true.is_empty() {
            return Err(MetricsError::EmptyInput);
        }
        self.ensure_samples(y_true.len())?;
        if let Some(&bad) = y_true.iter().find(|&&y| y >= self.n_classes()) {
            return Err(MetricsError::InvalidScores(format!(
                "label {bad} has no score column"
            )));
        }
        Ok(())
    }

    pub fn ensure_samples(&self, expected: usize) -> Result<(), MetricsError> {
        if self.n_samples() != expected {
            return Err(MetricsError::LengthMismatch {
                what: "y_score",
                expected,
                actual: self.n_samples(),
            });
        }
        Ok(())
    }
}

/// Serialized scores: nested rows, or a flat list of positive-class scores.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScores {
    Rows(Vec<Vec<f64>>),
    Flat(Vec<f64>),
}

impl TryFrom<RawScores> for ScoreMatrix {
    type Error = MetricsError;

    fn try_from(raw: RawScores) -> Result<Self, Self::Error> {
        match raw {
            RawScores::Rows(rows) => Self::new(rows),
            RawScores::Flat(scores) => Self::from_binary_scores(scores),
        }
    }
}

impl From<ScoreMatrix> for Vec<Vec<f64>> {
    fn from(m: ScoreMatrix) -> Self {
        m.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_ragged() {
        assert_eq!(ScoreMatrix::new(vec![]).unwrap_err(), MetricsError::EmptyInput);
        assert!(ScoreMatrix::new(vec![vec![]]).is_err());
        assert!(ScoreMatrix::new(vec![vec![0.1, 0.9], vec![0.3]]).is_err());
        assert!(ScoreMatrix::new(vec![vec![f64::NAN]]).is_err());
    }

    #[test]
    fn positive_scores_follow_column_count() {
        let one = ScoreMatrix::from_binary_scores(vec![0.2, 0.7]).unwrap();
        assert_eq!(one.positive_scores().unwrap(), vec![0.2, 0.7]);

        let two = ScoreMatrix::new(vec![vec![0.8, 0.2], vec![0.3, 0.7]]).unwrap();
        assert_eq!(two.positive_scores().unwrap(), vec![0.2, 0.7]);
        assert!(!two.is_multiclass());

        let three = ScoreMatrix::new(vec![vec![0.2, 0.3, 0.5]]).unwrap();
        assert!(three.is_multiclass());
        assert_eq!(
            three.positive_scores().unwrap_err(),
            MetricsError::NotBinary { n_columns: 3 }
        );
    }

    #[test]
    fn check_labels_rejects_unscored_classes() {
        let m = ScoreMatrix::new(vec![vec![0.2, 0.8], vec![0.6, 0.4]]).unwrap();
        assert!(m.check_labels(&[0, 1]).is_ok());
        assert!(m.check_labels(&[0, 2]).is_err());
        assert!(m.check_labels(&[0]).is_err());
        assert_eq!(m.check_labels(&[]).unwrap_err(), MetricsError::EmptyInput);
    }

    #[test]
    fn deserializes_from_nested_arrays() {
        let m: ScoreMatrix = serde_json::from_str("[[0.1,0.9],[0.6,0.4]]").unwrap();
        assert_eq!(m.n_samples(), 2);
        assert_eq!(m.ravel(), vec![0.1, 0.9, 0.6, 0.4]);
        assert!(serde_json::from_str::<ScoreMatrix>("[[0.1],[0.6,0.4]]").is_err());
    }

    #[test]
    fn flat_list_is_one_positive_column() {
        let m: ScoreMatrix = serde_json::from_str("[0.1, 0.9, 0.4]").unwrap();
        assert_eq!(m.n_columns(), 1);
        assert_eq!(m.positive_scores().unwrap(), vec![0.1, 0.9, 0.4]);
    }
}
