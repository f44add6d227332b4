use crate::core::ScoreMatrix;
use crate::report::ReportError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Deserializes a whole JSON file.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ReportError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Labels, predictions and optional scores of a model that already ran.
///
/// Labels are dense class indices `0..n_classes`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionsFile {
    pub y_true: Vec<usize>,
    pub y_pred: Vec<usize>,
    #[serde(default)]
    pub y_score: Option<ScoreMatrix>,
}

/// Features and labels shared by the models under comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub x_train: Vec<Vec<f64>>,
    /// Defaults to one empty row per label when the models ignore features.
    #[serde(default)]
    pub x_test: Option<Vec<Vec<f64>>>,
    pub y_true: Vec<usize>,
}

impl DatasetFile {
    pub fn x_test(&self) -> Vec<Vec<f64>> {
        self.x_test
            .clone()
            .unwrap_or_else(|| vec![Vec::new(); self.y_true.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn predictions_with_and_without_scores() {
        let f = write(r#"{"y_true": [0, 1], "y_pred": [0, 0], "y_score": [[0.8, 0.2], [0.6, 0.4]]}"#);
        let p: PredictionsFile = read_json(f.path()).unwrap();
        assert_eq!(p.y_pred, vec![0, 0]);
        assert_eq!(p.y_score.unwrap().n_columns(), 2);

        let f = write(r#"{"y_true": [0, 1], "y_pred": [0, 0]}"#);
        let p: PredictionsFile = read_json(f.path()).unwrap();
        assert!(p.y_score.is_none());
    }

    #[test]
    fn ragged_scores_fail_to_load() {
        let f = write(r#"{"y_true": [0, 1], "y_pred": [0, 0], "y_score": [[0.8, 0.2], [0.6]]}"#);
        let err = read_json::<PredictionsFile, _>(f.path()).unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn dataset_without_features_gets_placeholder_rows() {
        let f = write(r#"{"y_true": [0, 1, 1]}"#);
        let d: DatasetFile = read_json(f.path()).unwrap();
        assert!(d.x_train.is_empty());
        assert_eq!(d.x_test().len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<DatasetFile, _>(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
