use crate::core::Range;
use crate::report::ReportError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_accuracy_threshold() -> f64 {
    0.9
}

fn default_auc_low_range() -> Range {
    Range::from_ordered(0.0, 0.6)
}

fn default_auc_acceptable_range() -> Range {
    Range::from_ordered(0.7, 0.8)
}

fn default_balance_tolerance() -> f64 {
    0.5
}

fn default_compute_time_diff_threshold() -> f64 {
    1.0
}

fn default_calibration_bins() -> usize {
    10
}

fn default_guide_url() -> String {
    "https://ploomber.io/blog/".to_string()
}

/// Thresholds and knobs used by the report heuristics.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HeuristicSettings {
    #[serde(default = "default_accuracy_threshold")]
    #[schemars(
        title = "Accuracy threshold",
        description = "Accuracy at or above this value counts as accurate",
        range(min = 0.0, max = 1.0)
    )]
    pub accuracy_threshold: f64,

    #[serde(default = "default_auc_low_range")]
    #[schemars(
        title = "Low AUC range",
        description = "AUC values in this closed range are flagged as low"
    )]
    pub auc_low_range: Range,

    #[serde(default = "default_auc_acceptable_range")]
    #[schemars(
        title = "Acceptable AUC range",
        description = "AUC values in this closed range are acceptable"
    )]
    pub auc_acceptable_range: Range,

    #[serde(default = "default_balance_tolerance")]
    #[schemars(
        title = "Balance tolerance",
        description = "Each class must hold at least this fraction of its even share",
        range(min = 0.0, max = 1.0)
    )]
    pub balance_tolerance: f64,

    #[serde(default = "default_compute_time_diff_threshold")]
    #[schemars(
        title = "Compute time difference",
        description = "Seconds of predict time difference that count as significant",
        range(min = 0.0)
    )]
    pub compute_time_diff_threshold: f64,

    #[serde(default = "default_calibration_bins")]
    #[schemars(
        title = "Calibration bins",
        description = "Number of uniform bins of the calibration curve",
        range(min = 1)
    )]
    pub calibration_bins: usize,

    #[serde(default = "default_guide_url")]
    #[schemars(
        title = "Guide URL",
        description = "Remediation guide linked from failing sections"
    )]
    pub guide_url: String,
}

impl Default for HeuristicSettings {
    fn default() -> Self {
        Self {
            accuracy_threshold: default_accuracy_threshold(),
            auc_low_range: default_auc_low_range(),
            auc_acceptable_range: default_auc_acceptable_range(),
            balance_tolerance: default_balance_tolerance(),
            compute_time_diff_threshold: default_compute_time_diff_threshold(),
            calibration_bins: default_calibration_bins(),
            guide_url: default_guide_url(),
        }
    }
}

impl HeuristicSettings {
    pub fn validate(&self) -> Result<(), ReportError> {
        if !(0.0..=1.0).contains(&self.accuracy_threshold) {
            return Err(ReportError::Settings(format!(
                "accuracy_threshold must be in [0, 1], got {}",
                self.accuracy_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.balance_tolerance) {
            return Err(ReportError::Settings(format!(
                "balance_tolerance must be in [0, 1], got {}",
                self.balance_tolerance
            )));
        }
        if self.compute_time_diff_threshold.is_nan() || self.compute_time_diff_threshold < 0.0 {
            return Err(ReportError::Settings(
                "compute_time_diff_threshold must be >= 0".into(),
            ));
        }
        if self.calibration_bins == 0 {
            return Err(ReportError::Settings("calibration_bins must be > 0".into()));
        }
        Ok(())
    }

    /// Reads settings from a JSON file; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Remediation sentence appended to failing sections.
    pub fn guide_link(&self) -> String {
        format!(
            "To tackle this, check out this <a href='{}' target='_blank'>guide</a>",
            self.guide_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::schema_for;
    use serde_json::{Value, json};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_heuristic_constants() {
        let s = HeuristicSettings::default();
        assert_eq!(s.accuracy_threshold, 0.9);
        assert_eq!(s.auc_low_range, Range::new(0.0, 0.6).unwrap());
        assert_eq!(s.auc_acceptable_range, Range::new(0.7, 0.8).unwrap());
        assert_eq!(s.compute_time_diff_threshold, 1.0);
        assert_eq!(s.calibration_bins, 10);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn missing_fields_apply_defaults() {
        let s: HeuristicSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(s, HeuristicSettings::default());

        let s: HeuristicSettings =
            serde_json::from_value(json!({"accuracy_threshold": 0.8})).unwrap();
        assert_eq!(s.accuracy_threshold, 0.8);
        assert_eq!(s.calibration_bins, 10);
    }

    #[test]
    fn inverted_range_fails_to_deserialize() {
        let r = serde_json::from_value::<HeuristicSettings>(
            json!({"auc_low_range": {"low": 0.6, "high": 0.0}}),
        );
        assert!(r.is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut s = HeuristicSettings::default();
        s.accuracy_threshold = 1.5;
        assert!(matches!(s.validate(), Err(ReportError::Settings(_))));

        let mut s = HeuristicSettings::default();
        s.calibration_bins = 0;
        assert!(s.validate().is_err());

        let mut s = HeuristicSettings::default();
        s.compute_time_diff_threshold = f64::NAN;
        assert!(s.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut tf = NamedTempFile::new().unwrap();
        write!(tf, r#"{{"balance_tolerance": 0.25, "guide_url": "https://example.org"}}"#)
            .unwrap();
        let s = HeuristicSettings::from_json_file(tf.path()).unwrap();
        assert_eq!(s.balance_tolerance, 0.25);
        assert!(s.guide_link().contains("href='https://example.org'"));
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut tf = NamedTempFile::new().unwrap();
        write!(tf, r#"{{"accuracy_threshold": 2.0}}"#).unwrap();
        assert!(HeuristicSettings::from_json_file(tf.path()).is_err());
    }

    #[test]
    fn schema_has_titles() {
        let v = serde_json::to_value(schema_for!(HeuristicSettings)).unwrap();
        let props = v.get("properties").and_then(Value::as_object).unwrap();
        assert_eq!(
            props["accuracy_threshold"].get("title").and_then(Value::as_str),
            Some("Accuracy threshold")
        );
        assert!(props.contains_key("auc_low_range"));
    }
}
