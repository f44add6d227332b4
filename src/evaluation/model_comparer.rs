use crate::core::check_inputs;
use crate::metrics::{Calibration, ConfusionMatrix, PrecisionRecall, Roc};
use crate::models::{Model, ModelError, computation_time};
use crate::report::{Artifact, Guideline, Report, ReportBuilder, ReportError, ReportSection};
use crate::settings::HeuristicSettings;
use tracing::{debug, warn};

/// Builds the side-by-side report of two models on the same test set.
///
/// Every call into a model is isolated: when one model cannot answer (for
/// instance it has no `predict_proba`), the failure is written into the
/// section and the other model, and the remaining checks, still run.
pub struct ModelComparer<'a> {
    model_a: &'a dyn Model,
    model_b: &'a dyn Model,
    settings: HeuristicSettings,
    report: ReportBuilder,
}

fn calculate_failed(check: &str, id: &str, err: &ModelError) -> String {
    format!("Failed to calculate {check} for model {id}. Error: {err}")
}

impl<'a> ModelComparer<'a> {
    pub fn new(model_a: &'a dyn Model, model_b: &'a dyn Model) -> Self {
        Self::with_settings(model_a, model_b, HeuristicSettings::default())
    }

    pub fn with_settings(
        model_a: &'a dyn Model,
        model_b: &'a dyn Model,
        settings: HeuristicSettings,
    ) -> Self {
        Self {
            model_a,
            model_b,
            settings,
            report: ReportBuilder::default(),
        }
    }

    pub fn section(&self, key: &str) -> Option<&ReportSection> {
        self.report.section(key)
    }

    fn models(&self) -> [(&'static str, &'a dyn Model); 2] {
        [("A", self.model_a), ("B", self.model_b)]
    }

    /// Runs `check` on both models and appends either its guideline or the
    /// failure text. The section is ok only when both models succeed.
    fn per_model<F>(&self, section: &mut ReportSection, check: &str, mut run: F)
    where
        F: FnMut(&str, &dyn Model) -> Result<Guideline, ModelError>,
    {
        let mut failures = 0;
        for (id, model) in self.models() {
            match run(id, model) {
                Ok(g) => section.append_guideline(g),
                Err(e) => {
                    warn!(check, model = model.name(), error = %e, "model check failed");
                    section.append_guideline(calculate_failed(check, id, &e));
                    failures += 1;
                }
            }
        }
        section.set_is_ok(failures == 0);
    }

    pub fn precision_and_recall(&mut self, x_test: &[Vec<f64>], y_true: &[usize]) {
        let mut section = ReportSection::new("precision_recall");
        self.per_model(&mut section, "precision_recall", |_, model| {
            let y_prob = model.predict_proba(x_test)?;
            let pr = PrecisionRecall::from_raw_data(y_true, &y_prob)?;
            Ok(Artifact::PrecisionRecall(pr).into())
        });
        self.report.add_section(section);
    }

    pub fn auc(&mut self, x_test: &[Vec<f64>], y_true: &[usize]) {
        let mut section = ReportSection::new("auc");
        self.per_model(&mut section, "auc", |id, model| {
            let y_score = model.predict_proba(x_test)?;
            let aucs = Roc::from_raw_data(y_true, &y_score)?.aucs()?;
            let text = match aucs.as_slice() {
                [single] => format!("Model {id} AUC (ROC) is {single:?}"),
                many => format!("Model {id} AUC (ROC) are {many:?}"),
            };
            Ok(text.into())
        });
        self.report.add_section(section);
    }

    pub fn computation(&mut self, x_test: &[Vec<f64>]) {
        let mut section = ReportSection::new("computation");
        let a = computation_time(self.model_a, x_test);
        let b = computation_time(self.model_b, x_test);

        if let (Ok(ta), Ok(tb)) = (&a, &b) {
            debug!(model_a = ta, model_b = tb, "compute times measured");
            if (ta - tb).abs() >= self.settings.compute_time_diff_threshold {
                let slower = if ta > tb { "A" } else { "B" };
                section.append_guideline(format!(
                    "Model {slower} is a lot more computational expensive"
                ));
            }
        }

        let mut failures = 0;
        for (id, timing) in [("A", a), ("B", b)] {
            match timing {
                Ok(t) => section.append_guideline(format!("Model {id} compute time is {t} (seconds)")),
                Err(e) => {
                    warn!(check = "computation", model = id, error = %e, "model check failed");
                    section.append_guideline(calculate_failed("computation", id, &e));
                    failures += 1;
                }
            }
        }
        section.set_is_ok(failures == 0);
        self.report.add_section(section);
    }

    pub fn calibration(&mut self, x_test: &[Vec<f64>], y_true: &[usize]) {
        let mut section = ReportSection::new("calibration");
        let n_bins = self.settings.calibration_bins;
        self.per_model(&mut section, "calibration", |id, model| {
            let y_prob = model.predict_proba(x_test)?;
            let mut curve = Calibration::from_raw_data(y_true, &y_prob, n_bins)?;
            curve.label = Some(format!("Model {id}"));
            Ok(Artifact::Calibration(curve).into())
        });
        self.report.add_section(section);
    }

    /// Sums both models' confusion matrices over the shared label set.
    ///
    /// Predictions that do not line up with `y_true` are a fatal input error.
    pub fn add_combined_cm(
        &mut self,
        x_test: &[Vec<f64>],
        y_true: &[usize],
    ) -> Result<(), ReportError> {
        let mut section = ReportSection::new("combined_confusion_matrix");

        match (self.model_a.predict(x_test), self.model_b.predict(x_test)) {
            (Ok(pred_a), Ok(pred_b)) => {
                check_inputs(y_true, &pred_a)?;
                check_inputs(y_true, &pred_b)?;
                let n_classes = y_true
                    .iter()
                    .chain(&pred_a)
                    .chain(&pred_b)
                    .copied()
                    .max()
                    .map_or(0, |m| m + 1);

                let cm_a = ConfusionMatrix::from_labels(y_true, &pred_a, Some(n_classes))?;
                let cm_b = ConfusionMatrix::from_labels(y_true, &pred_b, Some(n_classes))?;
                section.append_guideline(Artifact::ConfusionMatrix(cm_a.combine(&cm_b)?));
                section.set_is_ok(true);
            }
            (a, b) => {
                for (id, outcome) in [("A", a), ("B", b)] {
                    if let Err(e) = outcome {
                        warn!(check = "combined_confusion_matrix", model = id, error = %e, "model check failed");
                        section.append_guideline(calculate_failed("combined_confusion_matrix", id, &e));
                    }
                }
            }
        }

        self.report.add_section(section);
        Ok(())
    }

    pub fn create_report(self, title: impl Into<String>) -> Report {
        self.report.create_report(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScoreMatrix;
    use crate::testing::{FailingModel, FixedModel, SlowModel};
    use std::time::Duration;

    fn rows(n: usize) -> Vec<Vec<f64>> {
        vec![vec![0.0]; n]
    }

    fn y_true() -> Vec<usize> {
        vec![0, 0, 1, 1]
    }

    fn proba_model() -> FixedModel {
        FixedModel::new(vec![0, 1, 1, 1]).with_probabilities(
            ScoreMatrix::new(vec![
                vec![0.9, 0.1],
                vec![0.6, 0.4],
                vec![0.65, 0.35],
                vec![0.2, 0.8],
            ])
            .unwrap(),
        )
    }

    fn multiclass_model() -> FixedModel {
        FixedModel::new(vec![0, 1, 2, 2]).with_probabilities(
            ScoreMatrix::new(vec![
                vec![0.8, 0.1, 0.1],
                vec![0.1, 0.8, 0.1],
                vec![0.1, 0.1, 0.8],
                vec![0.2, 0.2, 0.6],
            ])
            .unwrap(),
        )
    }

    #[test]
    fn precision_recall_isolates_missing_probabilities() {
        let a = proba_model();
        let b = FixedModel::new(vec![0, 0, 1, 1]);
        let mut mc = ModelComparer::new(&a, &b);
        mc.precision_and_recall(&rows(4), &y_true());

        let s = mc.section("precision_recall").unwrap();
        assert_eq!(s.title(), "precision recall");
        assert_eq!(s.guidelines().len(), 2);
        assert!(matches!(
            s.guidelines()[0].as_artifact(),
            Some(Artifact::PrecisionRecall(_))
        ));
        let failure = s.guidelines()[1].as_text().unwrap();
        assert!(failure.starts_with("Failed to calculate precision_recall for model B."));
        assert!(failure.contains("predict_proba"));
        assert!(!s.is_ok());
    }

    #[test]
    fn auc_wording_depends_on_class_count() {
        let a = proba_model();
        let b = multiclass_model();
        let mut mc = ModelComparer::new(&a, &b);
        mc.auc(&rows(4), &[0, 0, 1, 1]);
        let s = mc.section("auc").unwrap();
        assert_eq!(s.guidelines()[0].as_text(), Some("Model A AUC (ROC) is 0.75"));
        // class 2 has no positive sample in y_true, so model B fails
        assert!(s.guidelines()[1]
            .as_text()
            .unwrap()
            .starts_with("Failed to calculate auc for model B"));

        let mut mc = ModelComparer::new(&b, &a);
        mc.auc(&rows(4), &[0, 1, 2, 2]);
        let s = mc.section("auc").unwrap();
        assert_eq!(
            s.guidelines()[0].as_text(),
            Some("Model A AUC (ROC) are [1.0, 1.0, 1.0]")
        );
    }

    #[test]
    fn perfect_auc_is_printed_like_the_multiclass_list() {
        let a = FixedModel::new(vec![0, 0, 1, 1]).with_probabilities(
            ScoreMatrix::from_binary_scores(vec![0.1, 0.2, 0.8, 0.9]).unwrap(),
        );
        let mut mc = ModelComparer::new(&a, &a);
        mc.auc(&rows(4), &y_true());
        let s = mc.section("auc").unwrap();
        assert_eq!(s.guidelines()[0].as_text(), Some("Model A AUC (ROC) is 1.0"));
        assert_eq!(s.guidelines()[1].as_text(), Some("Model B AUC (ROC) is 1.0"));
        assert!(s.is_ok());
    }

    #[test]
    fn computation_names_the_slower_model() {
        let a = SlowModel::new(vec![0, 1], Duration::from_millis(60));
        let b = FixedModel::new(vec![0, 1]);
        let mut settings = HeuristicSettings::default();
        settings.compute_time_diff_threshold = 0.03;
        let mut mc = ModelComparer::with_settings(&a, &b, settings);
        mc.computation(&rows(2));

        let s = mc.section("computation").unwrap();
        let texts: Vec<_> = s.texts().collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0], "Model A is a lot more computational expensive");
        assert!(texts[1].starts_with("Model A compute time is "));
        assert!(texts[2].starts_with("Model B compute time is "));
        assert!(s.is_ok());
    }

    #[test]
    fn computation_without_significant_difference_lists_times_only() {
        let a = FixedModel::new(vec![0, 1]);
        let b = FixedModel::new(vec![1, 0]);
        let mut mc = ModelComparer::new(&a, &b);
        mc.computation(&rows(2));
        let s = mc.section("computation").unwrap();
        assert_eq!(s.texts().count(), 2);
        assert!(s.texts().all(|t| t.ends_with("(seconds)")));
    }

    #[test]
    fn computation_failure_is_isolated() {
        let a = FixedModel::new(vec![0, 1]);
        let mut mc = ModelComparer::new(&a, &FailingModel);
        mc.computation(&rows(2));
        let s = mc.section("computation").unwrap();
        let texts: Vec<_> = s.texts().collect();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].starts_with("Model A compute time is "));
        assert!(texts[1].starts_with("Failed to calculate computation for model B"));
        assert!(!s.is_ok());
    }

    #[test]
    fn calibration_supports_binary_only() {
        let a = proba_model();
        let b = multiclass_model();
        let mut mc = ModelComparer::new(&a, &b);
        mc.calibration(&rows(4), &[0, 0, 1, 1]);
        let s = mc.section("calibration").unwrap();
        match s.guidelines()[0].as_artifact() {
            Some(Artifact::Calibration(c)) => {
                assert_eq!(c.label.as_deref(), Some("Model A"));
                assert_eq!(c.n_bins, 10);
            }
            other => panic!("unexpected guideline: {other:?}"),
        }
        assert!(s.guidelines()[1]
            .as_text()
            .unwrap()
            .contains("expected binary scores"));
    }

    #[test]
    fn combined_confusion_matrix_is_the_sum() {
        let a = FixedModel::new(vec![0, 1, 1, 1]);
        let b = FixedModel::new(vec![0, 0, 0, 1]);
        let mut mc = ModelComparer::new(&a, &b);
        mc.add_combined_cm(&rows(4), &y_true()).unwrap();

        let s = mc.section("combined_confusion_matrix").unwrap();
        assert!(s.is_ok());
        match s.guidelines()[0].as_artifact() {
            Some(Artifact::ConfusionMatrix(cm)) => {
                // a: [[1,1],[0,2]]  b: [[2,0],[1,1]]
                assert_eq!(cm.rows(), vec![vec![3, 1], vec![1, 3]]);
            }
            other => panic!("unexpected guideline: {other:?}"),
        }
    }

    #[test]
    fn combined_matrix_covers_labels_only_one_model_predicts() {
        let a = FixedModel::new(vec![0, 1, 2, 1]);
        let b = FixedModel::new(vec![0, 1, 1, 1]);
        let mut mc = ModelComparer::new(&a, &b);
        mc.add_combined_cm(&rows(4), &y_true()).unwrap();
        match mc.section("combined_confusion_matrix").unwrap().guidelines()[0].as_artifact() {
            Some(Artifact::ConfusionMatrix(cm)) => assert_eq!(cm.n_classes(), 3),
            other => panic!("unexpected guideline: {other:?}"),
        }
    }

    #[test]
    fn combined_matrix_with_short_predictions_is_fatal() {
        let a = FixedModel::new(vec![0, 1, 1, 1]);
        let b = FixedModel::lenient(vec![0, 1]);
        let mut mc = ModelComparer::new(&a, &b);
        let err = mc.add_combined_cm(&rows(4), &y_true()).unwrap_err();
        assert!(matches!(err, ReportError::Metrics(_)));
    }

    #[test]
    fn combined_matrix_records_prediction_failures() {
        let a = FixedModel::new(vec![0, 1, 1, 1]);
        let mut mc = ModelComparer::new(&a, &FailingModel);
        mc.add_combined_cm(&rows(4), &y_true()).unwrap();
        let s = mc.section("combined_confusion_matrix").unwrap();
        assert_eq!(s.guidelines().len(), 1);
        assert!(!s.is_ok());
    }

    #[test]
    fn full_pass_produces_five_sections() {
        let a = proba_model();
        let b = FixedModel::new(vec![0, 0, 1, 1]);
        let mut mc = ModelComparer::new(&a, &b);
        let x = rows(4);
        let y = y_true();
        mc.precision_and_recall(&x, &y);
        mc.auc(&x, &y);
        mc.computation(&x);
        mc.calibration(&x, &y);
        mc.add_combined_cm(&x, &y).unwrap();

        let r = mc.create_report("Compare models");
        let keys: Vec<_> = r.sections().iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            vec![
                "precision_recall",
                "auc",
                "computation",
                "calibration",
                "combined_confusion_matrix"
            ]
        );
    }
}
