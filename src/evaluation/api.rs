use crate::core::{ScoreMatrix, check_inputs};
use crate::evaluation::{ModelComparer, ModelEvaluator};
use crate::metrics::MetricsError;
use crate::models::Model;
use crate::report::{Report, ReportError};
use crate::settings::HeuristicSettings;
use crate::telemetry::Telemetry;
use serde_json::{Map, Value, json};
use tracing::info;

fn invalid(e: MetricsError) -> ReportError {
    ReportError::InvalidInput(e.to_string())
}

/// Settings and telemetry shared by the report entry points.
#[derive(Default)]
pub struct ReportContext {
    settings: HeuristicSettings,
    telemetry: Telemetry,
}

impl ReportContext {
    pub fn new(settings: HeuristicSettings, telemetry: Telemetry) -> Result<Self, ReportError> {
        settings.validate()?;
        Ok(Self {
            settings,
            telemetry,
        })
    }

    pub fn settings(&self) -> &HeuristicSettings {
        &self.settings
    }

    /// Balance, accuracy, AUC and general statistics for one model.
    ///
    /// Without `y_score` the AUC check is skipped and the report says so.
    pub fn evaluate_model(
        &self,
        y_true: &[usize],
        y_pred: &[usize],
        model: &dyn Model,
        y_score: Option<&ScoreMatrix>,
    ) -> Result<Report, ReportError> {
        let mut args = Map::new();
        args.insert("model".into(), json!(model.name()));
        args.insert("n_samples".into(), json!(y_true.len()));
        args.insert("y_score".into(), json!(y_score.map(ScoreMatrix::n_columns)));

        self.telemetry.log_call(
            "evaluate_model",
            Some("report"),
            args,
            &[("is_report", Value::Bool(true))],
            || -> Result<Report, ReportError> {
                check_inputs(y_true, y_pred).map_err(invalid)?;
                if let Some(scores) = y_score {
                    scores.check_labels(y_true).map_err(invalid)?;
                }

                let mut evaluator = ModelEvaluator::with_settings(model, self.settings.clone());
                let balance = evaluator.evaluate_balance(y_true)?;
                evaluator.evaluate_accuracy(y_true, y_pred, balance)?;
                match y_score {
                    Some(scores) => {
                        evaluator.evaluate_auc(y_true, scores)?;
                    }
                    None => evaluator.note_missing_scores(),
                }
                evaluator.generate_general_stats(y_true, y_pred, y_score)?;
                Ok(evaluator.create_report("Model evaluation"))
            },
        )
    }

    /// Side-by-side checks of two models on the same test set.
    ///
    /// `x_train` only feeds the log line; every check runs on `x_test`.
    pub fn compare_models(
        &self,
        model_a: &dyn Model,
        model_b: &dyn Model,
        x_train: &[Vec<f64>],
        x_test: &[Vec<f64>],
        y_true: &[usize],
    ) -> Result<Report, ReportError> {
        let mut args = Map::new();
        args.insert("model_a".into(), json!(model_a.name()));
        args.insert("model_b".into(), json!(model_b.name()));
        args.insert("n_train".into(), json!(x_train.len()));
        args.insert("n_test".into(), json!(x_test.len()));

        self.telemetry.log_call(
            "compare_models",
            Some("report"),
            args,
            &[("is_report", Value::Bool(true))],
            || -> Result<Report, ReportError> {
                if y_true.is_empty() {
                    return Err(invalid(MetricsError::EmptyInput));
                }
                if x_test.len() != y_true.len() {
                    return Err(invalid(MetricsError::LengthMismatch {
                        what: "x_test",
                        expected: y_true.len(),
                        actual: x_test.len(),
                    }));
                }
                info!(
                    model_a = model_a.name(),
                    model_b = model_b.name(),
                    n_train = x_train.len(),
                    n_test = x_test.len(),
                    "comparing models"
                );

                let mut comparer =
                    ModelComparer::with_settings(model_a, model_b, self.settings.clone());
                comparer.precision_and_recall(x_test, y_true);
                comparer.auc(x_test, y_true);
                comparer.computation(x_test);
                comparer.calibration(x_test, y_true);
                comparer.add_combined_cm(x_test, y_true)?;
                Ok(comparer.create_report("Compare models"))
            },
        )
    }
}

/// [`ReportContext::evaluate_model`] with default settings and telemetry.
pub fn evaluate_model(
    y_true: &[usize],
    y_pred: &[usize],
    model: &dyn Model,
    y_score: Option<&ScoreMatrix>,
) -> Result<Report, ReportError> {
    ReportContext::default().evaluate_model(y_true, y_pred, model, y_score)
}

/// [`ReportContext::compare_models`] with default settings and telemetry.
pub fn compare_models(
    model_a: &dyn Model,
    model_b: &dyn Model,
    x_train: &[Vec<f64>],
    x_test: &[Vec<f64>],
    y_true: &[usize],
) -> Result<Report, ReportError> {
    ReportContext::default().compare_models(model_a, model_b, x_train, x_test, y_true)
}
