use crate::data::{DatasetFile, PrecomputedModel, PredictionsFile, read_json};
use crate::evaluation::ReportContext;
use crate::report::{Report, ReportError};
use crate::settings::HeuristicSettings;
use crate::telemetry::Telemetry;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::TaskChoice;
use std::path::{Path, PathBuf};
use tracing::info;

fn load_settings(path: Option<&PathBuf>) -> Result<HeuristicSettings, BuildError> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading heuristic settings");
            Ok(HeuristicSettings::from_json_file(p)?)
        }
        None => Ok(HeuristicSettings::default()),
    }
}

fn ensure_distinct(output: &Path, inputs: &[&Path]) -> Result<(), BuildError> {
    if inputs.iter().any(|i| *i == output) {
        return Err(BuildError::InvalidParameter(format!(
            "output_path {} would overwrite an input file",
            output.display()
        )));
    }
    Ok(())
}

/// Loads the task's files and builds its report.
pub fn build_report(task: &TaskChoice, telemetry: Telemetry) -> Result<Report, BuildError> {
    match task {
        TaskChoice::EvaluateModel(p) => {
            ensure_distinct(&p.output_path, &[&p.predictions_path])?;
            let ctx = ReportContext::new(load_settings(p.settings_path.as_ref())?, telemetry)?;
            let preds: PredictionsFile = read_json(&p.predictions_path)?;
            let model = PrecomputedModel {
                name: "predictions".into(),
                predictions: preds.y_pred.clone(),
                probabilities: preds.y_score.clone(),
            };
            Ok(ctx.evaluate_model(&preds.y_true, &preds.y_pred, &model, preds.y_score.as_ref())?)
        }
        TaskChoice::CompareModels(p) => {
            ensure_distinct(
                &p.output_path,
                &[&p.model_a_path, &p.model_b_path, &p.dataset_path],
            )?;
            let ctx = ReportContext::new(load_settings(p.settings_path.as_ref())?, telemetry)?;
            let a: PrecomputedModel = read_json(&p.model_a_path)?;
            let b: PrecomputedModel = read_json(&p.model_b_path)?;
            let dataset: DatasetFile = read_json(&p.dataset_path)?;
            Ok(ctx.compare_models(&a, &b, &dataset.x_train, &dataset.x_test(), &dataset.y_true)?)
        }
    }
}

/// Builds the report and writes it to the task's output path.
pub fn run_task(task: &TaskChoice, telemetry: Telemetry) -> Result<Report, BuildError> {
    let report = build_report(task, telemetry)?;
    report
        .save_json(task.output_path())
        .map_err(ReportError::from)?;
    info!(path = %task.output_path().display(), sections = report.sections().len(), "report written");
    Ok(report)
}
