use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvaluateModelParams {
    #[schemars(
        with = "String",
        title = "Predictions Path",
        description = "JSON file with y_true, y_pred and optional y_score",
        extend("format" = "path", "x-must-exist" = true, "x-extensions" = ["json"])
    )]
    pub predictions_path: PathBuf,

    #[schemars(
        with = "String",
        title = "Output Path",
        description = "Where the JSON report is written",
        extend("format" = "path", "x-must-exist" = false, "x-extensions" = ["json"])
    )]
    pub output_path: PathBuf,

    #[serde(default)]
    #[schemars(
        with = "Option<String>",
        title = "Settings Path",
        description = "Heuristic thresholds as JSON (None = defaults)",
        extend("format" = "path", "x-must-exist" = true, "x-extensions" = ["json"])
    )]
    pub settings_path: Option<PathBuf>,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Print Summary",
        description = "Print the report sections once written?"
    )]
    pub print_summary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompareModelsParams {
    #[schemars(
        with = "String",
        title = "Model A Path",
        description = "JSON file with the name, predictions and optional probabilities of model A",
        extend("format" = "path", "x-must-exist" = true, "x-extensions" = ["json"])
    )]
    pub model_a_path: PathBuf,

    #[schemars(
        with = "String",
        title = "Model B Path",
        description = "Same layout as model A",
        extend("format" = "path", "x-must-exist" = true, "x-extensions" = ["json"])
    )]
    pub model_b_path: PathBuf,

    #[schemars(
        with = "String",
        title = "Dataset Path",
        description = "JSON file with y_true and optional x_train / x_test",
        extend("format" = "path", "x-must-exist" = true, "x-extensions" = ["json"])
    )]
    pub dataset_path: PathBuf,

    #[schemars(
        with = "String",
        title = "Output Path",
        description = "Where the JSON report is written",
        extend("format" = "path", "x-must-exist" = false, "x-extensions" = ["json"])
    )]
    pub output_path: PathBuf,

    #[serde(default)]
    #[schemars(
        with = "Option<String>",
        title = "Settings Path",
        description = "Heuristic thresholds as JSON (None = defaults)",
        extend("format" = "path", "x-must-exist" = true, "x-extensions" = ["json"])
    )]
    pub settings_path: Option<PathBuf>,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Print Summary",
        description = "Print the report sections once written?"
    )]
    pub print_summary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Evaluate Model",
        detailed_message = "Balance, accuracy, AUC and general statistics of one model."
    ))]
    EvaluateModel(EvaluateModelParams),

    #[strum_discriminants(strum(
        message = "Compare Models",
        detailed_message = "Precision-recall, AUC, compute time, calibration and combined confusion matrix of two models."
    ))]
    CompareModels(CompareModelsParams),
}

impl TaskChoice {
    pub fn output_path(&self) -> &Path {
        match self {
            TaskChoice::EvaluateModel(p) => &p.output_path,
            TaskChoice::CompareModels(p) => &p.output_path,
        }
    }

    pub fn print_summary(&self) -> bool {
        match self {
            TaskChoice::EvaluateModel(p) => p.print_summary,
            TaskChoice::CompareModels(p) => p.print_summary,
        }
    }
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::EvaluateModel => json!({
                "output_path": "model_evaluation.json",
                "print_summary": true,
            }),
            TaskKind::CompareModels => json!({
                "output_path": "compare_models.json",
                "print_summary": true,
            }),
        }
    }
}
