mod api;
mod model_comparer;
mod model_evaluator;

pub use api::{ReportContext, compare_models, evaluate_model};
pub use model_comparer::ModelComparer;
pub use model_evaluator::{AucBand, Balance, ModelEvaluator};
