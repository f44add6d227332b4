//! Classification metrics and the curve data behind every report plot.

mod accuracy;
mod calibration;
mod confusion_matrix;
mod cumulative_gain;
mod error;
mod precision_recall;
mod roc;
mod target;

pub use accuracy::accuracy_score;
pub use calibration::{Calibration, CalibrationCurve, calibration_curve};
pub use confusion_matrix::ConfusionMatrix;
pub use cumulative_gain::{CumulativeGain, GainCurve, cumulative_gain_curve};
pub use error::MetricsError;
pub use precision_recall::{PrCurve, PrecisionRecall, precision_recall_curve};
pub use roc::{Roc, RocCurve, auc, roc_curve};
pub use target::TargetDistribution;
