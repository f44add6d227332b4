//! Evaluation curves and heuristic guideline reports for classifiers.
//!
//! [`evaluate_model`] checks a single model (balance, accuracy, AUC,
//! general statistics) and [`compare_models`] puts two models side by side.
//! Both return a [`report::Report`] whose sections carry text guidelines
//! and plot data.

pub mod core;
pub mod data;
pub mod evaluation;
pub mod metrics;
pub mod models;
pub mod report;
pub mod settings;
pub mod telemetry;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use evaluation::{ReportContext, compare_models, evaluate_model};
