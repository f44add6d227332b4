//! JSON inputs of the command-line runner.

mod files;
mod precomputed;

pub use files::{DatasetFile, PredictionsFile, read_json};
pub use precomputed::PrecomputedModel;
