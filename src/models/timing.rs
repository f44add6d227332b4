use crate::models::{Model, ModelError};
use std::time::Instant;

/// Wall-clock seconds spent in one `predict` call over `x`.
pub fn computation_time(model: &dyn Model, x: &[Vec<f64>]) -> Result<f64, ModelError> {
    let start = Instant::now();
    model.predict(x)?;
    Ok(start.elapsed().as_secs_f64())
}
