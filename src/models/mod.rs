mod model;
mod timing;

pub use model::{Model, ModelError};
pub use timing::computation_time;
