mod error;
mod tasks;

pub use error::BuildError;
pub use tasks::{build_report, run_task};
