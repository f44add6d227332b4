pub mod memory_sink;
pub mod models;

pub use memory_sink::MemorySink;
pub use models::{FailingModel, FixedModel, SlowModel};
