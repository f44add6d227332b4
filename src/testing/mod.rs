pub mod dummies;
pub mod stubs;

pub use dummies::SyntheticBinary;
pub use stubs::{FailingModel, FixedModel, MemorySink, SlowModel};
