pub mod synthetic;

pub use synthetic::SyntheticBinary;
