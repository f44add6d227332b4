//! Interactive and file-driven task selection for the `modeleval` binary.

pub mod cli;
pub mod types;
