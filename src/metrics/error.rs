use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("empty input")]
    EmptyInput,

    #[error("{what} length {actual} != expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("no positive samples")]
    NoPositiveSamples,

    #[error("no negative samples")]
    NoNegativeSamples,

    #[error("expected binary scores, got {n_columns} columns")]
    NotBinary { n_columns: usize },

    #[error("invalid scores: {0}")]
    InvalidScores(String),

    #[error("x values are neither increasing nor decreasing")]
    NonMonotonic,

    #[error("shape mismatch: {left}x{left} vs {right}x{right}")]
    ShapeMismatch { left: usize, right: usize },

    #[error("invalid range: low {low} > high {high}")]
    InvalidRange { low: f64, high: f64 },

    #[error("{n_classes} classes exceed the supported maximum of {max}; labels must be dense class indices")]
    TooManyClasses { n_classes: usize, max: usize },
}

impl MetricsError {
    /// The labels hold a single class, so a ranking curve is undefined.
    pub fn is_single_class(&self) -> bool {
        matches!(self, Self::NoPositiveSamples | Self::NoNegativeSamples)
    }
}
