mod labels;
mod range;
mod scores;

pub use labels::{MAX_CLASSES, check_inputs, label_binarize};
pub use range::Range;
pub use scores::ScoreMatrix;
