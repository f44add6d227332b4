use crate::metrics::MetricsError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-class sample counts of a label vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDistribution {
    pub classes: Vec<usize>,
    pub counts: Vec<usize>,
}

impl TargetDistribution {
    pub fn from_labels(y: &[usize]) -> Result<Self, MetricsError> {
        if y.is_empty() {
            return Err(MetricsError::EmptyInput);
        }
        let mut tally: BTreeMap<usize, usize> = BTreeMap::new();
        for &label in y {
            *tally.entry(label).or_default() += 1;
        }
        let (classes, counts) = tally.into_iter().unzip();
        Ok(Self { classes, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of the samples held by each class, in class order.
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total() as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    /// A distribution is balanced when every class holds at least
    /// `tolerance` times its even share (`1 / n_classes`).
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        let expected = 1.0 / self.classes.len() as f64;
        self.shares().iter().all(|&s| s >= expected * tolerance)
    }
}
