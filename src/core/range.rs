use crate::metrics::MetricsError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed numeric interval `[low, high]`.
///
/// Both bounds belong to the range, so a value sitting exactly on a shared
/// boundary (e.g. `0.6` for `[0, 0.6]` and `(0.6, 0.7)`) is a member of the
/// range that ends there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RangeBounds")]
pub struct Range {
    low: f64,
    high: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
struct RangeBounds {
    low: f64,
    high: f64,
}

impl TryFrom<RangeBounds> for Range {
    type Error = MetricsError;

    fn try_from(b: RangeBounds) -> Result<Self, Self::Error> {
        Range::new(b.low, b.high)
    }
}

impl Range {
    pub fn new(low: f64, high: f64) -> Result<Self, MetricsError> {
        if low.is_nan() || high.is_nan() || low > high {
            return Err(MetricsError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Constructor for bounds known to be ordered.
    pub(crate) fn from_ordered(low: f64, high: f64) -> Self {
        debug_assert!(low <= high);
        Self { low, high }
    }

    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        let err = Range::new(0.8, 0.7).unwrap_err();
        assert_eq!(err, MetricsError::InvalidRange { low: 0.8, high: 0.7 });
        assert!(Range::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn degenerate_range_holds_single_point() {
        let r = Range::new(0.5, 0.5).unwrap();
        assert!(r.contains(0.5));
        assert!(!r.contains(0.5000001));
    }

    #[test]
    fn membership_is_inclusive_on_both_ends() {
        let r = Range::new(0.7, 0.8).unwrap();
        assert!(r.contains(0.7));
        assert!(r.contains(0.8));
        assert!(r.contains(0.75));
        assert!(!r.contains(0.69999));
        assert!(!r.contains(0.80001));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn deserialization_validates_bounds() {
        let ok: Range = serde_json::from_str(r#"{"low":0.0,"high":0.6}"#).unwrap();
        assert_eq!(ok.high(), 0.6);

        let bad = serde_json::from_str::<Range>(r#"{"low":1.0,"high":0.0}"#);
        assert!(bad.is_err());
    }
}
