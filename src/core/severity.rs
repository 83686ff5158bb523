//! Severity mapper and sentiment buckets
//!
//! Boundaries use `<=` throughout, so an exact boundary value lands in the
//! lower (more severe) tier: -0.3 is HIGH, not MODERATE.

use crate::types::{SentimentBucket, SeverityTier};
use crate::{
    BUCKET_NEGATIVE_BELOW, BUCKET_POSITIVE_ABOVE, SEVERITY_CRITICAL_MAX, SEVERITY_GOOD_MAX,
    SEVERITY_HIGH_MAX, SEVERITY_MODERATE_MAX,
};

/// Display tier for a sentiment score. Total over all floats; NaN maps to
/// EXCELLENT since every comparison fails.
pub fn severity_of(sentiment: f64) -> SeverityTier {
    if sentiment <= SEVERITY_CRITICAL_MAX {
        SeverityTier::Critical
    } else if sentiment <= SEVERITY_HIGH_MAX {
        SeverityTier::High
    } else if sentiment <= SEVERITY_MODERATE_MAX {
        SeverityTier::Moderate
    } else if sentiment <= SEVERITY_GOOD_MAX {
        SeverityTier::Good
    } else {
        SeverityTier::Excellent
    }
}

/// Three-way bucket used by combination counts
pub fn bucket_of(sentiment: f64) -> SentimentBucket {
    if sentiment > BUCKET_POSITIVE_ABOVE {
        SentimentBucket::Positive
    } else if sentiment < BUCKET_NEGATIVE_BELOW {
        SentimentBucket::Negative
    } else {
        SentimentBucket::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_boundaries() {
        assert_eq!(severity_of(-1.0), SeverityTier::Critical);
        assert_eq!(severity_of(-0.7), SeverityTier::Critical);
        assert_eq!(severity_of(-0.3), SeverityTier::High);
        assert_eq!(severity_of(0.3), SeverityTier::Moderate);
        assert_eq!(severity_of(0.7), SeverityTier::Good);
        assert_eq!(severity_of(1.0), SeverityTier::Excellent);
    }

    #[test]
    fn test_just_above_boundaries() {
        let eps = 1e-9;
        assert_eq!(severity_of(-0.7 + eps), SeverityTier::High);
        assert_eq!(severity_of(-0.3 + eps), SeverityTier::Moderate);
        assert_eq!(severity_of(0.3 + eps), SeverityTier::Good);
        assert_eq!(severity_of(0.7 + eps), SeverityTier::Excellent);
    }

    #[test]
    fn test_partition_is_monotonic() {
        let order = [
            SeverityTier::Critical,
            SeverityTier::High,
            SeverityTier::Moderate,
            SeverityTier::Good,
            SeverityTier::Excellent,
        ];
        let rank = |t: SeverityTier| order.iter().position(|o| *o == t).unwrap();
        let mut prev = 0;
        for i in 0..=2000 {
            let s = -1.0 + i as f64 / 1000.0;
            let r = rank(severity_of(s));
            assert!(r >= prev, "tier went backwards at {}", s);
            prev = r;
        }
        assert_eq!(prev, 4);
    }

    #[test]
    fn test_buckets_are_exclusive() {
        assert_eq!(bucket_of(0.3), SentimentBucket::Neutral);
        assert_eq!(bucket_of(0.31), SentimentBucket::Positive);
        assert_eq!(bucket_of(-0.3), SentimentBucket::Neutral);
        assert_eq!(bucket_of(-0.31), SentimentBucket::Negative);
    }
}
