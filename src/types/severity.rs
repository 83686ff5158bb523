//! Display tiers derived from a sentiment score

use colored::Color;
use serde::{Deserialize, Serialize};

/// Five display buckets over [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    /// [-1.0, -0.7]
    Critical,
    /// (-0.7, -0.3]
    High,
    /// (-0.3, 0.3]
    Moderate,
    /// (0.3, 0.7]
    Good,
    /// (0.7, 1.0]
    Excellent,
}

impl SeverityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "critical",
            SeverityTier::High => "high",
            SeverityTier::Moderate => "moderate",
            SeverityTier::Good => "good",
            SeverityTier::Excellent => "excellent",
        }
    }

    /// Terminal colour
    pub fn color(&self) -> Color {
        match self {
            SeverityTier::Critical => Color::Red,
            SeverityTier::High => Color::BrightRed,
            SeverityTier::Moderate => Color::Yellow,
            SeverityTier::Good => Color::Green,
            SeverityTier::Excellent => Color::BrightGreen,
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse three-way split used by the combination counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    /// > 0.3
    Positive,
    /// < -0.3
    Negative,
    Neutral,
}

impl SentimentBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentBucket::Positive => "positive",
            SentimentBucket::Negative => "negative",
            SentimentBucket::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
