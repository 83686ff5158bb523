//! Emotion classification results

use serde::{Deserialize, Serialize};

/// Affinity of a text for one candidate label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    /// Normalised across all candidates (sums to 1.0)
    pub score: f64,
}

/// Sentiment + emotion for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Polarity in [-1, 1]
    pub sentiment: f64,
    /// Winning label from the configured taxonomy
    pub emotion: String,
    /// Score of the winning label
    pub confidence: f64,
}

impl Classification {
    /// Neutral defaults for blank input
    pub fn neutral(label: &str) -> Self {
        Self {
            sentiment: 0.0,
            emotion: label.to_string(),
            confidence: 0.0,
        }
    }
}

/// Broad grouping of emotion labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCategory {
    Positive,
    Negative,
    Neutral,
}
