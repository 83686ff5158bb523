//! Output structures for terminal display

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{Classification, CrisisMatch, CrisisTier, SeverityTier};

/// One-shot analysis of a piece of text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Polarity in [-1, 1]
    pub sentiment: f64,
    /// Winning emotion label
    pub emotion: String,
    /// Classifier confidence for `emotion`
    pub confidence: f64,
    /// Display tier of the sentiment
    pub severity: SeverityTier,
    /// Crisis tier, `none` when clear
    pub crisis: CrisisTier,
    /// Which keyword raised the tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_match: Option<CrisisMatch>,
    /// Emoji for the emotion, empty if unmapped
    pub emoji: String,
}

impl AnalysisOutput {
    /// Create new output
    pub fn new(
        classification: &Classification,
        severity: SeverityTier,
        crisis_match: Option<CrisisMatch>,
        emoji: &str,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            sentiment: classification.sentiment,
            emotion: classification.emotion.clone(),
            confidence: classification.confidence,
            severity,
            crisis: crisis_match
                .as_ref()
                .map(|m| m.tier)
                .unwrap_or(CrisisTier::None),
            crisis_match,
            emoji: emoji.to_string(),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let mut line = format!(
            "{} {} ({:.0}%) | sentiment={:+.3} | severity={}",
            self.emoji,
            self.emotion.bold(),
            self.confidence * 100.0,
            self.sentiment,
            self.severity.as_str().color(self.severity.color()),
        );
        if self.crisis.is_crisis() {
            line.push_str(&format!(
                " | {}",
                format!("CRISIS={}", self.crisis).color(self.crisis.color()).bold()
            ));
        }
        line
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "emotion={} | confidence={:.3} | sentiment={:.3} | severity={} | crisis={}",
            self.emotion, self.confidence, self.sentiment, self.severity, self.crisis
        )
    }
}
