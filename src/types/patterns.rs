//! Aggregate views over the entry corpus

use serde::{Deserialize, Serialize};

use crate::types::SentimentBucket;

/// Entries per emotion label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCount {
    pub emotion: String,
    pub count: usize,
}

/// Summary statistics over all sentiment scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    /// Sample standard deviation; `None` with fewer than two entries
    pub std_dev: Option<f64>,
}

/// How often an (emotion, sentiment bucket) pair occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub emotion: String,
    pub bucket: SentimentBucket,
    pub count: usize,
}

/// How often `from` is immediately followed by `to` in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Everything the insights view shows. Recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub total_entries: usize,
    /// Descending by count, ties in first-seen order
    pub emotion_frequency: Vec<LabelCount>,
    /// `None` on an empty corpus
    pub sentiment_stats: Option<SentimentStats>,
    pub common_combinations: Vec<Combination>,
    pub transitions: Vec<Transition>,
    pub low_sentiment_words: Vec<WordCount>,
}

impl PatternSummary {
    pub fn empty() -> Self {
        Self {
            total_entries: 0,
            emotion_frequency: Vec::new(),
            sentiment_stats: None,
            common_combinations: Vec::new(),
            transitions: Vec::new(),
            low_sentiment_words: Vec::new(),
        }
    }

    /// Transition count for a pair, 0 if absent
    pub fn transition_count(&self, from: &str, to: &str) -> usize {
        self.transitions
            .iter()
            .find(|t| t.from == from && t.to == to)
            .map(|t| t.count)
            .unwrap_or(0)
    }
}
