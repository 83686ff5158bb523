//! Pattern analyzer: aggregates over the full entry corpus
//!
//! Entries are put in ascending timestamp order first, so every count
//! breaks ties by first occurrence in time and the output does not depend
//! on the order the store handed the corpus over.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::config::AnalysisConfig;
use crate::core::severity::bucket_of;
use crate::core::text::plain_tokens;
use crate::types::{
    Combination, Entry, LabelCount, PatternSummary, SentimentStats, Transition, WordCount,
};
use crate::{
    MIN_SIGNAL_TOKEN_CHARS, MIN_TRANSITION_ENTRIES, TOP_COMBINATIONS, TOP_LOW_SENTIMENT_WORDS,
    TOP_TRANSITIONS,
};

/// Pure aggregation over a corpus snapshot
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    stop_words: HashSet<String>,
    low_sentiment_threshold: f64,
}

impl PatternAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            stop_words: config
                .lexical_stop_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            low_sentiment_threshold: config.low_sentiment_threshold,
        }
    }

    /// All five aggregates at once
    pub fn analyze(&self, corpus: &[Entry]) -> PatternSummary {
        if corpus.is_empty() {
            return PatternSummary::empty();
        }
        let ordered = chronological(corpus);

        PatternSummary {
            total_entries: ordered.len(),
            emotion_frequency: emotion_frequency(&ordered),
            sentiment_stats: sentiment_stats(&ordered),
            common_combinations: combinations(&ordered),
            transitions: transitions(&ordered),
            low_sentiment_words: self.low_sentiment_words(&ordered),
        }
    }

    /// Most frequent words in entries below the threshold
    pub fn low_sentiment_words(&self, entries: &[&Entry]) -> Vec<WordCount> {
        let tokens = entries
            .iter()
            .filter(|e| e.sentiment < self.low_sentiment_threshold)
            .flat_map(|e| plain_tokens(&e.text))
            .filter(|w| !self.stop_words.contains(w))
            .filter(|w| w.chars().count() > MIN_SIGNAL_TOKEN_CHARS);

        top_counts(tokens, TOP_LOW_SENTIMENT_WORDS)
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect()
    }
}

/// Stable sort by timestamp, oldest first
pub fn chronological(corpus: &[Entry]) -> Vec<&Entry> {
    let mut ordered: Vec<&Entry> = corpus.iter().collect();
    ordered.sort_by_key(|e| e.timestamp);
    ordered
}

/// Entries per label, most frequent first
pub fn emotion_frequency(entries: &[&Entry]) -> Vec<LabelCount> {
    top_counts(entries.iter().map(|e| e.emotion.clone()), usize::MAX)
        .into_iter()
        .map(|(emotion, count)| LabelCount { emotion, count })
        .collect()
}

/// Mean / max / min / sample standard deviation
pub fn sentiment_stats(entries: &[&Entry]) -> Option<SentimentStats> {
    if entries.is_empty() {
        return None;
    }
    let values: Vec<f64> = entries.iter().map(|e| e.sentiment).collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
    let std_dev = if values.len() < 2 {
        None
    } else {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(var.sqrt())
    };

    Some(SentimentStats {
        average: mean,
        highest,
        lowest,
        std_dev,
    })
}

/// Top (emotion, bucket) pairs
pub fn combinations(entries: &[&Entry]) -> Vec<Combination> {
    let pairs = entries
        .iter()
        .map(|e| (e.emotion.clone(), bucket_of(e.sentiment)));

    top_counts(pairs, TOP_COMBINATIONS)
        .into_iter()
        .map(|((emotion, bucket), count)| Combination {
            emotion,
            bucket,
            count,
        })
        .collect()
}

/// Top consecutive label pairs; `entries` must already be in time order
pub fn transitions(entries: &[&Entry]) -> Vec<Transition> {
    if entries.len() < MIN_TRANSITION_ENTRIES {
        return Vec::new();
    }
    let pairs = entries
        .windows(2)
        .map(|w| (w[0].emotion.clone(), w[1].emotion.clone()));

    top_counts(pairs, TOP_TRANSITIONS)
        .into_iter()
        .map(|((from, to), count)| Transition { from, to, count })
        .collect()
}

/// Count items, sort by count descending with first-seen order on ties
fn top_counts<K: Eq + Hash + Clone>(items: impl Iterator<Item = K>, limit: usize) -> Vec<(K, usize)> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CrisisTier, SentimentBucket};
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn entry(id: i64, minutes: i64, emotion: &str, sentiment: f64, text: &str) -> Entry {
        Entry {
            id,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes),
            text: text.to_string(),
            sentiment,
            emotion: emotion.to_string(),
            reflection: None,
            crisis: CrisisTier::None,
        }
    }

    fn analyzer() -> PatternAnalyzer {
        PatternAnalyzer::new(&AnalysisConfig::default())
    }

    #[test]
    fn test_empty_corpus() {
        assert_eq!(analyzer().analyze(&[]), PatternSummary::empty());
    }

    #[test]
    fn test_transitions_follow_time_not_input_order() {
        // handed over newest first, like the store does
        let corpus = vec![
            entry(4, 30, "anxious", 0.0, ""),
            entry(3, 20, "joyful", 0.0, ""),
            entry(2, 10, "anxious", 0.0, ""),
            entry(1, 0, "anxious", 0.0, ""),
        ];
        let summary = analyzer().analyze(&corpus);
        assert_eq!(summary.transition_count("anxious", "anxious"), 1);
        assert_eq!(summary.transition_count("anxious", "joyful"), 1);
        assert_eq!(summary.transition_count("joyful", "anxious"), 1);
        assert_eq!(summary.transitions.len(), 3);
    }

    #[test]
    fn test_single_entry_has_no_transitions_or_std_dev() {
        let summary = analyzer().analyze(&[entry(1, 0, "content", 0.4, "fine day")]);
        assert!(summary.transitions.is_empty());
        let stats = summary.sentiment_stats.unwrap();
        assert_eq!(stats.average, 0.4);
        assert!(stats.std_dev.is_none());
    }

    #[test]
    fn test_sentiment_stats_sample_std() {
        let corpus = vec![
            entry(1, 0, "a", -0.5, ""),
            entry(2, 1, "a", 0.5, ""),
        ];
        let stats = analyzer().analyze(&corpus).sentiment_stats.unwrap();
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.highest, 0.5);
        assert_eq!(stats.lowest, -0.5);
        assert!((stats.std_dev.unwrap() - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_frequency_ties_keep_first_seen() {
        let corpus = vec![
            entry(1, 0, "lonely", 0.0, ""),
            entry(2, 1, "hopeful", 0.0, ""),
            entry(3, 2, "hopeful", 0.0, ""),
            entry(4, 3, "lonely", 0.0, ""),
            entry(5, 4, "angry", 0.0, ""),
        ];
        let freq = analyzer().analyze(&corpus).emotion_frequency;
        let names: Vec<&str> = freq.iter().map(|c| c.emotion.as_str()).collect();
        assert_eq!(names, vec!["lonely", "hopeful", "angry"]);
    }

    #[test]
    fn test_combinations_capped_at_five() {
        let corpus: Vec<Entry> = ["a", "b", "c", "d", "e", "f", "a"]
            .iter()
            .enumerate()
            .map(|(i, e)| entry(i as i64, i as i64, e, 0.9, ""))
            .collect();
        let combos = analyzer().analyze(&corpus).common_combinations;
        assert_eq!(combos.len(), TOP_COMBINATIONS);
        assert_eq!(combos[0].emotion, "a");
        assert_eq!(combos[0].bucket, SentimentBucket::Positive);
        assert_eq!(combos[0].count, 2);
    }

    #[test]
    fn test_low_sentiment_words_length_boundary() {
        let corpus = vec![
            entry(1, 0, "grieving", -0.6, "I am so very sad and tired"),
            entry(2, 1, "joyful", 0.8, "very very happy"),
        ];
        let words = analyzer().analyze(&corpus).low_sentiment_words;
        let found: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(found, vec!["very", "tired"]);
        assert_eq!(words[0].count, 1);
    }

    #[test]
    fn test_threshold_is_strict() {
        let corpus = vec![entry(1, 0, "sad", -0.3, "terrible morning")];
        assert!(analyzer().analyze(&corpus).low_sentiment_words.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let corpus = vec![
            entry(1, 0, "anxious", -0.5, "Deadline stress again today"),
            entry(2, 5, "stressed", -0.4, "Deadline pressure, again"),
            entry(3, 9, "content", 0.4, "Quiet evening"),
        ];
        let a = analyzer();
        assert_eq!(a.analyze(&corpus), a.analyze(&corpus));
    }
}
