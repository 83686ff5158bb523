//! Read-side views: dashboard, analytics, weekly trends, search
//!
//! Pure functions over a corpus snapshot, like the pattern analyzer.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;

use crate::core::patterns::{chronological, emotion_frequency};
use crate::types::{
    AnalyticsMetrics, AnalyticsView, Dashboard, Entry, SearchQuery, SearchResult, SentimentPoint,
    SortBy, WeeklyTrend,
};
use crate::{BUCKET_POSITIVE_ABOVE, RECENT_ENTRY_COUNT};

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn positive_count(corpus: &[Entry]) -> usize {
    corpus
        .iter()
        .filter(|e| e.sentiment > BUCKET_POSITIVE_ABOVE)
        .count()
}

/// Highest count wins; ties go to the alphabetically first label
fn most_common_emotion(corpus: &[Entry]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for e in corpus {
        *counts.entry(e.emotion.as_str()).or_insert(0) += 1;
    }
    let best = counts.values().copied().max()?;
    counts
        .into_iter()
        .find(|(_, c)| *c == best)
        .map(|(label, _)| label.to_string())
}

fn newest(corpus: &[Entry]) -> Option<&Entry> {
    corpus.iter().max_by_key(|e| (e.timestamp, e.id))
}

pub fn dashboard(corpus: &[Entry]) -> Dashboard {
    let emotions: BTreeSet<&str> = corpus.iter().map(|e| e.emotion.as_str()).collect();
    Dashboard {
        total_entries: corpus.len(),
        avg_sentiment: mean(corpus.iter().map(|e| e.sentiment)).map_or(0.0, round2),
        most_common_emotion: most_common_emotion(corpus),
        positive_count: positive_count(corpus),
        last_entry: newest(corpus).cloned(),
        emotions: emotions.into_iter().map(str::to_string).collect(),
    }
}

pub fn analytics(corpus: &[Entry]) -> AnalyticsView {
    let ordered = chronological(corpus);
    let total = ordered.len();

    let days_span = match (ordered.first(), ordered.last()) {
        (Some(first), Some(last)) => (last.timestamp - first.timestamp).num_days(),
        _ => 0,
    };
    let positive_pct = if total == 0 {
        0.0
    } else {
        (positive_count(corpus) as f64 / total as f64 * 100.0).round()
    };

    let recent: Vec<Entry> = ordered
        .iter()
        .rev()
        .take(RECENT_ENTRY_COUNT)
        .map(|e| (*e).clone())
        .collect();

    AnalyticsView {
        metrics: AnalyticsMetrics {
            total,
            avg_sentiment: mean(ordered.iter().map(|e| e.sentiment)).map_or(0.0, round2),
            positive_pct,
            days_span,
        },
        sentiment_data: ordered
            .iter()
            .map(|e| SentimentPoint {
                timestamp: e.timestamp,
                sentiment: e.sentiment,
            })
            .collect(),
        emotion_counts: emotion_frequency(&ordered),
        recent_entries: recent,
    }
}

/// Sentiment per ISO week, oldest week first
pub fn weekly_trends(corpus: &[Entry]) -> Vec<WeeklyTrend> {
    let mut weeks: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for e in corpus {
        let week = e.timestamp.iso_week();
        weeks
            .entry((week.year(), week.week()))
            .or_default()
            .push(e.sentiment);
    }

    weeks
        .into_iter()
        .map(|((year, week), values)| {
            let n = values.len();
            let sum: f64 = values.iter().sum();
            WeeklyTrend {
                year,
                week,
                mean: round2(sum / n as f64),
                min: round2(values.iter().copied().fold(f64::INFINITY, f64::min)),
                max: round2(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
                count: n,
            }
        })
        .collect()
}

pub fn search(corpus: &[Entry], query: &SearchQuery) -> SearchResult {
    let needle = query.query.trim().to_lowercase();
    let emotions: Vec<String> = query.emotions.iter().map(|e| e.to_lowercase()).collect();

    let mut entries: Vec<Entry> = corpus
        .iter()
        .filter(|e| needle.is_empty() || e.text.to_lowercase().contains(&needle))
        .filter(|e| emotions.is_empty() || emotions.contains(&e.emotion.to_lowercase()))
        .filter(|e| match query.sentiment_range {
            Some((lo, hi)) => e.sentiment >= lo && e.sentiment <= hi,
            None => true,
        })
        .cloned()
        .collect();

    match query.sort_by {
        SortBy::Newest => entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id))),
        SortBy::Oldest => entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id))),
        SortBy::Positive => entries.sort_by(|a, b| b.sentiment.total_cmp(&a.sentiment)),
        SortBy::Negative => entries.sort_by(|a, b| a.sentiment.total_cmp(&b.sentiment)),
    }

    SearchResult {
        count: entries.len(),
        entries,
    }
}
