//! Dashboard, analytics and search views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Entry, LabelCount};

/// Landing-page numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_entries: usize,
    /// Rounded to 2 dp, 0.0 on an empty journal
    pub avg_sentiment: f64,
    pub most_common_emotion: Option<String>,
    pub positive_count: usize,
    pub last_entry: Option<Entry>,
    /// Distinct labels present, sorted
    pub emotions: Vec<String>,
}

/// Headline metrics of the analytics view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsMetrics {
    pub total: usize,
    pub avg_sentiment: f64,
    /// Whole-number percentage of entries with sentiment > 0.3
    pub positive_pct: f64,
    /// Days between the earliest and latest entry
    pub days_span: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPoint {
    pub timestamp: DateTime<Utc>,
    pub sentiment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub metrics: AnalyticsMetrics,
    /// Oldest first
    pub sentiment_data: Vec<SentimentPoint>,
    pub emotion_counts: Vec<LabelCount>,
    /// Newest first
    pub recent_entries: Vec<Entry>,
}

/// Sentiment aggregated over one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub year: i32,
    pub week: u32,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Positive,
    Negative,
}

/// Filters for the search view. All optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Case-insensitive substring
    pub query: String,
    /// Keep only these labels; empty keeps all
    pub emotions: Vec<String>,
    /// Inclusive [min, max]
    pub sentiment_range: Option<(f64, f64)>,
    pub sort_by: SortBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entries: Vec<Entry>,
    pub count: usize,
}
