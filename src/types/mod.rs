//! Core types for the journal

mod analytics;
mod crisis;
mod emotion;
mod entry;
mod output;
mod patterns;
mod severity;
mod similarity;
mod submission;

pub use analytics::{
    AnalyticsMetrics, AnalyticsView, Dashboard, SearchQuery, SearchResult, SentimentPoint, SortBy,
    WeeklyTrend,
};
pub use crisis::{CrisisMatch, CrisisTier};
pub use emotion::{Classification, EmotionCategory, LabelScore};
pub use entry::{Entry, EntryOrder, Followup, NewEntry, Reflection};
pub use output::AnalysisOutput;
pub use patterns::{
    Combination, LabelCount, PatternSummary, SentimentStats, Transition, WordCount,
};
pub use severity::{SentimentBucket, SeverityTier};
pub use similarity::{SimilarEntry, SimilarityHit};
pub use submission::Submission;
