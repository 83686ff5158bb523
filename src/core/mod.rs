//! Core modules for the journal

pub mod analytics;
pub mod analyzer;
pub mod api;
pub mod classifier;
pub mod crisis;
pub mod journal;
pub mod patterns;
pub mod providers;
pub mod reflection;
pub mod sentiment;
pub mod severity;
pub mod similarity;
pub mod store;
pub mod text;

pub use analyzer::EntryAnalyzer;
pub use api::{create_router, run_server};
pub use classifier::{EmotionClassifier, LexiconClassifier};
pub use crisis::CrisisDetector;
pub use journal::Journal;
pub use patterns::PatternAnalyzer;
pub use providers::{build_generator, GeminiGenerator, OllamaGenerator};
pub use reflection::{FallbackGenerator, ReflectionGenerator, ReflectionRequest};
pub use sentiment::SentimentScorer;
pub use severity::{bucket_of, severity_of};
pub use similarity::SimilarityEngine;
pub use store::{EntryStore, MemoryEntryStore, SqliteEntryStore};
