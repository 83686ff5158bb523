//! Journal: the submission pipeline and every read view
//!
//! Submission order is fixed: crisis scan, classification, then either the
//! crisis short-circuit or reflection generation, then persistence. A failed
//! reflection never throws away the classification; the entry is still
//! stored, just without a reflection.
//!
//! Store calls are synchronous, so they run on tokio's blocking pool.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::JournalConfig;
use crate::core::analytics;
use crate::core::analyzer::EntryAnalyzer;
use crate::core::patterns::PatternAnalyzer;
use crate::core::providers::build_generator;
use crate::core::reflection::{fill_coping, ReflectionGenerator, ReflectionRequest};
use crate::core::severity::severity_of;
use crate::core::similarity::SimilarityEngine;
use crate::core::store::{EntryStore, SqliteEntryStore};
use crate::error::{JournalError, Result};
use crate::types::{
    AnalysisOutput, AnalyticsView, CrisisTier, Dashboard, Entry, EntryOrder, NewEntry, PatternSummary,
    SearchQuery, SearchResult, SimilarEntry, Submission, WeeklyTrend,
};

pub struct Journal {
    config: JournalConfig,
    analyzer: EntryAnalyzer,
    similarity: SimilarityEngine,
    patterns: PatternAnalyzer,
    store: Arc<dyn EntryStore>,
    generator: Arc<dyn ReflectionGenerator>,
}

impl Journal {
    pub fn new(
        config: JournalConfig,
        store: Arc<dyn EntryStore>,
        generator: Arc<dyn ReflectionGenerator>,
    ) -> Self {
        Self::with_analyzer(EntryAnalyzer::new(&config), config, store, generator)
    }

    /// Same as [`Journal::new`] with a caller-built analyzer
    pub fn with_analyzer(
        analyzer: EntryAnalyzer,
        config: JournalConfig,
        store: Arc<dyn EntryStore>,
        generator: Arc<dyn ReflectionGenerator>,
    ) -> Self {
        Self {
            similarity: SimilarityEngine::new(&config.analysis.similarity_stop_words),
            patterns: PatternAnalyzer::new(&config.analysis),
            analyzer,
            config,
            store,
            generator,
        }
    }

    /// SQLite store at the configured path plus the configured providers
    pub fn open(config: JournalConfig) -> Result<Self> {
        let store = Arc::new(SqliteEntryStore::open(&config.storage.db_path)?);
        let generator = Arc::new(build_generator(&config.generator)?);
        Ok(Self::new(config, store, generator))
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &EntryAnalyzer {
        &self.analyzer
    }

    /// Run one entry through the full pipeline and persist it
    pub async fn submit(&self, text: &str) -> Result<Submission> {
        let text = text.trim();
        if text.is_empty() {
            return Err(JournalError::EmptyEntry);
        }

        let crisis = self.analyzer.scan_crisis(text);
        let classification = self.analyzer.classify_entry(text);
        let severity = severity_of(classification.sentiment);

        if let Some(matched) = crisis {
            let stored = self
                .append(NewEntry::new(text, &classification, matched.tier, None))
                .await?;
            info!(entry_id = stored.id, tier = %matched.tier, "crisis entry stored, reflection skipped");
            return Ok(Submission::Crisis {
                entry_id: stored.id,
                tier: matched.tier,
                matched,
                resources: self.config.support.crisis_resources.clone(),
                classification,
            });
        }

        let request = ReflectionRequest {
            text: text.to_string(),
            emotion: classification.emotion.clone(),
            sentiment: classification.sentiment,
        };
        match self.generator.generate(&request).await {
            Ok(mut reflection) => {
                fill_coping(
                    &mut reflection,
                    classification.sentiment,
                    &classification.emotion,
                    &self.config.support,
                );
                // similar past entries, looked up before this one is stored
                let similar = self
                    .similar(text, self.config.analysis.similar_count)
                    .await?;
                let stored = self
                    .append(NewEntry::new(
                        text,
                        &classification,
                        CrisisTier::None,
                        Some(reflection.clone()),
                    ))
                    .await?;
                info!(
                    entry_id = stored.id,
                    emotion = classification.emotion.as_str(),
                    "entry reflected and stored"
                );
                Ok(Submission::Reflected {
                    entry_id: stored.id,
                    reflection,
                    emoji: self.config.support.emoji_for(&classification.emotion).to_string(),
                    classification,
                    severity,
                    similar,
                })
            }
            Err(e) => {
                let stored = self
                    .append(NewEntry::new(text, &classification, CrisisTier::None, None))
                    .await?;
                warn!(entry_id = stored.id, error = %e, "reflection unavailable, entry stored without it");
                Ok(Submission::ReflectionUnavailable {
                    entry_id: stored.id,
                    classification,
                    severity,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Classification only; nothing is stored or generated
    pub fn analyze(&self, text: &str) -> AnalysisOutput {
        self.analyzer.analyze(text)
    }

    /// Stored entries most like `text`, best first
    pub async fn similar(&self, text: &str, top_n: usize) -> Result<Vec<SimilarEntry>> {
        let corpus = self.entries(EntryOrder::NewestFirst).await?;
        let texts: Vec<&str> = corpus.iter().map(|e| e.text.as_str()).collect();
        Ok(self
            .similarity
            .rank(text, &texts, top_n)
            .into_iter()
            .filter_map(|hit| {
                corpus.get(hit.index).map(|entry| SimilarEntry {
                    score: hit.score,
                    entry: entry.clone(),
                })
            })
            .collect())
    }

    pub async fn count(&self) -> Result<usize> {
        self.with_store(|store| store.count()).await
    }

    pub async fn entries(&self, order: EntryOrder) -> Result<Vec<Entry>> {
        self.with_store(move |store| store.load_all(order)).await
    }

    pub async fn insights(&self) -> Result<PatternSummary> {
        Ok(self.patterns.analyze(&self.entries(EntryOrder::OldestFirst).await?))
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        Ok(analytics::dashboard(&self.entries(EntryOrder::NewestFirst).await?))
    }

    pub async fn analytics(&self) -> Result<AnalyticsView> {
        Ok(analytics::analytics(&self.entries(EntryOrder::OldestFirst).await?))
    }

    pub async fn trends(&self) -> Result<Vec<WeeklyTrend>> {
        Ok(analytics::weekly_trends(&self.entries(EntryOrder::OldestFirst).await?))
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        Ok(analytics::search(&self.entries(EntryOrder::NewestFirst).await?, query))
    }

    async fn append(&self, entry: NewEntry) -> Result<Entry> {
        self.with_store(move |store| store.append(entry)).await
    }

    async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn EntryStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| JournalError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reflection::parse_reflection;
    use crate::core::store::MemoryEntryStore;
    use crate::error::GenerationError;
    use crate::types::Reflection;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Stub {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Stub {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl ReflectionGenerator for Stub {
        fn name(&self) -> &str {
            "stub"
        }
        async fn generate(&self, _r: &ReflectionRequest) -> std::result::Result<Reflection, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GenerationError::Transport("offline".into()));
            }
            parse_reflection(r#"{"reflection":"I hear you.","summary":"A day"}"#)
        }
    }

    fn journal(stub: Arc<Stub>) -> (Journal, Arc<MemoryEntryStore>) {
        let store = Arc::new(MemoryEntryStore::new());
        (Journal::new(JournalConfig::default(), store.clone(), stub), store)
    }

    /// Store that can only run off the async worker threads:
    /// `Handle::block_on` panics when called from inside the runtime.
    struct BlockingOnly(MemoryEntryStore);

    impl EntryStore for BlockingOnly {
        fn append(&self, entry: NewEntry) -> Result<Entry> {
            tokio::runtime::Handle::current().block_on(async {});
            self.0.append(entry)
        }

        fn load_all(&self, order: EntryOrder) -> Result<Vec<Entry>> {
            tokio::runtime::Handle::current().block_on(async {});
            self.0.load_all(order)
        }
    }

    #[tokio::test]
    async fn test_store_calls_run_on_blocking_pool() {
        let j = Journal::new(
            JournalConfig::default(),
            Arc::new(BlockingOnly(MemoryEntryStore::new())),
            Stub::new(false),
        );
        j.submit("Quiet morning with coffee").await.unwrap();
        j.submit("I want to kill myself").await.unwrap();
        assert_eq!(j.count().await.unwrap(), 2);
        assert_eq!(j.insights().await.unwrap().total_entries, 2);
        assert_eq!(j.dashboard().await.unwrap().total_entries, 2);
    }

    #[tokio::test]
    async fn test_blank_entry_rejected() {
        let (j, store) = journal(Stub::new(false));
        assert!(matches!(j.submit("   \n").await, Err(JournalError::EmptyEntry)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_crisis_bypasses_generator() {
        let stub = Stub::new(false);
        let (j, store) = journal(stub.clone());
        let out = j
            .submit("I feel like I need drugs and want to kill myself")
            .await
            .unwrap();
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
        match &out {
            Submission::Crisis {
                tier,
                matched,
                resources,
                ..
            } => {
                assert_eq!(*tier, CrisisTier::Critical);
                assert_eq!(matched.tier, *tier);
                assert!(!matched.keyword.is_empty());
                assert!(!resources.is_empty());
            }
            other => panic!("expected crisis, got {other:?}"),
        }
        let stored = store.load_all(EntryOrder::NewestFirst).unwrap();
        assert_eq!(stored[0].crisis, CrisisTier::Critical);
        assert!(stored[0].reflection.is_none());
    }

    #[tokio::test]
    async fn test_reflected_fills_coping_for_negative() {
        let (j, store) = journal(Stub::new(false));
        let out = j.submit("I am so worried and anxious, everything feels awful").await.unwrap();
        match out {
            Submission::Reflected {
                reflection,
                classification,
                similar,
                ..
            } => {
                assert!(classification.sentiment < -0.3);
                assert!(reflection.coping_suggestion.is_some());
                assert!(similar.is_empty());
            }
            other => panic!("expected reflection, got {other:?}"),
        }
        let stored = store.load_all(EntryOrder::NewestFirst).unwrap();
        assert!(stored[0].reflection.is_some());
    }

    #[tokio::test]
    async fn test_generator_failure_keeps_classification() {
        let (j, store) = journal(Stub::new(true));
        let out = j.submit("Had a wonderful walk in the park").await.unwrap();
        match &out {
            Submission::ReflectionUnavailable {
                classification,
                reason,
                ..
            } => {
                assert!(classification.sentiment > 0.0);
                assert!(reason.contains("offline"));
            }
            other => panic!("expected failure outcome, got {other:?}"),
        }
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(out.entry_id(), 1);
    }

    #[tokio::test]
    async fn test_similar_excludes_new_entry_and_needs_three() {
        let (j, _) = journal(Stub::new(false));
        j.submit("Work deadlines piling up").await.unwrap();
        j.submit("Lovely dinner with family").await.unwrap();
        j.submit("Gym session in the morning").await.unwrap();
        let out = j.submit("More work deadlines piling up").await.unwrap();
        match out {
            Submission::Reflected { similar, .. } => {
                assert_eq!(similar.len(), 3);
                assert_eq!(similar[0].entry.text, "Work deadlines piling up");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
