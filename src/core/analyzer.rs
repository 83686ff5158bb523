//! Entry analyzer: sentiment + emotion + crisis + severity in one place
//!
//! Blank input never fails; it gets the neutral label with zero confidence
//! and a 0.0 sentiment.

use std::sync::Arc;

use crate::config::{JournalConfig, SupportConfig, TaxonomyConfig};
use crate::core::classifier::{EmotionClassifier, LexiconClassifier};
use crate::core::crisis::CrisisDetector;
use crate::core::sentiment::SentimentScorer;
use crate::core::severity::severity_of;
use crate::types::{
    AnalysisOutput, Classification, CrisisMatch, CrisisTier, EmotionCategory, LabelScore,
};

/// Stateless per-entry analysis
#[derive(Clone)]
pub struct EntryAnalyzer {
    taxonomy: TaxonomyConfig,
    support: SupportConfig,
    scorer: SentimentScorer,
    classifier: Arc<dyn EmotionClassifier>,
    crisis: CrisisDetector,
}

impl std::fmt::Debug for EntryAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryAnalyzer")
            .field("labels", &self.taxonomy.labels)
            .finish_non_exhaustive()
    }
}

impl EntryAnalyzer {
    /// Analyzer with the stock lexicon classifier
    pub fn new(config: &JournalConfig) -> Self {
        let classifier = Arc::new(LexiconClassifier::new(&config.taxonomy.neutral_label));
        Self::with_classifier(config, classifier)
    }

    /// Analyzer with any classifier behind the same contract
    pub fn with_classifier(config: &JournalConfig, classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self {
            taxonomy: config.taxonomy.clone(),
            support: config.support.clone(),
            scorer: SentimentScorer::new(),
            classifier,
            crisis: CrisisDetector::new(&config.crisis),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.taxonomy.labels
    }

    /// Sentiment and winning emotion label
    pub fn classify_entry(&self, text: &str) -> Classification {
        if text.trim().is_empty() {
            return Classification::neutral(&self.taxonomy.neutral_label);
        }
        let sentiment = self.scorer.score(text);
        match self.classifier.classify(text, &self.taxonomy.labels) {
            Some(LabelScore { label, score }) => Classification {
                sentiment,
                emotion: label,
                confidence: score,
            },
            None => Classification {
                sentiment,
                ..Classification::neutral(&self.taxonomy.neutral_label)
            },
        }
    }

    /// Every label with its score, best first
    pub fn rank_emotions(&self, text: &str) -> Vec<LabelScore> {
        self.classifier.rank(text, &self.taxonomy.labels)
    }

    pub fn detect_crisis(&self, text: &str) -> CrisisTier {
        self.crisis.detect(text)
    }

    pub fn scan_crisis(&self, text: &str) -> Option<CrisisMatch> {
        self.crisis.scan(text)
    }

    /// Positive / negative / neutral grouping of a label
    pub fn category_of(&self, emotion: &str) -> EmotionCategory {
        let emotion = emotion.to_lowercase();
        if self.taxonomy.positive.iter().any(|l| l.to_lowercase() == emotion) {
            EmotionCategory::Positive
        } else if self.taxonomy.negative.iter().any(|l| l.to_lowercase() == emotion) {
            EmotionCategory::Negative
        } else {
            EmotionCategory::Neutral
        }
    }

    /// Full one-shot analysis for display
    pub fn analyze(&self, text: &str) -> AnalysisOutput {
        let crisis_match = self.scan_crisis(text);
        let classification = self.classify_entry(text);
        let severity = severity_of(classification.sentiment);
        let emoji = self.support.emoji_for(&classification.emotion);
        AnalysisOutput::new(&classification, severity, crisis_match, emoji)
    }
}
