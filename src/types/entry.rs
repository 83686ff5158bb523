//! Journal entries and the reflection payload they carry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Classification, CrisisTier};

/// One follow-up question suggested by the reflection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followup {
    pub question: String,
    /// Why the question matters. Older payloads call this `follow_up`.
    #[serde(default, alias = "follow_up")]
    pub rationale: String,
}

/// Structured reflection returned by the text-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub reflection: String,
    pub summary: String,
    #[serde(default)]
    pub actionable_insight: String,
    #[serde(default)]
    pub followups: Vec<Followup>,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub safety_flag: bool,
    #[serde(default)]
    pub coping_suggestion: Option<String>,
}

/// A stored entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub sentiment: f64,
    pub emotion: String,
    pub reflection: Option<Reflection>,
    pub crisis: CrisisTier,
}

/// Everything needed to append an entry; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub sentiment: f64,
    pub emotion: String,
    pub reflection: Option<Reflection>,
    pub crisis: CrisisTier,
}

impl NewEntry {
    /// Stamp a classified text with the current time
    pub fn new(
        text: &str,
        classification: &Classification,
        crisis: CrisisTier,
        reflection: Option<Reflection>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            text: text.to_string(),
            sentiment: classification.sentiment,
            emotion: classification.emotion.clone(),
            reflection,
            crisis,
        }
    }

    /// Attach an id, producing the stored form
    pub fn into_entry(self, id: i64) -> Entry {
        Entry {
            id,
            timestamp: self.timestamp,
            text: self.text,
            sentiment: self.sentiment,
            emotion: self.emotion,
            reflection: self.reflection,
            crisis: self.crisis,
        }
    }
}

/// Ordering requested from `load_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_followup_accepts_legacy_key() {
        let json = r#"{"question": "What helped?", "follow_up": "Builds on strengths"}"#;
        let f: Followup = serde_json::from_str(json).unwrap();
        assert_eq!(f.rationale, "Builds on strengths");
    }

    #[test]
    fn test_reflection_optional_fields_default() {
        let json = r#"{"reflection": "That sounds hard.", "summary": "A hard day"}"#;
        let r: Reflection = serde_json::from_str(json).unwrap();
        assert!(r.followups.is_empty());
        assert!(!r.safety_flag);
        assert!(r.coping_suggestion.is_none());
    }

    #[test]
    fn test_reflection_requires_core_fields() {
        let json = r#"{"tone": "warm"}"#;
        assert!(serde_json::from_str::<Reflection>(json).is_err());
    }
}
