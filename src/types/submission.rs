//! Outcome of submitting one journal entry

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Classification, CrisisMatch, CrisisTier, Reflection, SeverityTier, SimilarEntry};

/// What happened to a submitted entry. Every variant carries the
/// classification, and every variant was persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Submission {
    /// Crisis language found; reflection was skipped.
    Crisis {
        entry_id: i64,
        tier: CrisisTier,
        matched: CrisisMatch,
        resources: BTreeMap<String, String>,
        classification: Classification,
    },
    Reflected {
        entry_id: i64,
        reflection: Reflection,
        classification: Classification,
        severity: SeverityTier,
        emoji: String,
        similar: Vec<SimilarEntry>,
    },
    /// Generation failed; the entry was stored without a reflection.
    ReflectionUnavailable {
        entry_id: i64,
        classification: Classification,
        severity: SeverityTier,
        reason: String,
    },
}

impl Submission {
    pub fn entry_id(&self) -> i64 {
        match self {
            Submission::Crisis { entry_id, .. }
            | Submission::Reflected { entry_id, .. }
            | Submission::ReflectionUnavailable { entry_id, .. } => *entry_id,
        }
    }

    pub fn classification(&self) -> &Classification {
        match self {
            Submission::Crisis { classification, .. }
            | Submission::Reflected { classification, .. }
            | Submission::ReflectionUnavailable { classification, .. } => classification,
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, Submission::Crisis { .. })
    }
}
