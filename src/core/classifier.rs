//! Emotion classification against a caller-supplied label set
//!
//! [`EmotionClassifier`] is the seam: anything that can score a text against
//! arbitrary labels (rules, embeddings, a hosted model) plugs in here. The
//! stock [`LexiconClassifier`] scores each label independently from cue
//! words and normalises the scores to sum to 1.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::core::text::words;
use crate::types::LabelScore;

/// Raw affinity the neutral label starts with; one cue word beats it
pub const NEUTRAL_PRIOR: f64 = 0.5;

lazy_static! {
    static ref CUES: HashMap<&'static str, &'static [&'static str]> = {
        let table: [(&'static str, &'static [&'static str]); 14] = [
            ("anxious", &["anxious", "anxiety", "worried", "worry", "worrying", "nervous",
                "panic", "panicky", "uneasy", "restless", "dread", "scared", "afraid", "fear"]),
            ("overwhelmed", &["overwhelmed", "overwhelming", "swamped", "drowning", "buried",
                "overloaded", "juggling", "chaos"]),
            ("lonely", &["lonely", "loneliness", "alone", "isolated", "isolation", "nobody",
                "friendless", "miss", "missing", "disconnected"]),
            ("ashamed", &["ashamed", "shame", "embarrassed", "embarrassing", "guilty", "guilt",
                "humiliated", "regret", "disgraced"]),
            ("grieving", &["grieving", "grief", "loss", "mourning", "mourn", "funeral",
                "passed", "died", "death", "bereaved"]),
            ("joyful", &["joyful", "joy", "happy", "happiness", "delighted", "thrilled",
                "excited", "wonderful", "amazing", "great", "laughed", "celebrate", "celebrated"]),
            ("content", &["content", "satisfied", "comfortable", "cozy", "pleasant", "fine",
                "okay", "settled", "grateful"]),
            ("frustrated", &["frustrated", "frustrating", "frustration", "annoyed", "annoying",
                "stuck", "irritated", "fed"]),
            ("angry", &["angry", "anger", "furious", "rage", "mad", "hate", "resent",
                "resentful", "livid"]),
            ("confused", &["confused", "confusing", "unsure", "uncertain", "puzzled",
                "unclear", "lost", "torn"]),
            ("unmotivated", &["unmotivated", "lazy", "procrastinating", "procrastinated",
                "bored", "apathetic", "listless", "drained", "unproductive"]),
            ("stressed", &["stressed", "stress", "stressful", "pressure", "deadline",
                "deadlines", "tense", "busy", "exhausted"]),
            ("peaceful", &["peaceful", "peace", "calm", "relaxed", "serene", "quiet",
                "tranquil", "still", "rested"]),
            ("hopeful", &["hopeful", "hope", "optimistic", "forward", "brighter",
                "improving", "better"]),
        ];
        table.into_iter().collect()
    };
}

/// Zero-shot scoring of a text against an ordered label set.
pub trait EmotionClassifier: Send + Sync {
    /// Score every label. Returns all labels, highest first; equal scores
    /// keep the order of `labels`.
    fn rank(&self, text: &str, labels: &[String]) -> Vec<LabelScore>;

    /// Best label, or `None` when `labels` is empty.
    fn classify(&self, text: &str, labels: &[String]) -> Option<LabelScore> {
        self.rank(text, labels).into_iter().next()
    }
}

/// Cue-word classifier.
///
/// Labels without a built-in cue list match on the label word itself, so
/// custom taxonomies still work.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    neutral_label: String,
}

impl LexiconClassifier {
    pub fn new(neutral_label: &str) -> Self {
        Self {
            neutral_label: neutral_label.to_lowercase(),
        }
    }

    /// Empty text: neutral first with zero confidence, the rest in label order
    fn no_evidence(&self, labels: &[String]) -> Vec<LabelScore> {
        let mut ranked: Vec<LabelScore> = labels
            .iter()
            .map(|label| LabelScore {
                label: label.clone(),
                score: 0.0,
            })
            .collect();
        if let Some(pos) = ranked
            .iter()
            .position(|s| s.label.to_lowercase() == self.neutral_label)
        {
            let neutral = ranked.remove(pos);
            ranked.insert(0, neutral);
        }
        ranked
    }

    fn affinity(&self, label: &str, tokens: &HashMap<&str, usize>) -> f64 {
        let label = label.to_lowercase();
        if label == self.neutral_label {
            return NEUTRAL_PRIOR;
        }
        let hits: usize = match CUES.get(label.as_str()) {
            Some(cues) => cues.iter().map(|c| tokens.get(c).copied().unwrap_or(0)).sum(),
            None => tokens.get(label.as_str()).copied().unwrap_or(0),
        };
        hits as f64
    }
}

impl EmotionClassifier for LexiconClassifier {
    fn rank(&self, text: &str, labels: &[String]) -> Vec<LabelScore> {
        let words = words(text);
        if words.is_empty() {
            return self.no_evidence(labels);
        }
        let mut tokens: HashMap<&str, usize> = HashMap::new();
        for w in &words {
            *tokens.entry(w.as_str()).or_insert(0) += 1;
        }

        let raw: Vec<f64> = labels.iter().map(|l| self.affinity(l, &tokens)).collect();
        let total: f64 = raw.iter().sum();
        let uniform = 1.0 / labels.len().max(1) as f64;

        let mut ranked: Vec<LabelScore> = labels
            .iter()
            .zip(raw)
            .map(|(label, r)| LabelScore {
                label: label.clone(),
                score: if total > 0.0 { r / total } else { uniform },
            })
            .collect();

        // stable: equal scores keep label order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}
