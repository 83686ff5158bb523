//! Sentiment scorer: lexicon polarity averaged over the entry
//!
//! Each lexicon word carries a polarity in [-1, 1]. An intensifier directly
//! before it scales the polarity; a negator within the previous three words
//! flips it at half strength. The score is the mean over polarity words.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::core::text::words;

/// How far back a negator reaches
const NEGATION_WINDOW: usize = 3;

/// Applied to a negated word's polarity
const NEGATION_FACTOR: f64 = -0.5;

lazy_static! {
    static ref LEXICON: HashMap<&'static str, f64> = [
        // positive
        ("good", 0.7), ("great", 0.8), ("amazing", 0.6), ("awesome", 1.0),
        ("wonderful", 1.0), ("excellent", 1.0), ("fantastic", 0.4), ("perfect", 1.0),
        ("happy", 0.8), ("happier", 0.7), ("glad", 0.5), ("joy", 0.8), ("joyful", 0.8),
        ("love", 0.5), ("loved", 0.7), ("lovely", 0.5), ("beautiful", 0.85),
        ("nice", 0.6), ("fun", 0.3), ("enjoy", 0.4), ("enjoyed", 0.5),
        ("calm", 0.3), ("peaceful", 0.5), ("relaxed", 0.4), ("relief", 0.4),
        ("grateful", 0.6), ("thankful", 0.5), ("proud", 0.8), ("hopeful", 0.5),
        ("hope", 0.3), ("excited", 0.4), ("exciting", 0.3), ("content", 0.3),
        ("better", 0.5), ("best", 1.0), ("fine", 0.4), ("okay", 0.5), ("ok", 0.5),
        ("productive", 0.4), ("energized", 0.5), ("motivated", 0.4), ("inspired", 0.5),
        ("strong", 0.4), ("confident", 0.5), ("safe", 0.5), ("warm", 0.6),
        ("kind", 0.6), ("supported", 0.4), ("accomplished", 0.6), ("successful", 0.75),
        ("fresh", 0.3), ("bright", 0.7), ("sunny", 0.3), ("delicious", 1.0),
        ("laugh", 0.3), ("laughed", 0.3), ("smile", 0.3), ("smiled", 0.3),
        // negative
        ("bad", -0.7), ("worse", -0.4), ("worst", -1.0), ("terrible", -1.0),
        ("awful", -1.0), ("horrible", -1.0), ("sad", -0.5), ("sadder", -0.5),
        ("unhappy", -0.6), ("depressed", -0.7), ("miserable", -1.0), ("lonely", -0.5),
        ("alone", -0.3), ("tired", -0.4), ("exhausted", -0.6), ("drained", -0.5),
        ("angry", -0.5), ("mad", -0.6), ("furious", -0.8), ("annoyed", -0.4),
        ("frustrated", -0.6), ("frustrating", -0.6), ("anxious", -0.5), ("worried", -0.4),
        ("worry", -0.4), ("nervous", -0.3), ("scared", -0.6), ("afraid", -0.6),
        ("fear", -0.5), ("stressed", -0.5), ("stress", -0.4), ("overwhelmed", -0.6),
        ("hurt", -0.5), ("pain", -0.6), ("painful", -0.7), ("cry", -0.4), ("cried", -0.5),
        ("crying", -0.5), ("hate", -0.8), ("hated", -0.8), ("ashamed", -0.6),
        ("guilty", -0.5), ("embarrassed", -0.5), ("confused", -0.3), ("lost", -0.3),
        ("hopeless", -0.8), ("worthless", -0.8), ("useless", -0.5), ("broken", -0.4),
        ("empty", -0.4), ("numb", -0.4), ("grief", -0.6), ("grieving", -0.6),
        ("failed", -0.5), ("failure", -0.6), ("wrong", -0.5), ("sick", -0.7),
        ("boring", -1.0), ("bored", -0.5), ("difficult", -0.5), ("hard", -0.3),
        ("dark", -0.15), ("cold", -0.3), ("upset", -0.5), ("disappointed", -0.75),
        ("panic", -0.6), ("dead", -0.2), ("die", -0.5), ("unmotivated", -0.4),
    ]
    .into_iter()
    .collect();

    static ref INTENSIFIERS: HashMap<&'static str, f64> = [
        ("very", 1.3), ("really", 1.2), ("so", 1.2), ("extremely", 1.5),
        ("incredibly", 1.4), ("super", 1.3), ("too", 1.2), ("totally", 1.3),
        ("completely", 1.4), ("absolutely", 1.4), ("quite", 1.1), ("deeply", 1.3),
        ("slightly", 0.5), ("somewhat", 0.6), ("little", 0.6), ("bit", 0.6),
    ]
    .into_iter()
    .collect();

    static ref NEGATORS: Vec<&'static str> = vec![
        "not", "no", "never", "nothing", "neither", "nor", "nobody", "hardly", "without",
        "cannot",
    ];
}

/// Lexicon-based sentiment scorer
#[derive(Debug, Default, Clone, Copy)]
pub struct SentimentScorer;

impl SentimentScorer {
    /// Create new scorer
    pub fn new() -> Self {
        Self
    }

    /// Polarity in [-1, 1]. 0.0 for blank or polarity-free text.
    pub fn score(&self, text: &str) -> f64 {
        let tokens = words(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut polarities = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = LEXICON.get(token.as_str()) else {
                continue;
            };
            let mut polarity = base;

            if i > 0 {
                if let Some(&factor) = INTENSIFIERS.get(tokens[i - 1].as_str()) {
                    polarity = (polarity * factor).clamp(-1.0, 1.0);
                }
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| is_negator(t)) {
                polarity *= NEGATION_FACTOR;
            }

            polarities.push(polarity);
        }

        if polarities.is_empty() {
            return 0.0;
        }
        let mean = polarities.iter().sum::<f64>() / polarities.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}
