//! Configuration for the journal pipeline.
//!
//! Every section has working defaults, so an empty (or absent) TOML file
//! yields the stock taxonomy, keyword lists and stop words. Engines take
//! the pieces they need by reference; nothing reads global state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};
use crate::types::CrisisTier;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub taxonomy: TaxonomyConfig,
    pub crisis: CrisisConfig,
    pub analysis: AnalysisConfig,
    pub support: SupportConfig,
    pub generator: GeneratorConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

impl JournalConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| JournalError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Parse TOML text and validate.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: JournalConfig =
            toml::from_str(raw).map_err(|e| JournalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engines cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.taxonomy.labels.is_empty() {
            return Err(JournalError::Config("taxonomy.labels is empty".into()));
        }
        if !self.taxonomy.labels.contains(&self.taxonomy.neutral_label) {
            return Err(JournalError::Config(format!(
                "taxonomy.neutral_label '{}' is not in taxonomy.labels",
                self.taxonomy.neutral_label
            )));
        }
        if self.crisis.keyword_count() == 0 {
            return Err(JournalError::Config("crisis keyword lists are empty".into()));
        }
        if self.analysis.similar_count == 0 {
            return Err(JournalError::Config("analysis.similar_count must be > 0".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

/// Emotion labels, in tie-break order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Candidate labels. On equal scores the earlier label wins.
    pub labels: Vec<String>,
    /// Returned for blank or cue-less text. Must be in `labels`.
    pub neutral_label: String,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            labels: strings(&[
                "anxious",
                "overwhelmed",
                "lonely",
                "ashamed",
                "grieving",
                "joyful",
                "content",
                "frustrated",
                "hopeful",
                "angry",
                "confused",
                "unmotivated",
                "stressed",
                "peaceful",
                "neutral",
            ]),
            neutral_label: "neutral".to_string(),
            positive: strings(&["joyful", "content", "hopeful", "peaceful"]),
            negative: strings(&[
                "anxious",
                "overwhelmed",
                "lonely",
                "ashamed",
                "grieving",
                "frustrated",
                "angry",
                "stressed",
                "unmotivated",
                "confused",
            ]),
        }
    }
}

// ---------------------------------------------------------------------------
// Crisis keywords
// ---------------------------------------------------------------------------

/// Named list of phrases. Matching is lowercase substring containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: strings(keywords),
        }
    }
}

/// Keyword groups keyed by tier name.
///
/// ```toml
/// [[crisis.critical]]
/// name = "suicidal"
/// keywords = ["kill myself", "want to die"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrisisConfig {
    pub critical: Vec<KeywordGroup>,
    pub high: Vec<KeywordGroup>,
    pub moderate: Vec<KeywordGroup>,
}

impl CrisisConfig {
    /// Groups for one tier; empty for `CrisisTier::None`
    pub fn groups(&self, tier: CrisisTier) -> &[KeywordGroup] {
        match tier {
            CrisisTier::Critical => &self.critical,
            CrisisTier::High => &self.high,
            CrisisTier::Moderate => &self.moderate,
            CrisisTier::None => &[],
        }
    }

    pub fn groups_mut(&mut self, tier: CrisisTier) -> Option<&mut Vec<KeywordGroup>> {
        match tier {
            CrisisTier::Critical => Some(&mut self.critical),
            CrisisTier::High => Some(&mut self.high),
            CrisisTier::Moderate => Some(&mut self.moderate),
            CrisisTier::None => None,
        }
    }

    pub fn keyword_count(&self) -> usize {
        CrisisTier::DETECTION_ORDER
            .iter()
            .flat_map(|tier| self.groups(*tier))
            .map(|g| g.keywords.len())
            .sum()
    }
}

impl Default for CrisisConfig {
    fn default() -> Self {
        Self {
            critical: vec![
                KeywordGroup::new(
                    "self_harm",
                    &[
                        "cutting",
                        "self harm",
                        "self-harm",
                        "hurt myself",
                        "harm myself",
                        "starving",
                        "overdose",
                        "slice",
                        "bleed",
                    ],
                ),
                KeywordGroup::new(
                    "suicidal",
                    &[
                        "suicide",
                        "suicidal",
                        "kill myself",
                        "end it",
                        "no point",
                        "no reason to live",
                        "better off dead",
                        "want to die",
                    ],
                ),
            ],
            high: vec![
                KeywordGroup::new(
                    "hopelessness",
                    &[
                        "everything's pointless",
                        "give up",
                        "can't take it",
                        "never get better",
                        "hopeless",
                        "worthless",
                    ],
                ),
                KeywordGroup::new(
                    "acute_distress",
                    &[
                        "panicking",
                        "can't breathe",
                        "losing it",
                        "falling apart",
                        "breaking down",
                        "freaking out",
                    ],
                ),
            ],
            moderate: vec![KeywordGroup::new(
                "substance_abuse",
                &[
                    "drinking to forget",
                    "high all day",
                    "need drugs",
                    "substance",
                    "intoxicated",
                ],
            )],
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Stop words and sizes for similarity search and pattern analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Removed before TF-IDF vectorisation
    pub similarity_stop_words: Vec<String>,
    /// Removed before counting low-sentiment words
    pub lexical_stop_words: Vec<String>,
    /// Entries strictly below this feed the low-sentiment word signal
    pub low_sentiment_threshold: f64,
    /// Similar entries returned with a reflection
    pub similar_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            similarity_stop_words: strings(ENGLISH_STOP_WORDS),
            lexical_stop_words: strings(&[
                "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "is", "are",
                "was", "were",
            ]),
            low_sentiment_threshold: crate::LOW_SENTIMENT_THRESHOLD,
            similar_count: crate::DEFAULT_SIMILAR_COUNT,
        }
    }
}

/// English stop words for the TF-IDF vectoriser, the same 318 terms as
/// scikit-learn's `ENGLISH_STOP_WORDS`.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot",
    "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere",
    "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie",
    "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
    "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no", "nobody",
    "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see",
    "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that",
    "the", "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

// ---------------------------------------------------------------------------
// Support content
// ---------------------------------------------------------------------------

/// Coping strategies, crisis resources and emoji shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Emotion label → strategies. The `default` key is the fallback.
    pub coping_strategies: BTreeMap<String, Vec<String>>,
    /// Name → contact line, returned with every crisis response
    pub crisis_resources: BTreeMap<String, String>,
    pub emoji: BTreeMap<String, String>,
}

impl SupportConfig {
    /// Strategies for an emotion, falling back to `default`
    pub fn coping_for(&self, emotion: &str) -> &[String] {
        self.coping_strategies
            .get(&emotion.to_lowercase())
            .or_else(|| self.coping_strategies.get("default"))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Emoji for an emotion, empty if unmapped
    pub fn emoji_for(&self, emotion: &str) -> &str {
        self.emoji
            .get(&emotion.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        let coping: &[(&str, &[&str])] = &[
            ("anxious", &[
                "Try the 5-4-3-2-1 grounding technique: name 5 things you see, 4 you hear, 3 you touch, 2 you smell, 1 you taste",
                "Practice box breathing: breathe in for 4, hold for 4, out for 4, hold for 4",
                "Progressive muscle relaxation: tense and release each muscle group for 5 seconds",
            ]),
            ("overwhelmed", &[
                "Break the task into 3 small steps and focus on just the first one",
                "Write down everything bothering you, then pick just one to address",
                "Take a 10-minute break and do something you enjoy",
            ]),
            ("lonely", &[
                "Reach out to one person, even a text counts",
                "Join an online community around something you enjoy",
                "Do one activity in public (coffee shop, park) even if alone",
            ]),
            ("ashamed", &[
                "Write a compassionate letter to yourself as if from a best friend",
                "Remember: you're human, mistakes are part of growth",
                "Consider sharing your feeling with one trusted person",
            ]),
            ("angry", &[
                "Go for a 15-minute walk or run to release energy",
                "Journal without filter: write angry, don't hold back",
                "Do something physical: punch a pillow, shake it out",
            ]),
            ("grieving", &[
                "Spend time with this feeling, it's valid and necessary",
                "Create a small ritual to honor what you've lost",
                "Reach out to someone who understands your loss",
            ]),
            ("default", &[
                "Take a few deep breaths and notice your surroundings",
                "Move your body for 5 minutes: stretch, walk, dance",
                "Drink water and step outside if possible",
            ]),
        ];
        let resources: &[(&str, &str)] = &[
            ("global", "https://findahelpline.com"),
            ("us_crisis_line", "https://988lifeline.org (call or text 988)"),
            ("crisis_text", "Text HOME to 741741"),
            ("international", "https://www.befrienders.org"),
        ];
        let emoji: &[(&str, &str)] = &[
            ("happy", "😊"), ("sad", "😢"), ("angry", "😠"), ("neutral", "😐"),
            ("anxious", "😰"), ("excited", "🤩"), ("surprised", "😲"), ("joyful", "😄"),
            ("content", "😌"), ("lonely", "🥺"), ("ashamed", "😔"), ("grieving", "💔"),
            ("overwhelmed", "😫"), ("hopeful", "🌟"), ("frustrated", "😤"), ("confused", "😕"),
            ("unmotivated", "😒"), ("peaceful", "🧘"), ("stressed", "😟"),
        ];
        Self {
            coping_strategies: coping
                .iter()
                .map(|(k, v)| (k.to_string(), strings(v)))
                .collect(),
            crisis_resources: resources
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            emoji: emoji
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Generator / storage / server
// ---------------------------------------------------------------------------

/// Reflection providers, tried in order: local Ollama, then Gemini.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub ollama_enabled: bool,
    pub ollama_url: String,
    pub ollama_model: String,
    pub gemini_enabled: bool,
    pub gemini_url: String,
    pub gemini_model: String,
    /// Environment variable holding the Gemini key
    pub gemini_api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ollama_enabled: true,
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "gemma3:1b".to_string(),
            gemini_enabled: true,
            gemini_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("journal_entries.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5000".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
