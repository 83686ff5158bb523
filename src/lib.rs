//! Moodjournal: reflective journaling core
//!
//! Entry text → crisis triage → sentiment + emotion → reflection → store.
//! Historical reads run similarity search and pattern analysis over the
//! whole corpus, recomputed on every request.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// SEVERITY BOUNDARIES [C] - upper bound of each tier, inclusive
// =============================================================================

/// sentiment <= this is CRITICAL
pub const SEVERITY_CRITICAL_MAX: f64 = -0.7;

/// sentiment <= this is HIGH
pub const SEVERITY_HIGH_MAX: f64 = -0.3;

/// sentiment <= this is MODERATE
pub const SEVERITY_MODERATE_MAX: f64 = 0.3;

/// sentiment <= this is GOOD, above is EXCELLENT
pub const SEVERITY_GOOD_MAX: f64 = 0.7;

// =============================================================================
// SENTIMENT BUCKETS [C] - exclusive bounds
// =============================================================================

/// sentiment > this is POSITIVE
pub const BUCKET_POSITIVE_ABOVE: f64 = 0.3;

/// sentiment < this is NEGATIVE
pub const BUCKET_NEGATIVE_BELOW: f64 = -0.3;

// =============================================================================
// CORPUS MINIMUMS
// =============================================================================

/// Similarity search needs this many past entries for usable IDF weights
pub const MIN_SIMILARITY_CORPUS: usize = 3;

/// Transitions need at least one consecutive pair
pub const MIN_TRANSITION_ENTRIES: usize = 2;

// =============================================================================
// PATTERN DEFAULTS
// =============================================================================

/// Entries strictly below this sentiment feed the low-sentiment word signal
pub const LOW_SENTIMENT_THRESHOLD: f64 = -0.3;

/// Tokens of this many chars or fewer are dropped from the word signal
pub const MIN_SIGNAL_TOKEN_CHARS: usize = 3;

pub const TOP_COMBINATIONS: usize = 5;
pub const TOP_TRANSITIONS: usize = 5;
pub const TOP_LOW_SENTIMENT_WORDS: usize = 10;

/// Similar entries returned alongside a fresh reflection
pub const DEFAULT_SIMILAR_COUNT: usize = 3;

/// Recent entries returned by the analytics view
pub const RECENT_ENTRY_COUNT: usize = 10;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
