//! Similarity search results

use serde::{Deserialize, Serialize};

use crate::types::Entry;

/// Position of a corpus document and its cosine similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub index: usize,
    pub score: f64,
}

/// A stored entry matched by similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarEntry {
    pub score: f64,
    pub entry: Entry,
}
