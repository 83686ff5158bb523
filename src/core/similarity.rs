//! Similarity engine: TF-IDF vectors + cosine similarity
//!
//! The vector space is fitted over `{query} ∪ corpus` on every call, with
//! smoothed IDF (`ln((1 + n) / (1 + df)) + 1`) and L2-normalised rows, so
//! the cosine is a plain dot product.

use std::collections::{HashMap, HashSet};

use crate::core::text::terms;
use crate::types::SimilarityHit;
use crate::MIN_SIMILARITY_CORPUS;

/// Sparse L2-normalised document vector
type SparseVec = HashMap<usize, f64>;

/// Ranks past entries by lexical closeness to a query
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    stop_words: HashSet<String>,
}

impl SimilarityEngine {
    pub fn new(stop_words: &[String]) -> Self {
        Self {
            stop_words: stop_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Top `top_n` corpus positions by descending cosine similarity.
    ///
    /// Empty when the corpus has fewer than [`MIN_SIMILARITY_CORPUS`]
    /// documents. Ties keep corpus order.
    pub fn rank<S: AsRef<str>>(&self, query: &str, corpus: &[S], top_n: usize) -> Vec<SimilarityHit> {
        if corpus.len() < MIN_SIMILARITY_CORPUS || top_n == 0 {
            return Vec::new();
        }

        let mut scores = self.scores(query, corpus);
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores.truncate(top_n);
        scores
    }

    /// Cosine similarity of the query against every corpus document, in
    /// corpus order.
    pub fn scores<S: AsRef<str>>(&self, query: &str, corpus: &[S]) -> Vec<SimilarityHit> {
        let docs: Vec<Vec<String>> = std::iter::once(query)
            .chain(corpus.iter().map(AsRef::as_ref))
            .map(|d| self.tokenize(d))
            .collect();

        let vectors = fit_transform(&docs);
        let Some((query_vec, corpus_vecs)) = vectors.split_first() else {
            return Vec::new();
        };

        corpus_vecs
            .iter()
            .enumerate()
            .map(|(index, doc)| SimilarityHit {
                index,
                score: dot(query_vec, doc),
            })
            .collect()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        terms(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }
}

/// Fit vocabulary + IDF over `docs` and return one normalised vector each
fn fit_transform(docs: &[Vec<String>]) -> Vec<SparseVec> {
    let mut vocab: HashMap<&str, usize> = HashMap::new();
    let mut df: Vec<usize> = Vec::new();

    for doc in docs {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            let next = vocab.len();
            let id = *vocab.entry(term).or_insert(next);
            if id == df.len() {
                df.push(0);
            }
            df[id] += 1;
        }
    }

    let n = docs.len() as f64;
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
        .collect();

    docs.iter()
        .map(|doc| {
            let mut vec: SparseVec = HashMap::new();
            for term in doc {
                let id = vocab[term.as_str()];
                *vec.entry(id).or_insert(0.0) += 1.0;
            }
            for (id, weight) in vec.iter_mut() {
                *weight *= idf[*id];
            }
            let norm = vec.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for weight in vec.values_mut() {
                    *weight /= norm;
                }
            }
            vec
        })
        .collect()
}

fn dot(a: &SparseVec, b: &SparseVec) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(id, w)| large.get(id).map(|v| w * v))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENGLISH_STOP_WORDS;

    fn engine() -> SimilarityEngine {
        let stop: Vec<String> = ENGLISH_STOP_WORDS.iter().map(|s| s.to_string()).collect();
        SimilarityEngine::new(&stop)
    }

    #[test]
    fn test_small_corpus_is_empty() {
        let corpus = ["a", "b"];
        assert!(engine().rank("c", &corpus, 3).is_empty());
        let empty: [&str; 0] = [];
        assert!(engine().rank("c", &empty, 3).is_empty());
    }

    #[test]
    fn test_identical_copy_ranks_first() {
        let corpus = [
            "Went hiking with friends in the mountains",
            "Work deadlines are piling up again",
            "Slept badly, the neighbours were loud",
            "Work deadlines keep piling up and my manager is stressed",
        ];
        let hits = engine().rank("Work deadlines keep piling up and my manager is stressed", &corpus, 3);
        assert_eq!(hits[0].index, 3);
        assert!((hits[0].score - 1.0).abs() < 1e-9);
        assert_eq!(hits[1].index, 1);
        assert!(hits[1].score > 0.0 && hits[1].score < 1.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let corpus = ["apples oranges", "bananas grapes", "cherries plums"];
        let hits = engine().rank("spaceship rocket", &corpus, 3);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.score == 0.0));
        // ties keep corpus order
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_stop_word_only_query() {
        let corpus = ["the cat sat", "a dog ran", "birds sing loudly"];
        let hits = engine().rank("the and of", &corpus, 2);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn test_top_n_truncates() {
        let corpus = ["rain today", "rain again", "sunny rain", "cloudy"];
        let hits = engine().rank("rain", &corpus, 2);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
    }
}
