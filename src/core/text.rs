//! Shared tokenizers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Two or more word characters, the vectoriser's notion of a term
    static ref RE_TERM: Regex = Regex::new(r"\b\w\w+\b").unwrap();

    /// Letters with inner apostrophes, so "can't" stays one token
    static ref RE_WORD: Regex = Regex::new(r"[a-z]+(?:'[a-z]+)*").unwrap();
}

/// Lowercased terms of 2+ word characters
pub fn terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    RE_TERM
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lowercased words, apostrophes kept. Curly apostrophes are normalised.
pub fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase().replace('\u{2019}', "'");
    RE_WORD
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whitespace tokens, lowercased, with punctuation trimmed from both ends
pub fn plain_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}
