use crate::error::{Result, SearchError};
use std::collections::BTreeSet;

/// Split text into whitespace-delimited, non-empty tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// A term is valid when it has no control characters (code points below space).
pub fn is_valid_term(term: &str) -> bool {
    !term.chars().any(|c| c < ' ')
}

/// Terms excluded from both indexing and querying. Fixed once built.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from any collection of words. Empty strings are dropped; a word
    /// with a control character fails the whole set.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_term(word) {
                return Err(SearchError::invalid(format!("stop word {word:?} contains control characters")));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    /// Build from a whitespace separated list, e.g. `"and in on"`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(tokenize(text))
    }

    pub fn contains(&self, term: &str) -> bool { self.words.contains(term) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Tokenize a document body, dropping stop words. Any invalid token fails
    /// the whole text.
    pub fn filter_text<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut terms = Vec::new();
        for token in tokenize(text) {
            if !is_valid_term(token) {
                return Err(SearchError::invalid(format!("term {token:?} contains control characters")));
            }
            if !self.contains(token) {
                terms.push(token);
            }
        }
        Ok(terms)
    }
}
