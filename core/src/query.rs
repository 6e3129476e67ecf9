use std::collections::BTreeSet;

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_term, tokenize, StopWords};

/// Parsed query. Duplicate terms collapse; stop words are already gone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_terms: BTreeSet<String>,
    pub minus_terms: BTreeSet<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool { self.plus_terms.is_empty() && self.minus_terms.is_empty() }
}

#[derive(Debug, PartialEq, Eq)]
struct QueryWord<'a> {
    term: &'a str,
    is_minus: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    let (term, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if term.is_empty() {
        return Err(SearchError::invalid("a lone '-' is not a query term"));
    }
    if term.starts_with('-') {
        return Err(SearchError::invalid(format!("query term {token:?} has more than one leading '-'")));
    }
    if !is_valid_term(term) {
        return Err(SearchError::invalid(format!("query term {token:?} contains control characters")));
    }
    Ok(QueryWord { term, is_minus })
}

/// Parse raw query text. One malformed term fails the whole query.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for token in tokenize(text) {
        let word = parse_query_word(token)?;
        if stop_words.contains(word.term) {
            continue;
        }
        if word.is_minus {
            query.minus_terms.insert(word.term.to_string());
        } else {
            query.plus_terms.insert(word.term.to_string());
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> BTreeSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn splits_plus_and_minus() {
        let stop = StopWords::from_text("and with").unwrap();
        let q = parse_query("curly -nasty funny and -with curly", &stop).unwrap();
        assert_eq!(q.plus_terms, set(&["curly", "funny"]));
        assert_eq!(q.minus_terms, set(&["nasty"]));
    }

    #[test]
    fn malformed_terms_fail_the_query() {
        let stop = StopWords::default();
        for bad in ["cat -", "cat --dog", "ca\u{1}t", "-do\u{1f}g"] {
            assert!(matches!(parse_query(bad, &stop), Err(SearchError::InvalidArgument(_))), "{bad:?}");
        }
    }

    #[test]
    fn empty_text_is_empty_query() {
        let q = parse_query("   ", &StopWords::default()).unwrap();
        assert!(q.is_empty());
    }

    #[test]
    fn inner_dash_is_kept() {
        let q = parse_query("well-known -x-ray", &StopWords::default()).unwrap();
        assert_eq!(q.plus_terms, set(&["well-known"]));
        assert_eq!(q.minus_terms, set(&["x-ray"]));
    }
}
