use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, SearchError};
use crate::{DocId, DocumentMeta, ExecutionPolicy};

pub type TermFreqs = BTreeMap<String, f64>;
pub type Postings = BTreeMap<DocId, f64>;

/// Forward and inverted views over the same postings, plus per-document
/// metadata and the ordered list of live ids. Every mutation goes through
/// `insert`/`remove` so the two views never drift apart.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    doc_to_terms: BTreeMap<DocId, TermFreqs>,
    term_to_docs: BTreeMap<String, Postings>,
    documents: BTreeMap<DocId, DocumentMeta>,
    document_ids: Vec<DocId>, // ascending
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn contains(&self, id: DocId) -> bool { self.documents.contains_key(&id) }

    pub fn document(&self, id: DocId) -> Option<&DocumentMeta> { self.documents.get(&id) }

    /// Index an already tokenized and stop-word filtered document.
    pub fn insert(&mut self, id: DocId, terms: &[&str], meta: DocumentMeta) -> Result<()> {
        if id < 0 {
            return Err(SearchError::invalid(format!("document id {id} is negative")));
        }
        if self.contains(id) {
            return Err(SearchError::invalid(format!("document id {id} already exists")));
        }

        let mut row = TermFreqs::new();
        if !terms.is_empty() {
            let inv_count = 1.0 / terms.len() as f64;
            for term in terms {
                *row.entry((*term).to_string()).or_insert(0.0) += inv_count;
            }
        }
        for (term, freq) in &row {
            self.term_to_docs.entry(term.clone()).or_default().insert(id, *freq);
        }
        self.doc_to_terms.insert(id, row);
        self.documents.insert(id, meta);
        if let Err(pos) = self.document_ids.binary_search(&id) {
            self.document_ids.insert(pos, id);
        }
        Ok(())
    }

    /// Remove a document from every structure. Returns false if it was absent.
    pub fn remove(&mut self, id: DocId, policy: ExecutionPolicy) -> bool {
        let Some(row) = self.doc_to_terms.remove(&id) else {
            return false;
        };
        self.documents.remove(&id);

        let ids = &mut self.document_ids;
        let postings = &mut self.term_to_docs;
        match policy {
            ExecutionPolicy::Sequential => {
                erase_sorted(ids, id);
                for term in row.keys() {
                    if let Some(docs) = postings.get_mut(term) {
                        docs.remove(&id);
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                rayon::join(
                    || erase_sorted(ids, id),
                    || {
                        postings
                            .par_iter_mut()
                            .filter(|(term, _)| row.contains_key(term.as_str()))
                            .for_each(|(_, docs)| {
                                docs.remove(&id);
                            });
                    },
                );
            }
        }
        for term in row.keys() {
            if self.term_to_docs.get(term).is_some_and(|docs| docs.is_empty()) {
                self.term_to_docs.remove(term);
            }
        }
        true
    }

    /// Owned copy of the document's term frequencies; empty if the id is absent.
    pub fn word_frequencies(&self, id: DocId) -> TermFreqs {
        self.doc_to_terms.get(&id).cloned().unwrap_or_default()
    }

    /// Distinct terms of a document, frequencies ignored.
    pub fn vocabulary(&self, id: DocId) -> Option<BTreeSet<&str>> {
        self.doc_to_terms.get(&id).map(|row| row.keys().map(String::as_str).collect())
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> { self.term_to_docs.get(term) }

    pub fn document_contains(&self, id: DocId, term: &str) -> bool {
        self.doc_to_terms.get(&id).is_some_and(|row| row.contains_key(term))
    }

    /// ln(N / df), or None when no live document holds the term.
    pub fn inverse_document_freq(&self, term: &str) -> Option<f64> {
        let df = self.postings(term)?.len();
        if df == 0 {
            return None;
        }
        Some((self.len() as f64 / df as f64).ln())
    }

    pub fn term_count(&self) -> usize { self.term_to_docs.len() }

    pub fn ids(&self) -> std::iter::Copied<std::slice::Iter<'_, DocId>> {
        self.document_ids.iter().copied()
    }

    pub fn document_id_at(&self, ordinal: usize) -> Result<DocId> {
        self.document_ids
            .get(ordinal)
            .copied()
            .ok_or(SearchError::OutOfRange { ordinal, count: self.document_ids.len() })
    }
}

fn erase_sorted(ids: &mut Vec<DocId>, id: DocId) {
    if let Ok(pos) = ids.binary_search(&id) {
        ids.remove(pos);
    }
}

/// Floor of the mean; zero for no ratings.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    sum.div_euclid(ratings.len() as i64) as i32
}
