use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

use crate::concurrent_map::ConcurrentMap;
use crate::config::ServerConfig;
use crate::error::{Result, SearchError};
use crate::index::{average_rating, InvertedIndex, TermFreqs};
use crate::query::{parse_query, Query};
use crate::tokenizer::StopWords;
use crate::{
    DocId, DocumentMeta, DocumentStatus, ExecutionPolicy, RankedDocument, MAX_RESULT_DOCUMENT_COUNT,
    RELEVANCE_EPSILON,
};

/// In-memory TF-IDF search over caller-identified documents.
///
/// Reads take `&self` and may run concurrently; `add_document` and
/// `remove_document` take `&mut self`, so the borrow checker enforces the
/// single-writer rule.
#[derive(Debug, Clone)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    config: ServerConfig,
}

impl SearchServer {
    /// Server with space separated stop words and the default config.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Self::with_config(StopWords::from_text(stop_words_text)?, ServerConfig::default())
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(StopWords::new(stop_words)?, ServerConfig::default())
    }

    pub fn with_config(stop_words: StopWords, config: ServerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { stop_words, index: InvertedIndex::new(), config })
    }

    pub fn config(&self) -> &ServerConfig { &self.config }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        let terms = self.stop_words.filter_text(text)?;
        let meta = DocumentMeta { rating: average_rating(ratings), status };
        self.index.insert(id, &terms, meta)?;
        debug!(doc_id = id, terms = terms.len(), ?status, "document added");
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.index.len() }

    /// Id at the given position in ascending id order.
    pub fn document_id(&self, ordinal: usize) -> Result<DocId> { self.index.document_id_at(ordinal) }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, DocId>> { self.index.ids() }

    pub fn word_frequencies(&self, id: DocId) -> TermFreqs { self.index.word_frequencies(id) }

    /// No-op for an unknown id.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(self.config.execution, id)
    }

    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocId) {
        if self.index.remove(id, policy) {
            debug!(doc_id = id, ?policy, "document removed");
        }
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<RankedDocument>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<RankedDocument>> {
        self.find_top_documents_by(raw_query, move |_, doc_status, _| doc_status == status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<RankedDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(self.config.execution, raw_query, predicate)
    }

    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<RankedDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(policy, &query, &predicate);
        sort_by_relevance(&mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    /// Plus terms present in the document, ascending, with its status. The
    /// term list is empty if any minus term is present.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(self.config.execution, raw_query, id)
    }

    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let status = self.index.document(id).ok_or(SearchError::NotFound(id))?.status;
        let in_doc = |term: &String| self.index.document_contains(id, term);

        let matched = match policy {
            ExecutionPolicy::Sequential => {
                if query.minus_terms.iter().any(in_doc) {
                    Vec::new()
                } else {
                    query.plus_terms.iter().filter(|&t| in_doc(t)).cloned().collect()
                }
            }
            ExecutionPolicy::Parallel => {
                if query.minus_terms.par_iter().any(in_doc) {
                    Vec::new()
                } else {
                    query.plus_terms.par_iter().filter(|&t| in_doc(t)).cloned().collect()
                }
            }
        };
        Ok((matched, status))
    }

    fn find_all_documents<P>(&self, policy: ExecutionPolicy, query: &Query, predicate: &P) -> Vec<RankedDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let mut relevance = match policy {
            ExecutionPolicy::Sequential => {
                let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
                for term in &query.plus_terms {
                    self.accumulate_term(term, predicate, |id, score| {
                        *relevance.entry(id).or_insert(0.0) += score;
                    });
                }
                relevance
            }
            ExecutionPolicy::Parallel => {
                let accumulator: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.config.shard_count);
                query.plus_terms.par_iter().for_each(|term| {
                    self.accumulate_term(term, predicate, |id, score| {
                        *accumulator.access(id) += score;
                    });
                });
                accumulator.merge_to_ordinary_map()
            }
        };

        for term in &query.minus_terms {
            if let Some(postings) = self.index.postings(term) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }

        relevance
            .into_iter()
            .filter_map(|(id, score)| {
                self.index.document(id).map(|meta| RankedDocument::new(id, score, meta.rating))
            })
            .collect()
    }

    fn accumulate_term<P, F>(&self, term: &str, predicate: &P, mut add: F)
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
        F: FnMut(DocId, f64),
    {
        let (Some(postings), Some(idf)) = (self.index.postings(term), self.index.inverse_document_freq(term)) else {
            return;
        };
        for (&id, &tf) in postings {
            let Some(meta) = self.index.document(id) else { continue };
            if predicate(id, meta.status, meta.rating) {
                add(id, tf * idf);
            }
        }
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Relevance descending; a run of relevances within `RELEVANCE_EPSILON` of
/// the run's first entry is ordered by rating descending.
pub fn sort_by_relevance(docs: &mut [RankedDocument]) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    let mut start = 0;
    while start < docs.len() {
        let head = docs[start].relevance;
        let mut end = start + 1;
        while end < docs.len() && (head - docs[end].relevance).abs() < RELEVANCE_EPSILON {
            end += 1;
        }
        docs[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        start = end;
    }
}
