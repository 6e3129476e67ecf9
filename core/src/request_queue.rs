use std::collections::VecDeque;

use crate::error::Result;
use crate::{DocId, DocumentStatus, RankedDocument, SearchServer};

/// Requests remembered by the queue: one per minute of a day.
pub const MIN_IN_DAY: usize = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    results: usize,
}

/// Forwards searches to a server and tracks how many of the last
/// `MIN_IN_DAY` requests came back empty.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self { server, requests: VecDeque::with_capacity(MIN_IN_DAY), no_result_requests: 0 }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<RankedDocument>> {
        let found = self.server.find_top_documents(raw_query)?;
        self.record(found.len());
        Ok(found)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<RankedDocument>> {
        let found = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(found.len());
        Ok(found)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<RankedDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let found = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(found.len());
        Ok(found)
    }

    pub fn no_result_requests(&self) -> usize { self.no_result_requests }

    fn record(&mut self, results: usize) {
        if self.requests.len() == MIN_IN_DAY {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.results == 0 {
                    self.no_result_requests -= 1;
                }
            }
        }
        if results == 0 {
            self.no_result_requests += 1;
        }
        self.requests.push_back(QueryResult { results });
    }
}
