pub mod batch;
pub mod concurrent_map;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod execution;
pub mod index;
pub mod paginator;
pub mod query;
pub mod request_queue;
pub mod server;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use batch::{process_queries, process_queries_joined};
pub use concurrent_map::ConcurrentMap;
pub use config::ServerConfig;
pub use duplicates::remove_duplicates;
pub use error::{Result, SearchError};
pub use execution::ExecutionPolicy;
pub use paginator::Paginator;
pub use request_queue::RequestQueue;
pub use server::SearchServer;

pub type DocId = i32;

/// Number of documents returned by a top-K search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub rating: i32,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl RankedDocument {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self { Self { id, relevance, rating } }
}
