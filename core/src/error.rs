use thiserror::Error;

use crate::DocId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("document {0} not found")]
    NotFound(DocId),

    #[error("ordinal {ordinal} out of range for {count} documents")]
    OutOfRange { ordinal: usize, count: usize },
}

impl SearchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SearchError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
