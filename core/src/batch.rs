use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::{RankedDocument, SearchServer};

/// Run each query through `find_top_documents` in parallel. Result `i`
/// belongs to query `i`. The first failing query fails the batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<RankedDocument>>>
where
    S: AsRef<str> + Sync,
{
    debug!(queries = queries.len(), "processing query batch");
    queries.par_iter().map(|query| server.find_top_documents(query.as_ref())).collect()
}

/// Same as [`process_queries`], flattened query-major.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<RankedDocument>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentStatus, SearchError};

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        let docs = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (i, text) in docs.iter().enumerate() {
            server.add_document(i as i32 + 1, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn results_follow_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair", "unknown"];
        let results = process_queries(&server, &queries).unwrap();
        assert_eq!(results.len(), queries.len());
        let lens: Vec<usize> = results.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![3, 5, 2, 0]);
        for (query, result) in queries.iter().zip(&results) {
            assert_eq!(result, &server.find_top_documents(query).unwrap());
        }
    }

    #[test]
    fn joined_is_query_major() {
        let server = server();
        let queries = vec!["curly hair".to_string(), "nasty rat -not".to_string()];
        let joined = process_queries_joined(&server, &queries).unwrap();
        let expected: Vec<RankedDocument> =
            process_queries(&server, &queries).unwrap().into_iter().flatten().collect();
        assert_eq!(joined.len(), 5);
        assert_eq!(joined, expected);
        assert_eq!(joined[0].id, 2);
    }

    #[test]
    fn malformed_query_fails_batch() {
        let server = server();
        let err = process_queries(&server, &["rat", "--rat"]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }
}
