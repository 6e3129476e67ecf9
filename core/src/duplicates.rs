use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::{DocId, SearchServer};

/// Remove every document whose set of distinct terms equals that of a
/// lower-id document. Returns the removed ids, ascending.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let duplicates = find_duplicates(server);
    for &id in &duplicates {
        server.remove_document(id);
    }
    info!(removed = duplicates.len(), remaining = server.document_count(), "duplicate scan finished");
    duplicates
}

fn find_duplicates(server: &SearchServer) -> Vec<DocId> {
    let index = server.index();
    let mut first_seen: BTreeMap<BTreeSet<&str>, DocId> = BTreeMap::new();
    let mut duplicates = Vec::new();
    for id in server.iter() {
        let vocabulary = index.vocabulary(id).unwrap_or_default();
        match first_seen.get(&vocabulary) {
            Some(&original) => {
                info!(doc_id = id, original, "found duplicate document");
                duplicates.push(id);
            }
            None => {
                first_seen.insert(vocabulary, id);
            }
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStatus;

    #[test]
    fn flags_identical_vocabularies_only() {
        let mut server = SearchServer::new("and with").unwrap();
        let docs = [
            (1, "funny pet and nasty rat"),
            (2, "funny pet with curly hair"),
            (3, "funny pet with curly hair"),
            (4, "funny pet and curly hair"),
            (5, "funny funny pet and nasty nasty rat"),
            (6, "funny pet and not very nasty rat"),
            (7, "very nasty rat and not very funny pet"),
            (8, "pet with rat and rat and rat"),
            (9, "nasty rat with curly hair"),
        ];
        for (id, text) in docs {
            server.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }

        assert_eq!(remove_duplicates(&mut server), vec![3, 4, 5, 7]);
        assert_eq!(server.iter().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);
        assert!(server.word_frequencies(3).is_empty());
        assert!(!server.word_frequencies(6).is_empty());
    }

    #[test]
    fn documents_without_terms_duplicate_each_other() {
        let mut server = SearchServer::new("the").unwrap();
        server.add_document(0, "the", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(1, "the the", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(remove_duplicates(&mut server), vec![1]);
    }
}
