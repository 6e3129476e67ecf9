use search_core::config::ServerConfig;
use search_core::tokenizer::StopWords;
use search_core::{DocumentStatus, ExecutionPolicy, RankedDocument, SearchServer, RELEVANCE_EPSILON};

fn corpus(config: ServerConfig) -> SearchServer {
    let mut server = SearchServer::with_config(StopWords::from_text("and with of").unwrap(), config).unwrap();
    let words = ["rat", "pet", "curly", "nasty", "funny", "hair", "tail", "dog", "cat", "very"];
    for id in 0..200 {
        let text: Vec<&str> = (0..8).map(|k| words[(id * 7 + k * k + id / 3) % words.len()]).collect();
        let status = if id % 11 == 0 { DocumentStatus::Banned } else { DocumentStatus::Actual };
        server.add_document(id as i32, &text.join(" and "), status, &[(id % 13) as i32, 3]).unwrap();
    }
    server
}

fn assert_same(a: &[RankedDocument], b: &[RankedDocument]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!((x.relevance - y.relevance).abs() < RELEVANCE_EPSILON);
        assert_eq!(x.rating, y.rating);
    }
}

#[test]
fn parallel_ranking_matches_sequential() {
    for shard_count in [1, 3, 64] {
        let server = corpus(ServerConfig { shard_count, ..ServerConfig::default() });
        for query in ["curly dog -tail", "rat pet funny hair", "very -nasty cat", "dog"] {
            let seq = server
                .find_top_documents_with(ExecutionPolicy::Sequential, query, |_, status, _| status == DocumentStatus::Actual)
                .unwrap();
            let par = server
                .find_top_documents_with(ExecutionPolicy::Parallel, query, |_, status, _| status == DocumentStatus::Actual)
                .unwrap();
            assert_same(&seq, &par);
        }
    }
}

#[test]
fn parallel_match_matches_sequential() {
    let server = corpus(ServerConfig::default());
    for id in [0, 17, 199] {
        for query in ["curly dog cat rat", "tail -dog", "pet -unknown"] {
            assert_eq!(
                server.match_document_with(ExecutionPolicy::Sequential, query, id).unwrap(),
                server.match_document_with(ExecutionPolicy::Parallel, query, id).unwrap(),
            );
        }
    }
}

#[test]
fn parallel_config_drives_default_calls() {
    let config = ServerConfig { shard_count: 8, execution: ExecutionPolicy::Parallel };
    let mut par = corpus(config);
    let mut seq = corpus(ServerConfig::default());
    for id in (0..200).step_by(3) {
        par.remove_document(id);
        seq.remove_document(id);
    }
    assert_eq!(par.iter().collect::<Vec<_>>(), seq.iter().collect::<Vec<_>>());
    for id in &seq {
        assert_eq!(par.word_frequencies(id), seq.word_frequencies(id));
    }
    assert_same(&par.find_top_documents("curly hair -cat").unwrap(), &seq.find_top_documents("curly hair -cat").unwrap());
}

#[test]
fn concurrent_readers_share_one_server() {
    let server = corpus(ServerConfig::default());
    let expected = server.find_top_documents("funny tail").unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..20 {
                    assert_eq!(server.find_top_documents("funny tail").unwrap(), expected);
                }
            });
        }
    });
}
