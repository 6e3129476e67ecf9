use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use search_cli::{build_server, load_documents, read_queries, MatchOutput};
use search_core::config::{ServerConfig, DEFAULT_SHARD_COUNT};
use search_core::{
    process_queries, process_queries_joined, remove_duplicates, DocId, DocumentStatus, ExecutionPolicy, Paginator,
    RequestQueue,
};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    /// Input path (file or directory of .json/.jsonl documents)
    #[arg(long)]
    docs: PathBuf,
    /// Space separated stop words; falls back to SEARCH_STOP_WORDS
    #[arg(long)]
    stop_words: Option<String>,
    /// Rank and remove with the parallel policy
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Shards in the parallel relevance accumulator
    #[arg(long, default_value_t = DEFAULT_SHARD_COUNT)]
    shards: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Top documents for one query
    Search {
        #[arg(long)]
        query: String,
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
    },
    /// Query terms found in one document
    Match {
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
    /// Run every line of a file as a query
    Batch {
        #[arg(long)]
        queries: PathBuf,
        /// Print one flat list instead of one list per query
        #[arg(long, default_value_t = false)]
        joined: bool,
    },
    /// Remove documents with identical term sets
    Dedup,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let stop_words = cli.stop_words.or_else(|| std::env::var("SEARCH_STOP_WORDS").ok()).unwrap_or_default();
    let execution = if cli.parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential };
    let config = ServerConfig { shard_count: cli.shards, execution };
    let docs = load_documents(&cli.docs)?;
    let mut server = build_server(&docs, &stop_words, config)?;

    match cli.command {
        Commands::Search { query, status, page_size } => {
            let found = server.find_top_documents_by_status(&query, status.into())?;
            for (n, page) in Paginator::new(&found, page_size)?.into_iter().enumerate() {
                println!("page {}: {}", n + 1, serde_json::to_string(page)?);
            }
        }
        Commands::Match { query, id } => {
            let (terms, status) = server.match_document(&query, id)?;
            println!("{}", serde_json::to_string_pretty(&MatchOutput { id, terms, status })?);
        }
        Commands::Batch { queries, joined } => {
            let queries = read_queries(&queries)?;
            if joined {
                println!("{}", serde_json::to_string_pretty(&process_queries_joined(&server, &queries)?)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&process_queries(&server, &queries)?)?);
            }
            let mut queue = RequestQueue::new(&server);
            for query in &queries {
                queue.add_find_request(query)?;
            }
            tracing::info!(queries = queries.len(), empty = queue.no_result_requests(), "batch complete");
        }
        Commands::Dedup => {
            let removed = remove_duplicates(&mut server);
            println!("{}", serde_json::json!({ "removed": removed, "remaining": server.document_count() }));
        }
    }
    Ok(())
}
