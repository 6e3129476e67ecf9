use anyhow::{Context, Result};
use search_core::config::ServerConfig;
use search_core::tokenizer::StopWords;
use search_core::{DocId, DocumentStatus, SearchServer};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub id: DocId,
    pub terms: Vec<String>,
    pub status: DocumentStatus,
}

/// `.json` and `.jsonl` files under `input` (or `input` itself), sorted by path.
pub fn collect_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

pub fn load_documents(input: &Path) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in collect_files(input) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut docs)?;
        } else {
            load_json(&file, &mut docs)?;
        }
    }
    tracing::info!(docs = docs.len(), input = %input.display(), "loaded documents");
    Ok(docs)
}

fn load_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed document", file.display(), n + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn load_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "skipping file without documents"),
    }
    Ok(())
}

pub fn build_server(docs: &[InputDoc], stop_words: &str, config: ServerConfig) -> Result<SearchServer> {
    let mut server = SearchServer::with_config(StopWords::from_text(stop_words)?, config)?;
    for doc in docs {
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("adding document {}", doc.id))?;
    }
    tracing::info!(docs = server.document_count(), terms = server.index().term_count(), "index built");
    Ok(server)
}

/// One query per non-blank line.
pub fn read_queries(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
}
