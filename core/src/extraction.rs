//! Extraction of documents from a flat corpus text file (Aesop fable
//! format: records separated by four newlines, two preamble blocks
//! before the first fable, title split from body by three newlines).

use crate::document::Document;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref TERM_RE: Regex = Regex::new(r"\b\w+\b").expect("valid regex");
}

/// Tokenizes raw document text into lowercase terms, occurrence order
/// preserved. NFKC normalization folds typographic variants first.
pub fn extract_terms(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    TERM_RE
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Loads a corpus file and extracts each listed fable as a Document.
/// Ids are 1-based in file order; titles are rendered `{id:02}{Name}`
/// with spaces removed. Records that yield no terms are skipped.
pub fn extract_collection(source_file_path: &Path) -> Result<Vec<Document>> {
    let content = fs::read_to_string(source_file_path)
        .with_context(|| format!("reading corpus file {}", source_file_path.display()))?;

    // The first two blocks are front matter, not fables.
    let records = content.split("\n\n\n\n").skip(2);

    let mut collection = Vec::new();
    let mut next_id = 1;
    for record in records {
        if record.trim().is_empty() {
            continue;
        }
        let Some((name, body)) = record.split_once("\n\n\n") else {
            let fragment: String = record.chars().take(40).collect();
            tracing::warn!(fragment = %fragment, "skipping record without title separator");
            continue;
        };
        let terms = extract_terms(body);
        if terms.is_empty() {
            tracing::warn!(name = name.trim(), "skipping record with no terms");
            continue;
        }
        let title = format!("{:02}{}", next_id, name.trim().replace(' ', ""));
        collection.push(Document::new(next_id, title, body.to_string(), terms));
        next_id += 1;
    }

    tracing::info!(
        num_docs = collection.len(),
        source = %source_file_path.display(),
        "extracted collection"
    );
    Ok(collection)
}
