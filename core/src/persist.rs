//! JSON persistence of a document collection. The file holds one JSON
//! array of document objects; `filtered_terms` and `stemmed_terms` may
//! be null or absent on load.

use crate::document::Document;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_collection(collection: &[Document], file_path: &Path) -> Result<()> {
    let json = serde_json::to_string(collection)?;
    fs::write(file_path, json)
        .with_context(|| format!("writing collection file {}", file_path.display()))?;
    tracing::info!(num_docs = collection.len(), path = %file_path.display(), "saved collection");
    Ok(())
}

/// Loads a persisted collection. A missing file is treated as an empty
/// collection, with a warning; a present but unparsable file is an error.
pub fn load_collection(file_path: &Path) -> Result<Vec<Document>> {
    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %file_path.display(), "no collection found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("reading collection file {}", file_path.display()));
        }
    };
    let collection: Vec<Document> = serde_json::from_str(&content)
        .with_context(|| format!("parsing collection file {}", file_path.display()))?;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_empty_collection() {
        let dir = tempdir().unwrap();
        let loaded = load_collection(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn tolerates_absent_and_null_optional_views() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("collection.json");
        fs::write(
            &path,
            r#"[
                {"document_id": 1, "title": "01A", "raw_text": "a fox", "terms": ["a", "fox"],
                 "filtered_terms": null, "stemmed_terms": ["fox"]},
                {"document_id": 2, "title": "02B", "raw_text": "a dog", "terms": ["a", "dog"]}
            ]"#,
        )
        .unwrap();
        let loaded = load_collection(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded[0].filtered_terms.is_none());
        assert_eq!(loaded[0].stemmed_terms.as_deref(), Some(["fox".to_string()].as_slice()));
        assert!(loaded[1].filtered_terms.is_none());
        assert!(loaded[1].stemmed_terms.is_none());
    }

    #[test]
    fn save_then_load_preserves_ids_and_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("collection.json");
        let docs = vec![
            Document::new(1, "01A".into(), "x".into(), vec!["x".into()]),
            Document::new(2, "02B".into(), "y".into(), vec!["y".into()]),
        ];
        save_collection(&docs, &path).unwrap();
        let loaded = load_collection(&path).unwrap();
        let ids: Vec<u32> = loaded.iter().map(|d| d.document_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
