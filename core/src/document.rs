use serde::{Deserialize, Serialize};

pub type DocId = u32;

/// One document of the corpus. `terms` is the tokenization of `raw_text`
/// in occurrence order and is never empty for a successfully extracted
/// document. `filtered_terms` and `stemmed_terms` are optional derived
/// views written by the cleanup/stemming passes; they are never folded
/// back into `terms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// 1-based, assigned at extraction, stable for the collection's lifetime.
    pub document_id: DocId,
    pub title: String,
    pub raw_text: String,
    pub terms: Vec<String>,
    #[serde(default)]
    pub filtered_terms: Option<Vec<String>>,
    #[serde(default)]
    pub stemmed_terms: Option<Vec<String>>,
}

impl Document {
    pub fn new(document_id: DocId, title: String, raw_text: String, terms: Vec<String>) -> Self {
        Self {
            document_id,
            title,
            raw_text,
            terms,
            filtered_terms: None,
            stemmed_terms: None,
        }
    }
}
