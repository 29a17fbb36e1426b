//! Stop word handling: symbol stripping, stop word lists, and the
//! collection-wide filtering pass that populates `filtered_terms`.

use crate::document::Document;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Removes punctuation marks and similar symbols from a term.
/// Possessive "'s" endings are dropped before the apostrophe itself is.
pub fn remove_symbols(text: &str) -> String {
    let depossessed = text.replace("'s", "");
    depossessed
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// A set of lowercase stop words. Construction goes through one of the
/// loaders below or [`create_stop_word_list_by_frequency`]; membership
/// tests are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordList {
    words: HashSet<String>,
}

impl StopwordList {
    pub fn new(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.words.contains(&term.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Removes all stop words from a term list. Each term is freed of
    /// symbols first; terms that end up empty are dropped as well.
    pub fn filter_term_list(&self, terms: &[String]) -> Vec<String> {
        terms
            .iter()
            .map(|t| remove_symbols(t))
            .filter(|t| !t.is_empty() && !self.is_stop_word(t))
            .collect()
    }
}

/// Loads a raw stop word file, one word per line (englishST.txt format).
/// The path is always passed in explicitly; there is no built-in default.
pub fn load_stop_word_list(raw_file_path: &Path) -> Result<StopwordList> {
    let content = fs::read_to_string(raw_file_path)
        .with_context(|| format!("reading stop word file {}", raw_file_path.display()))?;
    Ok(StopwordList::new(
        content
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    ))
}

/// Loads a stop word list persisted as a JSON array of strings.
pub fn load_stopwords_json(file_path: &Path) -> Result<StopwordList> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("reading stop word file {}", file_path.display()))?;
    let words: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("parsing stop word file {}", file_path.display()))?;
    Ok(StopwordList::new(words))
}

/// Saves a stop word list as a JSON array of strings, sorted for stable output.
pub fn save_stopwords_json(stopwords: &StopwordList, file_path: &Path) -> Result<()> {
    let mut words: Vec<&String> = stopwords.words.iter().collect();
    words.sort();
    let json = serde_json::to_string_pretty(&words)?;
    fs::write(file_path, json)
        .with_context(|| format!("writing stop word file {}", file_path.display()))?;
    Ok(())
}

/// Generates a stop word list from collection term frequencies, after
/// J. C. Crouch (1990): the lower-frequency half of the vocabulary is
/// treated as stop words.
pub fn create_stop_word_list_by_frequency(collection: &[Document]) -> StopwordList {
    let mut freq: HashMap<&str, u32> = HashMap::new();
    for document in collection {
        for term in &document.terms {
            *freq.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(&str, u32)> = freq.into_iter().collect();
    // Secondary sort on the term keeps ties deterministic.
    ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    let cutoff = ranked.len() / 2;
    StopwordList::new(ranked[..cutoff].iter().map(|(w, _)| w.to_string()))
}

/// Filters every document of the collection, writing the result into
/// `filtered_terms`. `terms` itself is left untouched.
pub fn filter_collection(collection: &mut [Document], stopwords: &StopwordList) {
    for document in collection.iter_mut() {
        document.filtered_terms = Some(stopwords.filter_term_list(&document.terms));
    }
    tracing::debug!(
        num_docs = collection.len(),
        num_stopwords = stopwords.len(),
        "filtered collection"
    );
}
