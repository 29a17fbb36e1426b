//! Porter stemming of document and query terms.

use crate::document::Document;
use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

pub fn stem_term(term: &str) -> String {
    STEMMER.stem(term).to_string()
}

pub fn stem_query_terms(terms: &[String]) -> Vec<String> {
    terms.iter().map(|t| stem_term(t)).collect()
}

/// Stems every document of the collection into `stemmed_terms`, working
/// from `filtered_terms` when the filtering pass has run, else from the
/// raw terms. `terms` itself is left untouched.
pub fn stem_all_documents(collection: &mut [Document]) {
    for document in collection.iter_mut() {
        let source = document.filtered_terms.as_ref().unwrap_or(&document.terms);
        document.stemmed_terms = Some(source.iter().map(|t| stem_term(t)).collect());
    }
}
