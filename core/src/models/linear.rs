//! Baseline boolean model: an O(collection x document) scan with a
//! Jaccard match score. Serves as the correctness reference the
//! inverted-index model is tested against.

use crate::cleanup::StopwordList;
use crate::document::Document;
use crate::models::{
    represent_terms, DocRepresentation, ModelError, QueryRepresentation, RetrievalModel,
};
use crate::query::{self, QueryError};
use crate::stemming::stem_term;
use std::collections::HashSet;

pub struct LinearBooleanModel {
    stopwords: Option<StopwordList>,
}

impl LinearBooleanModel {
    pub fn new(stopwords: Option<StopwordList>) -> Self {
        Self { stopwords }
    }

    fn represent(&self, document: &Document, stopword_filtering: bool, stemming: bool) -> Vec<String> {
        represent_terms(document, stopword_filtering, stemming, self.stopwords.as_ref())
    }

    /// Scans the whole collection for documents whose representation
    /// contains `term`, preserving collection order.
    pub fn linear_search<'a>(
        &self,
        term: &str,
        collection: &'a [Document],
        stopword_filtering: bool,
        stemming: bool,
    ) -> Vec<&'a Document> {
        let mut needle = term.to_lowercase();
        if stemming {
            needle = stem_term(&needle);
        }
        collection
            .iter()
            .filter(|document| {
                self.represent(document, stopword_filtering, stemming)
                    .iter()
                    .any(|t| *t == needle)
            })
            .collect()
    }
}

/// Jaccard similarity over two term sets, with 0/0 defined as 0.0.
fn jaccard(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

impl RetrievalModel for LinearBooleanModel {
    fn document_to_representation(
        &self,
        document: &Document,
        stopword_filtering: bool,
        stemming: bool,
    ) -> DocRepresentation {
        DocRepresentation::Terms(self.represent(document, stopword_filtering, stemming))
    }

    fn query_to_representation(&self, query: &str) -> Result<QueryRepresentation, QueryError> {
        Ok(QueryRepresentation::Terms(query::query_terms(query)))
    }

    fn match_score(
        &self,
        document_representation: &DocRepresentation,
        query_representation: &QueryRepresentation,
    ) -> Result<f64, ModelError> {
        match (document_representation, query_representation) {
            (DocRepresentation::Terms(doc_terms), QueryRepresentation::Terms(query_terms)) => {
                Ok(jaccard(doc_terms, query_terms))
            }
            _ => Err(ModelError::RepresentationMismatch { expected: "term sequences" }),
        }
    }
}
