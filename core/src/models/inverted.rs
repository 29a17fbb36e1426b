//! Inverted-index boolean model: one term -> posting-set index built
//! per collection, boolean queries answered by set algebra over the
//! posting lists instead of a corpus scan.

use crate::cleanup::StopwordList;
use crate::document::{DocId, Document};
use crate::models::{
    represent_terms, DocRepresentation, ModelError, QueryRepresentation, RetrievalModel,
};
use crate::query::{parse_query, QueryError, QueryNode};
use crate::stemming::stem_term;
use std::collections::{BTreeMap, BTreeSet};

/// Posting lists for exactly one collection. Immutable once built;
/// indexing another collection replaces the whole structure.
struct Index {
    postings: BTreeMap<String, BTreeSet<DocId>>,
    /// All indexed document ids; the complement universe for NOT.
    universe: BTreeSet<DocId>,
    /// Whether the index was built over stemmed terms. Query literals
    /// get the same treatment so spellings line up.
    stemming: bool,
}

pub struct InvertedIndexBooleanModel {
    stopwords: Option<StopwordList>,
    index: Option<Index>,
}

impl InvertedIndexBooleanModel {
    /// A fresh model owns no index; querying before
    /// [`index_collection`](Self::index_collection) fails with
    /// [`ModelError::NotIndexed`].
    pub fn new(stopwords: Option<StopwordList>) -> Self {
        Self { stopwords, index: None }
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Builds the posting lists for `collection` in one O(total tokens)
    /// pass. Any prior index is discarded, never merged.
    pub fn index_collection(
        &mut self,
        collection: &[Document],
        stopword_filtering: bool,
        stemming: bool,
    ) {
        let mut postings: BTreeMap<String, BTreeSet<DocId>> = BTreeMap::new();
        let mut universe = BTreeSet::new();
        for document in collection {
            universe.insert(document.document_id);
            for term in represent_terms(document, stopword_filtering, stemming, self.stopwords.as_ref())
            {
                postings.entry(term).or_default().insert(document.document_id);
            }
        }
        tracing::debug!(
            num_docs = universe.len(),
            num_terms = postings.len(),
            "built inverted index"
        );
        self.index = Some(Index { postings, universe, stemming });
    }

    /// Evaluates a parsed boolean expression to the set of matching
    /// document ids.
    pub fn evaluate(&self, node: &QueryNode) -> Result<BTreeSet<DocId>, ModelError> {
        let index = self.index.as_ref().ok_or(ModelError::NotIndexed)?;
        Ok(eval_node(index, node))
    }

    /// Parses and evaluates `query`, mapping the resulting ids back to
    /// documents in collection order.
    pub fn search<'a>(
        &self,
        query: &str,
        collection: &'a [Document],
    ) -> Result<Vec<&'a Document>, ModelError> {
        let node = parse_query(query)?;
        let ids = self.evaluate(&node)?;
        Ok(collection
            .iter()
            .filter(|d| ids.contains(&d.document_id))
            .collect())
    }
}

fn eval_node(index: &Index, node: &QueryNode) -> BTreeSet<DocId> {
    match node {
        QueryNode::Term(term) => {
            let key = if index.stemming { stem_term(term) } else { term.clone() };
            // A term absent from the index is an empty result, not a fault.
            index.postings.get(&key).cloned().unwrap_or_default()
        }
        QueryNode::And(lhs, rhs) => {
            let left = eval_node(index, lhs);
            if left.is_empty() {
                // Empty intersection operand short-circuits.
                return left;
            }
            let right = eval_node(index, rhs);
            left.intersection(&right).copied().collect()
        }
        QueryNode::Or(lhs, rhs) => {
            let left = eval_node(index, lhs);
            let right = eval_node(index, rhs);
            left.union(&right).copied().collect()
        }
        QueryNode::Not(inner) => {
            let matched = eval_node(index, inner);
            index.universe.difference(&matched).copied().collect()
        }
    }
}

impl RetrievalModel for InvertedIndexBooleanModel {
    /// The inverted model represents a document by its id; the term
    /// view is cached implicitly as posting-list membership, so the
    /// flags play no role here.
    fn document_to_representation(
        &self,
        document: &Document,
        _stopword_filtering: bool,
        _stemming: bool,
    ) -> DocRepresentation {
        DocRepresentation::DocId(document.document_id)
    }

    fn query_to_representation(&self, query: &str) -> Result<QueryRepresentation, QueryError> {
        Ok(QueryRepresentation::Expression(parse_query(query)?))
    }

    /// Binary, not graded: 1.0 if the document's id is in the evaluated
    /// result set, else 0.0.
    fn match_score(
        &self,
        document_representation: &DocRepresentation,
        query_representation: &QueryRepresentation,
    ) -> Result<f64, ModelError> {
        match (document_representation, query_representation) {
            (DocRepresentation::DocId(id), QueryRepresentation::Expression(node)) => {
                let ids = self.evaluate(node)?;
                Ok(if ids.contains(id) { 1.0 } else { 0.0 })
            }
            _ => Err(ModelError::RepresentationMismatch {
                expected: "document id and boolean expression",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: u32, terms: &[&str]) -> Document {
        Document::new(
            id,
            format!("{id:02}T"),
            terms.join(" "),
            terms.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn fox_dog_collection() -> Vec<Document> {
        vec![
            doc(1, &["the", "fox", "runs"]),
            doc(2, &["the", "dog", "sleeps"]),
        ]
    }

    fn ids(docs: &[&Document]) -> Vec<u32> {
        docs.iter().map(|d| d.document_id).collect()
    }

    #[test]
    fn querying_before_indexing_is_an_explicit_error() {
        let model = InvertedIndexBooleanModel::new(None);
        let err = model.search("fox", &[]).unwrap_err();
        assert_eq!(err, ModelError::NotIndexed);
    }

    #[test]
    fn single_term_and_boolean_queries() {
        let collection = fox_dog_collection();
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, false);

        assert_eq!(ids(&model.search("fox", &collection).unwrap()), vec![1]);
        assert_eq!(ids(&model.search("fox OR dog", &collection).unwrap()), vec![1, 2]);
        assert!(model.search("fox AND dog", &collection).unwrap().is_empty());
        assert_eq!(ids(&model.search("the", &collection).unwrap()), vec![1, 2]);
    }

    #[test]
    fn not_complements_against_the_indexed_universe() {
        let collection = fox_dog_collection();
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, false);
        assert_eq!(ids(&model.search("NOT fox", &collection).unwrap()), vec![2]);
        assert_eq!(ids(&model.search("the AND NOT dog", &collection).unwrap()), vec![1]);
    }

    #[test]
    fn bare_adjacent_terms_are_an_implicit_and() {
        let collection = fox_dog_collection();
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, false);
        assert!(model.search("fox dog", &collection).unwrap().is_empty());
        assert_eq!(ids(&model.search("fox runs", &collection).unwrap()), vec![1]);
    }

    #[test]
    fn absent_term_resolves_to_empty_not_error() {
        let collection = fox_dog_collection();
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, false);
        assert!(model.search("unicorn", &collection).unwrap().is_empty());
    }

    #[test]
    fn reindexing_replaces_the_prior_collection() {
        let old = fox_dog_collection();
        let new = vec![doc(7, &["owl"])];
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&old, false, false);
        model.index_collection(&new, false, false);
        // Terms of the old collection are gone, not merged.
        assert!(model.search("fox", &old).unwrap().is_empty());
        assert_eq!(ids(&model.search("owl", &new).unwrap()), vec![7]);
    }

    #[test]
    fn rebuilding_unchanged_collection_is_idempotent() {
        let collection = fox_dog_collection();
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, false);
        let first = model.index.as_ref().unwrap().postings.clone();
        model.index_collection(&collection, false, false);
        let second = &model.index.as_ref().unwrap().postings;
        assert_eq!(&first, second);
    }

    #[test]
    fn stemmed_index_matches_unstemmed_query_spelling() {
        let collection = vec![doc(1, &["running"])];
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, true);
        assert_eq!(ids(&model.search("runs", &collection).unwrap()), vec![1]);
    }

    #[test]
    fn match_score_is_binary_membership() {
        let collection = fox_dog_collection();
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, false);
        let qr = model.query_to_representation("fox").unwrap();
        let d1 = model.document_to_representation(&collection[0], false, false);
        let d2 = model.document_to_representation(&collection[1], false, false);
        assert_eq!(model.match_score(&d1, &qr).unwrap(), 1.0);
        assert_eq!(model.match_score(&d2, &qr).unwrap(), 0.0);
    }

    #[test]
    fn malformed_query_reports_the_fragment() {
        let collection = fox_dog_collection();
        let mut model = InvertedIndexBooleanModel::new(None);
        model.index_collection(&collection, false, false);
        let err = model.search("fox AND", &collection).unwrap_err();
        assert_eq!(err, ModelError::Query(QueryError::DanglingOperator("AND".into())));
    }
}
