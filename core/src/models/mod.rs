//! The retrieval-model family: a common capability contract plus its
//! boolean implementations. Models are selected by [`ModelKind`] at
//! construction time; kinds that are declared but not built return
//! [`ModelError::Unsupported`] immediately instead of a half-working
//! object.

pub mod inverted;
pub mod linear;

pub use inverted::InvertedIndexBooleanModel;
pub use linear::LinearBooleanModel;

use crate::cleanup::StopwordList;
use crate::document::{DocId, Document};
use crate::query::{QueryError, QueryNode};
use crate::stemming::stem_term;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    LinearBoolean,
    InvertedIndexBoolean,
    SignatureBoolean,
    VectorSpace,
    FuzzySet,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::LinearBoolean => "Boolean Model (Linear)",
            ModelKind::InvertedIndexBoolean => "Boolean Model (Inverted Index)",
            ModelKind::SignatureBoolean => "Boolean Model (Signatures)",
            ModelKind::VectorSpace => "Vector Space Model",
            ModelKind::FuzzySet => "Fuzzy Set Model",
        };
        f.write_str(name)
    }
}

impl ModelKind {
    /// Constructs the model for this kind. The signature, vector-space
    /// and fuzzy-set variants are extension points only and fail here,
    /// never at query time.
    pub fn build(self, stopwords: Option<StopwordList>) -> Result<Box<dyn RetrievalModel>, ModelError> {
        match self {
            ModelKind::LinearBoolean => Ok(Box::new(LinearBooleanModel::new(stopwords))),
            ModelKind::InvertedIndexBoolean => {
                Ok(Box::new(InvertedIndexBooleanModel::new(stopwords)))
            }
            other => Err(ModelError::Unsupported(other)),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0} is not implemented")]
    Unsupported(ModelKind),
    /// Distinct from an empty result: the model was asked to answer a
    /// query before any collection was indexed.
    #[error("no collection has been indexed yet")]
    NotIndexed,
    #[error("representation was built by a different model (expected {expected})")]
    RepresentationMismatch { expected: &'static str },
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Model-specific view of a document used for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocRepresentation {
    /// The (possibly filtered/stemmed) term sequence, used by the linear model.
    Terms(Vec<String>),
    /// The document id; the inverted model keeps the term view implicitly
    /// as posting-list membership.
    DocId(DocId),
}

/// Model-specific parsed form of a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRepresentation {
    /// Flat literal terms without operators, used by the linear model.
    Terms(Vec<String>),
    /// Boolean expression tree, used by the inverted model.
    Expression(QueryNode),
}

/// Capability contract every retrieval model satisfies. The query
/// runner and the tests are written once against this trait.
pub trait RetrievalModel {
    /// Derives the model's view of a document. Pure in the document and
    /// the two flags; stemming applies after stopword filtering; the
    /// document itself is never mutated.
    fn document_to_representation(
        &self,
        document: &Document,
        stopword_filtering: bool,
        stemming: bool,
    ) -> DocRepresentation;

    /// Parses a raw query string into the model's query form.
    fn query_to_representation(&self, query: &str) -> Result<QueryRepresentation, QueryError>;

    /// Similarity of a document and a query representation, higher is
    /// more relevant. Boolean models stay within [0.0, 1.0].
    fn match_score(
        &self,
        document_representation: &DocRepresentation,
        query_representation: &QueryRepresentation,
    ) -> Result<f64, ModelError>;
}

/// Shared term pipeline: the document's term sequence with stopword
/// filtering and stemming applied per flags. A precomputed
/// `filtered_terms` view is preferred when filtering is requested.
pub(crate) fn represent_terms(
    document: &Document,
    stopword_filtering: bool,
    stemming: bool,
    stopwords: Option<&StopwordList>,
) -> Vec<String> {
    let terms: Vec<String> = if stopword_filtering {
        if let Some(filtered) = &document.filtered_terms {
            filtered.clone()
        } else if let Some(sw) = stopwords {
            document
                .terms
                .iter()
                .filter(|t| !sw.is_stop_word(t))
                .cloned()
                .collect()
        } else {
            document.terms.clone()
        }
    } else {
        document.terms.clone()
    };
    if stemming {
        terms.iter().map(|t| stem_term(t)).collect()
    } else {
        terms
    }
}
