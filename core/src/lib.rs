pub mod cleanup;
pub mod document;
pub mod extraction;
pub mod models;
pub mod persist;
pub mod query;
pub mod stemming;

pub use document::{DocId, Document};
