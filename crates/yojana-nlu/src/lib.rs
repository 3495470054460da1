//! # Yojana NLU
//! Query understanding — pattern-table intent classification, stopword-based
//! keyword extraction, and controlled-vocabulary entity extraction.
//!
//! Everything here is synchronous and allocation-light: the heavy lifting is
//! a pass of substring/regex checks over the lower-cased query.

pub mod entities;
pub mod intent;
pub mod keywords;

pub use entities::{AgeGroup, EntityExtractor, Gender, QueryEntities};
pub use intent::IntentClassifier;
pub use keywords::KeywordExtractor;
