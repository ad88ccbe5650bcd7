//! Ingredient hazard analysis engine.
//!
//! The pipeline is a chain of pure functions over an immutable
//! [`lexicon::LexiconStore`]: raw input is normalized and tokenized,
//! each token is resolved against the alias index (exact first, then a
//! fuzzy token-set scan), resolved items are deduplicated by canonical
//! id, and two composite 0-100 risk scores are derived from the result.

pub mod analysis;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod telemetry;
