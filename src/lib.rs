//! OEM Match - matching, filtering and ranking for the OEM manufacturer marketplace
//!
//! The engine in [`core`] is pure and synchronous: it takes candidate
//! manufacturers and a buyer's criteria and returns a ranked, annotated list.
//! The rest of the crate serves it over HTTP and loads candidates from the
//! data store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{rank_results, ExternalRankings, MatchResult, Matcher};
pub use self::models::{Candidate, FilterCriteria, MatchScore, MatchStrategy, MatchView, ScoredResult, ScoringWeights};
