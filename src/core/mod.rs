// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod tags;

pub use filters::{
    matches_certifications_all, matches_certifications_any, matches_criteria, matches_moq_range,
};
pub use matcher::{rank_results, ExternalRankings, MatchResult, Matcher};
pub use scoring::{calculate_match_score, score_by_capability_weights, score_by_moq_lead_location};
pub use tags::{candidate_tags, synthesize_tags};
