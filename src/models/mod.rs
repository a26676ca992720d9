// Model exports
pub mod domain;
pub mod records;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Capabilities, Capability, CertificationPolicy, ExternalRanking, FilterCriteria,
    ListingWeights, MatchScore, MatchStrategy, MatchView, Product, ProductionScale,
    ResultsWeights, ScoredResult, ScoringScheme, ScoringWeights, SubscriptionTier, ValueRange,
};
pub use records::{normalize_records, OemRecord};
pub use requests::MatchRequest;
pub use responses::{ErrorResponse, HealthResponse, InvalidateCacheResponse, MatchResponse, ScoredOem};
