use serde::{Deserialize, Serialize};
use crate::models::domain::{Candidate, MatchView, ScoredResult};

/// Candidate as rendered by the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredOem {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub match_score: u8,
    pub match_reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_rank: Option<u32>,
    pub tags: Vec<String>,
}

impl From<ScoredResult> for ScoredOem {
    fn from(result: ScoredResult) -> Self {
        Self {
            match_score: result.match_score.score(),
            match_reasons: result.match_score.reasons().to_vec(),
            ai_rank: result.match_score.external_rank(),
            candidate: result.candidate,
            tags: result.tags,
        }
    }
}

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub results: Vec<ScoredOem>,
    pub total_candidates: usize,
    pub filtered_candidates: usize,
    pub view: MatchView,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Cache invalidation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateCacheResponse {
    pub success: bool,
}
