use crate::core::ExternalRankings;
use crate::models::{ExternalRanking, FilterCriteria};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the AI ranking service
#[derive(Debug, Error)]
pub enum AiRankingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankRequest<'a> {
    criteria: &'a FilterCriteria,
    candidate_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct RankResponse {
    #[serde(default)]
    matches: Vec<RankedMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedMatch {
    #[serde(alias = "oem_id", alias = "organizationId")]
    oem_id: String,
    rank: u32,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    reasons: Vec<String>,
}

/// Client for the external LLM ranking endpoint
pub struct AiRankingClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl AiRankingClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, AiRankingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }

    /// Ask the ranking service to rank `candidate_ids` against `criteria`
    ///
    /// Ids the service does not mention are left to local scoring.
    pub async fn rank(
        &self,
        criteria: &FilterCriteria,
        candidate_ids: &[String],
    ) -> Result<ExternalRankings, AiRankingError> {
        let mut request = self.client.post(&self.endpoint).json(&RankRequest {
            criteria,
            candidate_ids,
        });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(AiRankingError::ApiError(format!(
                "Failed to rank candidates: {}",
                response.status()
            )));
        }

        let body: RankResponse = response.json().await?;

        let rankings: ExternalRankings = body
            .matches
            .into_iter()
            .filter(|m| candidate_ids.contains(&m.oem_id))
            .map(|m| {
                let ranking = ExternalRanking {
                    rank: m.rank,
                    score: m.score.round().clamp(0.0, 100.0) as u8,
                    reasons: m.reasons,
                };
                (m.oem_id, ranking)
            })
            .collect();

        tracing::debug!("AI ranking returned {} rankings", rankings.len());

        Ok(rankings)
    }
}
