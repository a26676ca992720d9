use crate::models::{normalize_records, Candidate};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the data store
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Data store REST client
///
/// Reads manufacturer organizations (with their products and certifications)
/// through the PostgREST interface and normalizes them into candidates.
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    table: String,
    select: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new data store client
    pub fn new(
        base_url: String,
        service_key: String,
        table: String,
        select: String,
        timeout_secs: u64,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            service_key,
            table,
            select,
            client,
        })
    }

    fn organizations_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select={}",
            self.base_url.trim_end_matches('/'),
            self.table,
            urlencoding::encode(&self.select)
        )
    }

    /// Fetch every listed manufacturer as a normalized candidate
    pub async fn fetch_candidates(&self) -> Result<Vec<Candidate>, SupabaseError> {
        let url = self.organizations_url();

        tracing::debug!("Fetching candidates from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch organizations: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch organizations: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let rows = match json {
            Value::Array(rows) => rows,
            _ => {
                return Err(SupabaseError::InvalidResponse(
                    "Expected an array of organizations".into(),
                ))
            }
        };

        let row_count = rows.len();
        let candidates = normalize_records(rows);

        tracing::debug!(
            "Fetched {} candidates ({} rows skipped)",
            candidates.len(),
            row_count - candidates.len()
        );

        Ok(candidates)
    }
}
