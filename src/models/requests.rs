use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::models::domain::{FilterCriteria, MatchView};

const MAX_SEARCH_LEN: usize = 200;

/// Request to filter, score and rank manufacturers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_criteria"))]
pub struct MatchRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub view: MatchView,
    #[validate(range(min = 1, max = 500))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default, alias = "use_ai_ranking", rename = "useAiRanking")]
    pub use_ai_ranking: bool,
    /// Raw organization rows supplied inline; fetched from the data store when absent
    #[serde(default)]
    pub candidates: Option<Vec<Value>>,
}

fn validate_criteria(req: &MatchRequest) -> Result<(), ValidationError> {
    let criteria = &req.criteria;

    if criteria.search.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::new("search_too_long"));
    }

    for range in [criteria.moq_range, criteria.lead_time_range].into_iter().flatten() {
        if range.min > range.max {
            return Err(ValidationError::new("inverted_range"));
        }
    }

    Ok(())
}
