use crate::core::filters::{
    has_category_match, has_lead_time_in, has_location_criteria, has_location_match,
    has_product_moq_in, holds_certification,
};
use crate::models::{
    Candidate, ExternalRanking, FilterCriteria, ListingWeights, MatchScore, ResultsWeights,
    ScoringScheme, ScoringWeights, SubscriptionTier,
};

pub const CATEGORY_REASON: &str = "Category match";
pub const MOQ_REASON: &str = "MOQ within range";
pub const MOQ_PARTIAL_REASON: &str = "MOQ close to range";
pub const LEAD_TIME_REASON: &str = "Lead time suitable";
pub const LEAD_TIME_PARTIAL_REASON: &str = "Lead time slightly above range";
pub const CERTIFICATION_REASON: &str = "Has required certifications";
pub const LOCATION_REASON: &str = "Location match";

/// Partial MOQ credit when the minimum MOQ is within this factor of the upper bound
const MOQ_TOLERANCE: f64 = 1.5;
/// Partial lead time credit when lead time is within this factor of the upper bound
const LEAD_TIME_TOLERANCE: f64 = 1.2;

/// Compute the match score for one candidate
///
/// An external ranking, when present, replaces local computation entirely.
pub fn calculate_match_score(
    candidate: &Candidate,
    criteria: &FilterCriteria,
    scheme: ScoringScheme,
    weights: &ScoringWeights,
    external: Option<&ExternalRanking>,
) -> MatchScore {
    if let Some(ranking) = external {
        return MatchScore::from(ranking.clone());
    }

    let (score, reasons) = match scheme {
        ScoringScheme::CapabilityWeights => {
            score_by_capability_weights(candidate, criteria, &weights.listing)
        }
        ScoringScheme::MoqLeadLocation => {
            score_by_moq_lead_location(candidate, criteria, &weights.results)
        }
    };

    MatchScore::Local { score, reasons }
}

/// Listing-view score: additive points, clamped to 100
///
/// Evaluation order (and reason order): category, MOQ, lead time,
/// certifications, tier, capabilities. Criteria that were not requested
/// award nothing.
pub fn score_by_capability_weights(
    candidate: &Candidate,
    criteria: &FilterCriteria,
    weights: &ListingWeights,
) -> (u8, Vec<String>) {
    let mut points: u32 = 0;
    let mut reasons = Vec::new();

    if !criteria.categories.is_empty() && has_category_match(candidate, &criteria.categories) {
        points += weights.category;
        reasons.push(CATEGORY_REASON.to_string());
    }

    if criteria
        .moq_range
        .is_some_and(|range| has_product_moq_in(candidate, &range))
    {
        points += weights.moq;
        reasons.push(MOQ_REASON.to_string());
    }

    if criteria
        .lead_time_range
        .is_some_and(|range| has_lead_time_in(candidate, &range))
    {
        points += weights.lead_time;
        reasons.push(LEAD_TIME_REASON.to_string());
    }

    if criteria
        .certifications
        .iter()
        .any(|cert| holds_certification(candidate, cert))
    {
        points += weights.certification;
        reasons.push(CERTIFICATION_REASON.to_string());
    }

    let tier_bonus = weights.tier_bonus(candidate.tier);
    if tier_bonus > 0 {
        points += tier_bonus;
        reasons.push(tier_reason(candidate.tier));
    }

    for capability in criteria.capabilities.active() {
        if candidate.capabilities.has(capability) {
            points += weights.capability;
            reasons.push(capability.label().to_string());
        }
    }

    (points.min(100) as u8, reasons)
}

/// Results-view score: percentage of achievable MOQ / lead time / location weight
///
/// Only criteria the buyer set count towards the achievable total. MOQ uses
/// the candidate's display MOQ, lead time its slowest product. Missing
/// candidate data earns nothing for that criterion.
pub fn score_by_moq_lead_location(
    candidate: &Candidate,
    criteria: &FilterCriteria,
    weights: &ResultsWeights,
) -> (u8, Vec<String>) {
    let mut earned = 0.0;
    let mut achievable = 0.0;
    let mut reasons = Vec::new();

    if let Some(range) = criteria.moq_range {
        achievable += weights.moq;
        if let Some(moq) = candidate.display_moq() {
            let upper = range.max as f64;
            if moq <= range.max {
                earned += weights.moq;
                reasons.push(MOQ_REASON.to_string());
            } else if moq as f64 <= upper * MOQ_TOLERANCE {
                earned += weights.moq / 2.0;
                reasons.push(MOQ_PARTIAL_REASON.to_string());
            }
        }
    }

    if let Some(range) = criteria.lead_time_range {
        achievable += weights.lead_time;
        if let Some(days) = candidate.max_lead_time() {
            let upper = range.max as f64;
            if days <= range.max {
                earned += weights.lead_time;
                reasons.push(LEAD_TIME_REASON.to_string());
            } else if days as f64 <= upper * LEAD_TIME_TOLERANCE {
                earned += weights.lead_time / 2.0;
                reasons.push(LEAD_TIME_PARTIAL_REASON.to_string());
            }
        }
    }

    if has_location_criteria(&criteria.locations) {
        achievable += weights.location;
        if has_location_match(candidate, &criteria.locations) {
            earned += weights.location;
            reasons.push(LOCATION_REASON.to_string());
        }
    }

    if achievable <= 0.0 {
        return (0, reasons);
    }

    let percent = (earned / achievable * 100.0).round().clamp(0.0, 100.0);
    (percent as u8, reasons)
}

fn tier_reason(tier: SubscriptionTier) -> String {
    format!("{} tier", tier.label())
}
