use crate::models::{Candidate, ProductionScale};

pub const LOW_MOQ_TAG: &str = "Low MOQ Friendly";
pub const FAST_DELIVERY_TAG: &str = "Fast Delivery";
pub const ECO_PACKAGING_TAG: &str = "Eco Packaging";
pub const TOP_RATED_TAG: &str = "Top Rated";
pub const HIGH_CAPACITY_TAG: &str = "High Capacity";

const LOW_MOQ_THRESHOLD: u32 = 100;
const FAST_DELIVERY_DAYS: u32 = 14;
const TOP_RATED_THRESHOLD: f64 = 4.5;

/// Lowercase fragments that mark a certification as eco-related
pub const ECO_KEYWORDS: &[&str] = &[
    "eco",
    "organic",
    "fsc",
    "recycl",
    "biodegrad",
    "compost",
    "sustainab",
    "vegan",
];

/// Highlight tags for a candidate
///
/// Declared services win; otherwise tags are synthesized from attributes.
pub fn candidate_tags(candidate: &Candidate) -> Vec<String> {
    if candidate.services.is_empty() {
        synthesize_tags(candidate)
    } else {
        candidate.services.clone()
    }
}

/// Derive highlight tags from MOQ, lead time, certifications, rating and scale
///
/// Each check is independent; the output follows check order.
pub fn synthesize_tags(candidate: &Candidate) -> Vec<String> {
    let mut tags = Vec::new();

    if candidate.display_moq().is_some_and(|moq| moq <= LOW_MOQ_THRESHOLD) {
        tags.push(LOW_MOQ_TAG.to_string());
    }

    if candidate.max_lead_time().is_some_and(|days| days <= FAST_DELIVERY_DAYS) {
        tags.push(FAST_DELIVERY_TAG.to_string());
    }

    if candidate.certifications.iter().any(|cert| is_eco_certification(cert)) {
        tags.push(ECO_PACKAGING_TAG.to_string());
    }

    if candidate.rating.is_some_and(|rating| rating >= TOP_RATED_THRESHOLD) {
        tags.push(TOP_RATED_TAG.to_string());
    }

    if candidate.scale == Some(ProductionScale::Large) {
        tags.push(HIGH_CAPACITY_TAG.to_string());
    }

    tags
}

#[inline]
fn is_eco_certification(name: &str) -> bool {
    let lower = name.to_lowercase();
    ECO_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
