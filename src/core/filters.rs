use crate::models::{
    Candidate, Capabilities, CertificationPolicy, FilterCriteria, SubscriptionTier, ValueRange,
};

/// Check a candidate against every active constraint in `criteria`
///
/// Constraints are conjunctive. `tags` are the candidate's highlight tags,
/// computed once by the caller.
pub fn matches_criteria(
    candidate: &Candidate,
    tags: &[String],
    criteria: &FilterCriteria,
    certification_policy: CertificationPolicy,
) -> bool {
    matches_search(candidate, &criteria.search)
        && matches_tier(candidate, &criteria.tiers)
        && matches_category(candidate, &criteria.categories)
        && matches_certifications(candidate, &criteria.certifications, certification_policy)
        && matches_moq_range(candidate, criteria.moq_range.as_ref())
        && matches_lead_time(candidate, criteria.lead_time_range.as_ref())
        && matches_location(candidate, &criteria.locations)
        && matches_capabilities(candidate, &criteria.capabilities)
        && matches_tags(tags, &criteria.tags)
}

/// Case-insensitive substring match on name, description and product categories
#[inline]
pub fn matches_search(candidate: &Candidate, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    candidate.name.to_lowercase().contains(&needle)
        || candidate.description.to_lowercase().contains(&needle)
        || candidate
            .products
            .iter()
            .any(|p| p.category.to_lowercase().contains(&needle))
}

#[inline]
pub fn matches_tier(candidate: &Candidate, tiers: &[SubscriptionTier]) -> bool {
    tiers.is_empty() || tiers.contains(&candidate.tier)
}

#[inline]
pub fn matches_category(candidate: &Candidate, categories: &[String]) -> bool {
    categories.is_empty() || has_category_match(candidate, categories)
}

/// Any product category equals one of `categories`, ignoring case
pub(crate) fn has_category_match(candidate: &Candidate, categories: &[String]) -> bool {
    candidate
        .products
        .iter()
        .any(|p| categories.iter().any(|c| c.eq_ignore_ascii_case(&p.category)))
}

pub fn matches_certifications(
    candidate: &Candidate,
    required: &[String],
    policy: CertificationPolicy,
) -> bool {
    match policy {
        CertificationPolicy::Any => matches_certifications_any(candidate, required),
        CertificationPolicy::All => matches_certifications_all(candidate, required),
    }
}

/// Candidate holds at least one required certification (browse/results view)
#[inline]
pub fn matches_certifications_any(candidate: &Candidate, required: &[String]) -> bool {
    required.is_empty() || required.iter().any(|cert| holds_certification(candidate, cert))
}

/// Candidate holds every required certification (listing view)
#[inline]
pub fn matches_certifications_all(candidate: &Candidate, required: &[String]) -> bool {
    required.iter().all(|cert| holds_certification(candidate, cert))
}

pub(crate) fn holds_certification(candidate: &Candidate, cert: &str) -> bool {
    let cert = cert.trim();
    candidate
        .certifications
        .iter()
        .any(|held| held.trim().eq_ignore_ascii_case(cert))
}

/// MOQ range check
///
/// Profile MOQ and product MOQs are alternative evidence: either one inside
/// the range passes. A candidate with no MOQ value anywhere passes vacuously.
#[inline]
pub fn matches_moq_range(candidate: &Candidate, range: Option<&ValueRange>) -> bool {
    let Some(range) = range else {
        return true;
    };

    if candidate.profile_moq.is_none() && candidate.min_product_moq().is_none() {
        return true;
    }

    candidate.profile_moq.is_some_and(|moq| range.contains(moq))
        || has_product_moq_in(candidate, range)
}

pub(crate) fn has_product_moq_in(candidate: &Candidate, range: &ValueRange) -> bool {
    candidate
        .products
        .iter()
        .filter_map(|p| p.moq)
        .any(|moq| range.contains(moq))
}

/// Lead time range check; candidates without any lead time value pass
#[inline]
pub fn matches_lead_time(candidate: &Candidate, range: Option<&ValueRange>) -> bool {
    match range {
        None => true,
        Some(_) if candidate.max_lead_time().is_none() => true,
        Some(range) => has_lead_time_in(candidate, range),
    }
}

pub(crate) fn has_lead_time_in(candidate: &Candidate, range: &ValueRange) -> bool {
    candidate
        .products
        .iter()
        .filter_map(|p| p.lead_time_days)
        .any(|days| range.contains(days))
}

#[inline]
pub fn matches_location(candidate: &Candidate, locations: &[String]) -> bool {
    !has_location_criteria(locations) || has_location_match(candidate, locations)
}

/// At least one non-blank location was requested
pub(crate) fn has_location_criteria(locations: &[String]) -> bool {
    locations.iter().any(|wanted| !wanted.trim().is_empty())
}

pub(crate) fn has_location_match(candidate: &Candidate, locations: &[String]) -> bool {
    let location = candidate.location.to_lowercase();
    locations
        .iter()
        .map(|wanted| wanted.trim().to_lowercase())
        .filter(|wanted| !wanted.is_empty())
        .any(|wanted| location.contains(&wanted))
}

/// Every requested capability must be offered
#[inline]
pub fn matches_capabilities(candidate: &Candidate, required: &Capabilities) -> bool {
    required.active().all(|capability| candidate.capabilities.has(capability))
}

/// Tag sets intersect, ignoring case
#[inline]
pub fn matches_tags(tags: &[String], required: &[String]) -> bool {
    required.is_empty()
        || required
            .iter()
            .any(|wanted| tags.iter().any(|tag| tag.eq_ignore_ascii_case(wanted)))
}
