// Integration tests for OEM Match

use oem_match::core::{ExternalRankings, Matcher};
use oem_match::models::{
    normalize_records, Candidate, CertificationPolicy, ExternalRanking, FilterCriteria,
    MatchStrategy, MatchView, Product, ScoringScheme, SubscriptionTier, ValueRange,
};
use serde_json::json;

fn create_test_candidate(
    id: &str,
    category: &str,
    moq: u32,
    lead: u32,
    tier: SubscriptionTier,
    certs: &[&str],
) -> Candidate {
    Candidate {
        organization_id: id.to_string(),
        name: format!("OEM {}", id),
        slug: format!("oem-{}", id),
        location: "Incheon, South Korea".to_string(),
        description: format!("{} manufacturer", category),
        tier,
        products: vec![Product {
            category: category.to_string(),
            moq: Some(moq),
            lead_time_days: Some(lead),
            price_floor: None,
        }],
        certifications: certs.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    }
}

fn create_test_criteria() -> FilterCriteria {
    FilterCriteria {
        moq_range: Some(ValueRange::new(0, 1000)),
        lead_time_range: Some(ValueRange::new(0, 30)),
        ..Default::default()
    }
}

#[test]
fn test_integration_end_to_end_matching() {
    let matcher = Matcher::with_default_weights();
    let mut criteria = create_test_criteria();
    criteria.categories = vec!["skincare".to_string()];
    criteria.certifications = vec!["GMP".to_string()];

    let candidates = vec![
        create_test_candidate("1", "Skincare", 500, 10, SubscriptionTier::Free, &["GMP"]),
        create_test_candidate("2", "Skincare", 800, 20, SubscriptionTier::VerifiedPartner, &["GMP", "ISO 22716"]),
        create_test_candidate("3", "Haircare", 500, 10, SubscriptionTier::Free, &["GMP"]), // Wrong category
        create_test_candidate("4", "Skincare", 500, 10, SubscriptionTier::Free, &[]),      // No certification
        create_test_candidate("5", "Skincare", 9000, 10, SubscriptionTier::Free, &["GMP"]), // MOQ too high
        create_test_candidate("6", "Skincare", 500, 60, SubscriptionTier::Insights, &["GMP"]), // Too slow
    ];

    let result = matcher.find_matches(
        &criteria,
        candidates,
        MatchView::Listing.strategy(),
        &ExternalRankings::new(),
        10,
    );

    let ids: Vec<_> = result.results.iter().map(|r| r.candidate.organization_id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(result.total_candidates, 6);

    for r in &result.results {
        assert!(r.match_score.score() <= 100);
        assert_eq!(r.match_score.reasons()[0], "Category match");
    }

    // Verified partner earns the tier bonus on top of the same criteria
    assert_eq!(result.results[0].match_score.score(), result.results[1].match_score.score() + 5);
}

#[test]
fn test_certification_policy_is_caller_choice() {
    let matcher = Matcher::with_default_weights();
    let mut criteria = create_test_criteria();
    criteria.certifications = vec!["GMP".to_string(), "Halal".to_string()];

    let candidates = vec![create_test_candidate("1", "Skincare", 500, 10, SubscriptionTier::Free, &["GMP"])];

    let any = MatchStrategy {
        certification_policy: CertificationPolicy::Any,
        scheme: ScoringScheme::CapabilityWeights,
    };
    let all = MatchStrategy {
        certification_policy: CertificationPolicy::All,
        scheme: ScoringScheme::CapabilityWeights,
    };

    let none = ExternalRankings::new();
    assert_eq!(matcher.score_and_filter(candidates.clone(), &criteria, any, &none).len(), 1);
    assert!(matcher.score_and_filter(candidates, &criteria, all, &none).is_empty());
}

#[test]
fn test_equal_scores_break_ties_by_tier() {
    let matcher = Matcher::with_default_weights();

    let candidates = vec![
        create_test_candidate("free", "Skincare", 500, 10, SubscriptionTier::Free, &[]),
        create_test_candidate("insights", "Skincare", 500, 10, SubscriptionTier::Insights, &[]),
        create_test_candidate("partner", "Skincare", 500, 10, SubscriptionTier::VerifiedPartner, &[]),
    ];

    let results = matcher.score_and_filter(
        candidates,
        &create_test_criteria(),
        MatchView::Results.strategy(),
        &ExternalRankings::new(),
    );

    let tiers: Vec<_> = results.iter().map(|r| r.candidate.tier).collect();
    assert_eq!(
        tiers,
        vec![SubscriptionTier::VerifiedPartner, SubscriptionTier::Insights, SubscriptionTier::Free]
    );
}

#[test]
fn test_ai_ranks_override_local_order() {
    let matcher = Matcher::with_default_weights();

    let candidates: Vec<Candidate> = (0..5)
        .map(|i| create_test_candidate(&i.to_string(), "Skincare", 100 * (i + 1), 10, SubscriptionTier::Free, &[]))
        .collect();

    let mut external = ExternalRankings::new();
    for (rank, id) in ["3", "0", "4", "1", "2"].iter().enumerate() {
        external.insert(
            id.to_string(),
            ExternalRanking {
                rank: rank as u32 + 1,
                score: 90 - rank as u8 * 10,
                reasons: vec!["AI match".to_string()],
            },
        );
    }

    let results = matcher.score_and_filter(
        candidates,
        &create_test_criteria(),
        MatchView::Results.strategy(),
        &external,
    );

    let ids: Vec<_> = results.iter().map(|r| r.candidate.organization_id.as_str()).collect();
    assert_eq!(ids, vec!["3", "0", "4", "1", "2"]);
    assert_eq!(results[0].match_score.reasons().to_vec(), vec!["AI match".to_string()]);
}

#[test]
fn test_partial_ai_ranking_puts_ranked_first() {
    let matcher = Matcher::with_default_weights();

    let candidates = vec![
        create_test_candidate("local-best", "Skincare", 500, 10, SubscriptionTier::VerifiedPartner, &[]),
        create_test_candidate("ranked", "Skincare", 500, 10, SubscriptionTier::Free, &[]),
    ];

    let mut external = ExternalRankings::new();
    external.insert(
        "ranked".to_string(),
        ExternalRanking {
            rank: 1,
            score: 10,
            reasons: vec![],
        },
    );

    let results = matcher.score_and_filter(
        candidates,
        &create_test_criteria(),
        MatchView::Results.strategy(),
        &external,
    );

    assert_eq!(results[0].candidate.organization_id, "ranked");
    assert_eq!(results[0].match_score.external_rank(), Some(1));
    assert_eq!(results[1].match_score.external_rank(), None);
}

#[test]
fn test_tag_filter_uses_synthesized_tags() {
    let matcher = Matcher::with_default_weights();
    let criteria = FilterCriteria {
        tags: vec!["Fast Delivery".to_string()],
        ..Default::default()
    };

    let candidates = vec![
        create_test_candidate("fast", "Skincare", 500, 7, SubscriptionTier::Free, &[]),
        create_test_candidate("slow", "Skincare", 500, 40, SubscriptionTier::Free, &[]),
    ];

    let results = matcher.score_and_filter(
        candidates,
        &criteria,
        MatchView::Results.strategy(),
        &ExternalRankings::new(),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.organization_id, "fast");
    assert_eq!(results[0].tags, vec!["Fast Delivery"]);
}

#[test]
fn test_normalized_records_flow_through_engine() {
    let rows = vec![
        json!({
            "id": "org-a",
            "company_name": "Alpha Labs",
            "location": "Seoul",
            "subscription_tier": "INSIGHTS",
            "certifications": "GMP",
            "products": [{"category": "Skincare", "moq": "400", "lead_time_days": 12}]
        }),
        json!({
            "id": "org-b",
            "company_name": "Beta Works",
            "subscription_tier": null,
            "products": null,
            "moq": null
        }),
    ];

    let candidates = normalize_records(rows);
    let criteria = FilterCriteria {
        moq_range: Some(ValueRange::new(1000, 5000)),
        ..Default::default()
    };

    let results = Matcher::default().score_and_filter(
        candidates,
        &criteria,
        MatchView::Results.strategy(),
        &ExternalRankings::new(),
    );

    // org-a has a product MOQ outside the range; org-b has no MOQ data at all
    let ids: Vec<_> = results.iter().map(|r| r.candidate.organization_id.as_str()).collect();
    assert_eq!(ids, vec!["org-b"]);
}

#[test]
fn test_scoring_is_deterministic() {
    let matcher = Matcher::with_default_weights();
    let candidates: Vec<Candidate> = (0..50)
        .map(|i| {
            let tier = match i % 3 {
                0 => SubscriptionTier::Free,
                1 => SubscriptionTier::Insights,
                _ => SubscriptionTier::VerifiedPartner,
            };
            create_test_candidate(&i.to_string(), "Skincare", 200 + i * 37, 5 + i % 40, tier, &[])
        })
        .collect();

    let run = || {
        matcher
            .score_and_filter(
                candidates.clone(),
                &create_test_criteria(),
                MatchView::Results.strategy(),
                &ExternalRankings::new(),
            )
            .into_iter()
            .map(|r| (r.candidate.organization_id, r.match_score.score()))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_unparseable_numbers_do_not_disqualify() {
    let rows = vec![json!({
        "id": 7,
        "name": "Gamma",
        "company_name": "Gamma Manufacturing",
        "products": [{"category": "Skincare", "moq": "N/A", "lead_time_days": -1}]
    })];

    let criteria = FilterCriteria {
        moq_range: Some(ValueRange::new(0, 1000)),
        lead_time_range: Some(ValueRange::new(0, 30)),
        ..Default::default()
    };

    let results = Matcher::default().score_and_filter(
        normalize_records(rows),
        &criteria,
        MatchView::Results.strategy(),
        &ExternalRankings::new(),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.organization_id, "7");
    assert_eq!(results[0].candidate.name, "Gamma Manufacturing");
    assert_eq!(results[0].match_score.score(), 0);
}
