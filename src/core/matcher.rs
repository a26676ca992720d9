use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::{filters::matches_criteria, scoring::calculate_match_score, tags::candidate_tags};
use crate::models::{Candidate, ExternalRanking, FilterCriteria, MatchStrategy, ScoredResult, ScoringWeights};

/// External rankings keyed by organization id
pub type ExternalRankings = HashMap<String, ExternalRanking>;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub results: Vec<ScoredResult>,
    pub total_candidates: usize,
    /// Candidates left after filtering, before the limit is applied
    pub filtered_candidates: usize,
}

/// Matching orchestrator: filter, score, rank
///
/// # Pipeline Stages
/// 1. Tag derivation (needed by the tag filter and the output)
/// 2. Hard-constraint filtering
/// 3. Scoring, with external rankings taking precedence
/// 4. Ranking and tie-break
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Filter, score and rank every candidate
    ///
    /// Pure: the same inputs always produce the same ordered output.
    pub fn score_and_filter(
        &self,
        candidates: Vec<Candidate>,
        criteria: &FilterCriteria,
        strategy: MatchStrategy,
        external: &ExternalRankings,
    ) -> Vec<ScoredResult> {
        let mut results: Vec<ScoredResult> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let tags = candidate_tags(&candidate);
                if !matches_criteria(&candidate, &tags, criteria, strategy.certification_policy) {
                    tracing::trace!("Filtered out candidate {}", candidate.organization_id);
                    return None;
                }

                let match_score = calculate_match_score(
                    &candidate,
                    criteria,
                    strategy.scheme,
                    &self.weights,
                    external.get(&candidate.organization_id),
                );

                Some(ScoredResult {
                    candidate,
                    match_score,
                    tags,
                })
            })
            .collect();

        rank_results(&mut results);
        results
    }

    /// Run the pipeline and keep the top `limit` results
    pub fn find_matches(
        &self,
        criteria: &FilterCriteria,
        candidates: Vec<Candidate>,
        strategy: MatchStrategy,
        external: &ExternalRankings,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let mut results = self.score_and_filter(candidates, criteria, strategy, external);
        let filtered_candidates = results.len();

        tracing::debug!(
            "Matched {} of {} candidates ({:?})",
            filtered_candidates,
            total_candidates,
            strategy
        );

        results.truncate(limit);

        MatchResult {
            results,
            total_candidates,
            filtered_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Order results for presentation
///
/// Externally ranked results come first, by rank ascending. Local results
/// follow, by score descending then tier descending. The sort is stable, so
/// full ties keep input order.
pub fn rank_results(results: &mut [ScoredResult]) {
    results.sort_by(compare_results);
}

fn compare_results(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    match (a.match_score.external_rank(), b.match_score.external_rank()) {
        (Some(rank_a), Some(rank_b)) => rank_a.cmp(&rank_b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b
            .match_score
            .score()
            .cmp(&a.match_score.score())
            .then_with(|| b.candidate.tier.rank().cmp(&a.candidate.tier.rank())),
    }
}
