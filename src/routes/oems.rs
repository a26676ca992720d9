use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{ExternalRankings, Matcher};
use crate::models::{
    normalize_records, Candidate, ErrorResponse, FilterCriteria, HealthResponse,
    InvalidateCacheResponse, MatchRequest, MatchResponse, ScoredOem,
};
use crate::services::{AiRankingClient, CacheKey, CandidateCache, SupabaseClient, SupabaseError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub ai_ranking: Option<Arc<AiRankingClient>>,
    pub cache: Arc<CandidateCache>,
    pub matcher: Matcher,
    pub cache_key: String,
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Configure all OEM matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/oems/match", web::post().to(match_oems))
        .route("/oems/cache/invalidate", web::post().to(invalidate_cache));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Filter, score and rank manufacturers
///
/// POST /api/v1/oems/match
///
/// Request body:
/// ```json
/// {
///   "criteria": { "moqRange": { "min": 0, "max": 1000 }, "certifications": ["GMP"] },
///   "view": "listing|results",
///   "limit": 20,
///   "useAiRanking": false
/// }
/// ```
async fn match_oems(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    let candidates: Vec<Candidate> = match req.candidates {
        Some(rows) => normalize_records(rows),
        None => match load_candidates(&state).await {
            Ok(snapshot) => snapshot.as_ref().clone(),
            Err(e) => {
                tracing::error!("Failed to load candidates: {}", e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to load candidates".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        },
    };

    let external = if req.use_ai_ranking {
        fetch_ai_rankings(&state, &req.criteria, &candidates).await
    } else {
        ExternalRankings::new()
    };

    tracing::info!(
        "Matching {} candidates for {:?} view (limit: {}, AI rankings: {})",
        candidates.len(),
        req.view,
        limit,
        external.len()
    );

    let result = state.matcher.find_matches(
        &req.criteria,
        candidates,
        req.view.strategy(),
        &external,
        limit,
    );

    HttpResponse::Ok().json(MatchResponse {
        results: result.results.into_iter().map(ScoredOem::from).collect(),
        total_candidates: result.total_candidates,
        filtered_candidates: result.filtered_candidates,
        view: req.view,
    })
}

/// Drop the cached candidate snapshot
///
/// POST /api/v1/oems/cache/invalidate
async fn invalidate_cache(state: web::Data<AppState>) -> impl Responder {
    state.cache.invalidate(&state.cache_key).await;
    tracing::info!("Candidate cache invalidated");

    HttpResponse::Ok().json(InvalidateCacheResponse { success: true })
}

/// Cached candidate snapshot, fetched from the data store on a miss
async fn load_candidates(state: &AppState) -> Result<Arc<Vec<Candidate>>, SupabaseError> {
    if let Some(snapshot) = state.cache.get(&state.cache_key).await {
        return Ok(snapshot);
    }

    let snapshot = Arc::new(state.supabase.fetch_candidates().await?);
    state.cache.insert(&state.cache_key, snapshot.clone()).await;

    Ok(snapshot)
}

/// AI rankings for the candidates; failures fall back to local scoring
async fn fetch_ai_rankings(
    state: &AppState,
    criteria: &FilterCriteria,
    candidates: &[Candidate],
) -> ExternalRankings {
    let Some(client) = &state.ai_ranking else {
        tracing::debug!("AI ranking requested but not configured");
        return ExternalRankings::new();
    };

    let ids: Vec<String> = candidates.iter().map(|c| c.organization_id.clone()).collect();

    match client.rank(criteria, &ids).await {
        Ok(rankings) => rankings,
        Err(e) => {
            tracing::warn!("AI ranking failed, using local scores: {}", e);
            ExternalRankings::new()
        }
    }
}

impl AppState {
    /// Key under which the candidate snapshot for `table` is cached
    pub fn cache_key_for(table: &str) -> String {
        CacheKey::candidates(table)
    }
}
