// HTTP surface tests for OEM Match

use actix_web::{test, web, App};
use oem_match::core::Matcher;
use oem_match::routes::{self, handle_json_payload_error, oems::AppState};
use oem_match::services::{AiRankingClient, CandidateCache, SupabaseClient};
use serde_json::{json, Value};
use std::sync::Arc;

const ORGANIZATIONS: &str = r#"[
    {"id": "org-1", "company_name": "Alpha Cosmetics", "location": "Seoul, KR",
     "subscription_tier": "FREE", "certifications": [{"name": "GMP"}],
     "products": [{"category": "Skincare", "moq": 500, "lead_time_days": 10}]},
    {"id": "org-2", "company_name": "Beta Beauty", "location": "Busan, KR",
     "subscription_tier": "VERIFIED_PARTNER", "certifications": [{"name": "GMP"}],
     "products": [{"category": "Skincare", "moq": 500, "lead_time_days": 10}]},
    {"id": "org-3", "company_name": "Gamma Goods", "location": "Hanoi, VN",
     "subscription_tier": "INSIGHTS", "certifications": [],
     "products": [{"category": "Skincare", "moq": 20000, "lead_time_days": 90}]}
]"#;

fn app_state(supabase_url: &str, ai_endpoint: Option<String>) -> AppState {
    let supabase = SupabaseClient::new(
        supabase_url.to_string(),
        "test_key".to_string(),
        "organizations".to_string(),
        "*".to_string(),
        5,
    )
    .unwrap();

    let ai_ranking = ai_endpoint.map(|endpoint| Arc::new(AiRankingClient::new(endpoint, None, 5).unwrap()));

    AppState {
        supabase: Arc::new(supabase),
        ai_ranking,
        cache: Arc::new(CandidateCache::new(4, 60)),
        matcher: Matcher::with_default_weights(),
        cache_key: AppState::cache_key_for("organizations"),
        default_limit: 20,
        max_limit: 100,
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!(app_state("http://127.0.0.1:9", None));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_match_fetches_and_caches_candidates() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/organizations")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ORGANIZATIONS)
        .expect(1)
        .create_async()
        .await;

    let app = init_app!(app_state(&server.url(), None));

    let payload = json!({
        "criteria": {
            "moqRange": {"min": 0, "max": 1000},
            "leadTimeRange": {"min": 0, "max": 30}
        },
        "view": "results"
    });

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/oems/match")
            .set_json(&payload)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["totalCandidates"], 3);
        assert_eq!(body["filteredCandidates"], 2);
        assert_eq!(body["results"][0]["organizationId"], "org-2");
        assert_eq!(body["results"][0]["matchScore"], 100);
        assert_eq!(body["results"][1]["organizationId"], "org-1");
        assert_eq!(body["results"][0]["matchReasons"][0], "MOQ within range");
        assert_eq!(body["results"][0]["tags"][0], "Fast Delivery");
    }

    // Second request is served from the candidate cache
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_match_with_inline_candidates_listing_view() {
    let app = init_app!(app_state("http://127.0.0.1:9", None));

    let payload = json!({
        "criteria": {
            "categories": ["skincare"],
            "certifications": ["GMP"]
        },
        "view": "listing",
        "candidates": serde_json::from_str::<Value>(ORGANIZATIONS).unwrap()
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/oems/match")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["view"], "listing");
    assert_eq!(body["filteredCandidates"], 2);
    assert_eq!(body["results"][0]["organizationId"], "org-2");
    assert_eq!(body["results"][0]["matchScore"], 50);
    assert_eq!(body["results"][1]["matchScore"], 45);
}

#[actix_web::test]
async fn test_match_skips_inline_rows_without_id() {
    let app = init_app!(app_state("http://127.0.0.1:9", None));

    let payload = json!({
        "candidates": [{"id": "a", "company_name": "Alpha"}, {"name": "no id"}, "garbage"]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/oems/match")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["totalCandidates"], 1);
    assert_eq!(body["results"][0]["organizationId"], "a");
}

#[actix_web::test]
async fn test_match_uses_ai_ranking() {
    let mut ai = mockito::Server::new_async().await;
    let _mock = ai.mock("POST", "/rank")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"matches": [{"oemId": "org-1", "rank": 1, "score": 88, "reasons": ["Formula fit"]}]}"#)
        .create_async()
        .await;

    let app = init_app!(app_state("http://127.0.0.1:9", Some(format!("{}/rank", ai.url()))));

    let payload = json!({
        "criteria": {},
        "useAiRanking": true,
        "candidates": serde_json::from_str::<Value>(ORGANIZATIONS).unwrap()
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/oems/match")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["results"][0]["organizationId"], "org-1");
    assert_eq!(body["results"][0]["aiRank"], 1);
    assert_eq!(body["results"][0]["matchScore"], 88);
    assert_eq!(body["results"][0]["matchReasons"][0], "Formula fit");
}

#[actix_web::test]
async fn test_match_ai_failure_falls_back_to_local() {
    let mut ai = mockito::Server::new_async().await;
    let _mock = ai.mock("POST", "/rank").with_status(500).create_async().await;

    let app = init_app!(app_state("http://127.0.0.1:9", Some(format!("{}/rank", ai.url()))));

    let payload = json!({
        "useAiRanking": true,
        "candidates": serde_json::from_str::<Value>(ORGANIZATIONS).unwrap()
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/oems/match")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["filteredCandidates"], 3);
    assert!(body["results"][0].get("aiRank").is_none());
}

#[actix_web::test]
async fn test_match_rejects_inverted_range() {
    let app = init_app!(app_state("http://127.0.0.1:9", None));

    let req = test::TestRequest::post()
        .uri("/api/v1/oems/match")
        .set_json(json!({"criteria": {"moqRange": {"min": 5000, "max": 10}}, "candidates": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_match_rejects_malformed_json() {
    let app = init_app!(app_state("http://127.0.0.1:9", None));

    let req = test::TestRequest::post()
        .uri("/api/v1/oems/match")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_match_reports_store_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/organizations")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let app = init_app!(app_state(&server.url(), None));

    let req = test::TestRequest::post()
        .uri("/api/v1/oems/match")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
}
