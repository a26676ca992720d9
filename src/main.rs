use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use oem_match::config::Settings;
use oem_match::core::Matcher;
use oem_match::routes::{self, handle_json_payload_error, oems::AppState};
use oem_match::services::{AiRankingClient, CandidateCache, SupabaseClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting OEM matching service...");

    let supabase = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.service_key.clone(),
        settings.supabase.table.clone(),
        settings.supabase.select.clone(),
        settings.supabase.timeout_secs.unwrap_or(30),
    )
    .map_err(|e| {
        error!("Failed to create data store client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Data store client initialized (table: {})", settings.supabase.table);

    let ai_ranking = match &settings.ai_ranking.endpoint {
        Some(endpoint) => match AiRankingClient::new(
            endpoint.clone(),
            settings.ai_ranking.api_key.clone(),
            settings.ai_ranking.timeout_secs.unwrap_or(20),
        ) {
            Ok(client) => {
                info!("AI ranking enabled: {}", endpoint);
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("Failed to create AI ranking client ({}), using local scores only", e);
                None
            }
        },
        None => {
            info!("AI ranking disabled");
            None
        }
    };

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let cache_capacity = settings.cache.max_capacity.unwrap_or(16);
    let cache = Arc::new(CandidateCache::new(cache_capacity, cache_ttl));

    info!("Candidate cache initialized (capacity: {}, TTL: {}s)", cache_capacity, cache_ttl);

    let weights = settings.scoring.weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        supabase: Arc::new(supabase),
        ai_ranking,
        cache,
        matcher,
        cache_key: AppState::cache_key_for(&settings.supabase.table),
        default_limit: settings.matching.default_limit.unwrap_or(20),
        max_limit: settings.matching.max_limit.unwrap_or(100),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
