use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::{ListingWeights, ResultsWeights, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub ai_ranking: AiRankingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_select")]
    pub select: String,
    pub timeout_secs: Option<u64>,
}

fn default_table() -> String { "organizations".to_string() }
fn default_select() -> String { "*,products(*),certifications(name)".to_string() }

/// External AI ranking; disabled when no endpoint is configured
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiRankingSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
    pub max_capacity: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub listing: ListingWeightsConfig,
    #[serde(default)]
    pub results: ResultsWeightsConfig,
}

impl ScoringSettings {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            listing: ListingWeights {
                category: self.listing.category,
                moq: self.listing.moq,
                lead_time: self.listing.lead_time,
                certification: self.listing.certification,
                verified_partner_bonus: self.listing.verified_partner_bonus,
                insights_bonus: self.listing.insights_bonus,
                capability: self.listing.capability,
            },
            results: ResultsWeights {
                moq: self.results.moq,
                lead_time: self.results.lead_time,
                location: self.results.location,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingWeightsConfig {
    #[serde(default = "default_category_points")]
    pub category: u32,
    #[serde(default = "default_moq_points")]
    pub moq: u32,
    #[serde(default = "default_lead_time_points")]
    pub lead_time: u32,
    #[serde(default = "default_certification_points")]
    pub certification: u32,
    #[serde(default = "default_verified_partner_bonus")]
    pub verified_partner_bonus: u32,
    #[serde(default = "default_insights_bonus")]
    pub insights_bonus: u32,
    #[serde(default = "default_capability_points")]
    pub capability: u32,
}

impl Default for ListingWeightsConfig {
    fn default() -> Self {
        Self {
            category: default_category_points(),
            moq: default_moq_points(),
            lead_time: default_lead_time_points(),
            certification: default_certification_points(),
            verified_partner_bonus: default_verified_partner_bonus(),
            insights_bonus: default_insights_bonus(),
            capability: default_capability_points(),
        }
    }
}

fn default_category_points() -> u32 { 30 }
fn default_moq_points() -> u32 { 25 }
fn default_lead_time_points() -> u32 { 20 }
fn default_certification_points() -> u32 { 15 }
fn default_verified_partner_bonus() -> u32 { 5 }
fn default_insights_bonus() -> u32 { 3 }
fn default_capability_points() -> u32 { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct ResultsWeightsConfig {
    #[serde(default = "default_moq_weight")]
    pub moq: f64,
    #[serde(default = "default_lead_time_weight")]
    pub lead_time: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
}

impl Default for ResultsWeightsConfig {
    fn default() -> Self {
        Self {
            moq: default_moq_weight(),
            lead_time: default_lead_time_weight(),
            location: default_location_weight(),
        }
    }
}

fn default_moq_weight() -> f64 { 40.0 }
fn default_lead_time_weight() -> f64 { 40.0 }
fn default_location_weight() -> f64 { 20.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with OEM_MATCH__)
    /// 5. SUPABASE_URL / SUPABASE_SERVICE_KEY / AI_RANKING_ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., OEM_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("OEM_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_secret_overrides(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed secret variables when they are set
fn apply_secret_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    for (var, key) in [
        ("SUPABASE_URL", "supabase.url"),
        ("SUPABASE_SERVICE_KEY", "supabase.service_key"),
        ("AI_RANKING_ENDPOINT", "ai_ranking.endpoint"),
        ("AI_RANKING_API_KEY", "ai_ranking.api_key"),
    ] {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
