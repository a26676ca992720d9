use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Subscription level of a manufacturer organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Insights,
    VerifiedPartner,
}

impl SubscriptionTier {
    /// Ordinal used for tie-breaking (higher wins)
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::Free => 1,
            SubscriptionTier::Insights => 2,
            SubscriptionTier::VerifiedPartner => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Insights => "Insights",
            SubscriptionTier::VerifiedPartner => "Verified Partner",
        }
    }

    /// Parse the store's tier string, accepting the usual spellings
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_ascii_uppercase()
            .replace(|c: char| c == '-' || c == ' ', "_");
        match normalized.as_str() {
            "FREE" => Some(SubscriptionTier::Free),
            "INSIGHTS" => Some(SubscriptionTier::Insights),
            "VERIFIED_PARTNER" | "VERIFIED" => Some(SubscriptionTier::VerifiedPartner),
            _ => None,
        }
    }
}

/// Production scale declared on the OEM profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionScale {
    Small,
    Medium,
    Large,
}

impl ProductionScale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Some(ProductionScale::Small),
            "medium" => Some(ProductionScale::Medium),
            "large" => Some(ProductionScale::Large),
            _ => None,
        }
    }
}

/// A catalog entry offered by a manufacturer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub category: String,
    pub moq: Option<u32>,
    pub lead_time_days: Option<u32>,
    pub price_floor: Option<f64>,
}

/// Service capabilities a manufacturer can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    RndSupport,
    PackagingDesign,
    FormulaLibrary,
    WhiteLabel,
    ExportSupport,
}

impl Capability {
    /// Fixed evaluation order, shared by filtering and scoring
    pub const ALL: [Capability; 5] = [
        Capability::RndSupport,
        Capability::PackagingDesign,
        Capability::FormulaLibrary,
        Capability::WhiteLabel,
        Capability::ExportSupport,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Capability::RndSupport => "R&D Support",
            Capability::PackagingDesign => "Packaging Design",
            Capability::FormulaLibrary => "Formula Library",
            Capability::WhiteLabel => "White Label",
            Capability::ExportSupport => "Export Support",
        }
    }
}

/// Capability flags. Used both for what a candidate offers and for what a
/// buyer requires (a `false` requirement imposes no constraint).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    pub rnd_support: bool,
    pub packaging_design: bool,
    pub formula_library: bool,
    pub white_label: bool,
    pub export_support: bool,
}

impl Capabilities {
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::RndSupport => self.rnd_support,
            Capability::PackagingDesign => self.packaging_design,
            Capability::FormulaLibrary => self.formula_library,
            Capability::WhiteLabel => self.white_label,
            Capability::ExportSupport => self.export_support,
        }
    }

    /// Flags that are set, in evaluation order
    pub fn active(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.has(*c))
    }
}

/// Manufacturer record as seen by the matching engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub organization_id: String,
    pub name: String,
    pub slug: String,
    pub location: String,
    pub description: String,
    pub tier: SubscriptionTier,
    pub products: Vec<Product>,
    /// MOQ declared on the profile itself, independent of products
    pub profile_moq: Option<u32>,
    pub certifications: Vec<String>,
    pub capabilities: Capabilities,
    pub rating: Option<f64>,
    pub review_count: u32,
    /// Services the manufacturer declared; empty means tags get synthesized
    pub services: Vec<String>,
    pub scale: Option<ProductionScale>,
}

impl Candidate {
    /// Distinct product categories, in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty() && seen.insert(c.to_lowercase()))
            .collect()
    }

    pub fn min_product_moq(&self) -> Option<u32> {
        self.products.iter().filter_map(|p| p.moq).min()
    }

    pub fn max_lead_time(&self) -> Option<u32> {
        self.products.iter().filter_map(|p| p.lead_time_days).max()
    }

    /// MOQ shown to buyers: the profile value wins over the product minimum
    pub fn display_moq(&self) -> Option<u32> {
        self.profile_moq.or_else(|| self.min_product_moq())
    }
}

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Buyer filter and preference state
///
/// Every empty set or absent range is inactive and lets all candidates pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search: String,
    pub tiers: Vec<SubscriptionTier>,
    pub categories: Vec<String>,
    pub certifications: Vec<String>,
    pub moq_range: Option<ValueRange>,
    pub lead_time_range: Option<ValueRange>,
    pub locations: Vec<String>,
    pub capabilities: Capabilities,
    pub tags: Vec<String>,
}

/// How required certifications are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationPolicy {
    /// Candidate holds at least one required certification
    Any,
    /// Candidate holds every required certification
    All,
}

/// Which scoring formula produces the local match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringScheme {
    /// Additive points per satisfied criterion, tier and capability bonuses
    CapabilityWeights,
    /// Normalized MOQ / lead time / location percentage with partial credit
    MoqLeadLocation,
}

/// Filtering and scoring choices for one matching run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStrategy {
    pub certification_policy: CertificationPolicy,
    pub scheme: ScoringScheme,
}

/// Page the results are computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchView {
    /// OEM listing page
    Listing,
    /// Browse/results page
    #[default]
    Results,
}

impl MatchView {
    pub fn strategy(&self) -> MatchStrategy {
        match self {
            MatchView::Listing => MatchStrategy {
                certification_policy: CertificationPolicy::All,
                scheme: ScoringScheme::CapabilityWeights,
            },
            MatchView::Results => MatchStrategy {
                certification_policy: CertificationPolicy::Any,
                scheme: ScoringScheme::MoqLeadLocation,
            },
        }
    }
}

/// Score and rank supplied by the external AI ranking service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRanking {
    pub rank: u32,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Match score of a candidate, either computed here or supplied externally
#[derive(Debug, Clone, PartialEq)]
pub enum MatchScore {
    Local { score: u8, reasons: Vec<String> },
    External { rank: u32, score: u8, reasons: Vec<String> },
}

impl MatchScore {
    pub fn score(&self) -> u8 {
        match self {
            MatchScore::Local { score, .. } | MatchScore::External { score, .. } => *score,
        }
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            MatchScore::Local { reasons, .. } | MatchScore::External { reasons, .. } => reasons,
        }
    }

    pub fn external_rank(&self) -> Option<u32> {
        match self {
            MatchScore::External { rank, .. } => Some(*rank),
            MatchScore::Local { .. } => None,
        }
    }
}

impl From<ExternalRanking> for MatchScore {
    fn from(ranking: ExternalRanking) -> Self {
        MatchScore::External {
            rank: ranking.rank,
            score: ranking.score.min(100),
            reasons: ranking.reasons,
        }
    }
}

/// Candidate annotated with its score and highlight tags
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub candidate: Candidate,
    pub match_score: MatchScore,
    pub tags: Vec<String>,
}

/// Points for the listing-view scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingWeights {
    pub category: u32,
    pub moq: u32,
    pub lead_time: u32,
    pub certification: u32,
    pub verified_partner_bonus: u32,
    pub insights_bonus: u32,
    pub capability: u32,
}

impl ListingWeights {
    pub fn tier_bonus(&self, tier: SubscriptionTier) -> u32 {
        match tier {
            SubscriptionTier::VerifiedPartner => self.verified_partner_bonus,
            SubscriptionTier::Insights => self.insights_bonus,
            SubscriptionTier::Free => 0,
        }
    }
}

impl Default for ListingWeights {
    fn default() -> Self {
        Self {
            category: 30,
            moq: 25,
            lead_time: 20,
            certification: 15,
            verified_partner_bonus: 5,
            insights_bonus: 3,
            capability: 2,
        }
    }
}

/// Relative weights for the results-view scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultsWeights {
    pub moq: f64,
    pub lead_time: f64,
    pub location: f64,
}

impl Default for ResultsWeights {
    fn default() -> Self {
        Self {
            moq: 40.0,
            lead_time: 40.0,
            location: 20.0,
        }
    }
}

/// Scoring weights for both schemes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringWeights {
    pub listing: ListingWeights,
    pub results: ResultsWeights,
}
