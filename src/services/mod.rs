// Service exports
pub mod ai_ranking;
pub mod cache;
pub mod supabase;

pub use ai_ranking::{AiRankingClient, AiRankingError};
pub use cache::{CacheKey, CandidateCache};
pub use supabase::{SupabaseClient, SupabaseError};
