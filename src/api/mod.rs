// ============================================================================
// Module : api
// ============================================================================
// Client de l'API des taux de change
// ============================================================================

pub mod exchange_rate;  // Client HTTP + trait RateFetcher

// Re-export des types principaux
pub use exchange_rate::{HttpRateFetcher, RateFetcher, RateTable};
