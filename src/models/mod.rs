// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application : conversions et historique
// ============================================================================

pub mod conversion; // ConversionRecord + formatage des nombres
pub mod history;    // HistoryLog

// Re-export des structures principales
// Au lieu de : use lazyfx::models::history::HistoryLog;
// On peut faire : use lazyfx::models::HistoryLog;
pub use conversion::{format_number, round_to_cents, ConversionRecord};
pub use history::{HistoryLog, EMPTY_HISTORY_PLACEHOLDER};
