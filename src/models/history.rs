// ============================================================================
// Structure : HistoryLog
// ============================================================================
// Historique des conversions de la session
//
// - Append-only : on ne supprime ni ne modifie jamais une entrée
// - Ordre d'insertion conservé
// - Vit aussi longtemps que le process, jamais persisté, pas de limite
// ============================================================================

use crate::models::ConversionRecord;

/// Texte affiché quand l'historique est vide
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "No conversions yet.";

/// Historique des conversions réussies
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    records: Vec<ConversionRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une conversion à la fin
    pub fn push(&mut self, record: ConversionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.records.iter()
    }

    /// Lignes à afficher sur la page History
    ///
    /// Une ligne par conversion dans l'ordre d'insertion, ou le placeholder
    /// seul si l'historique est vide.
    pub fn lines(&self) -> Vec<String> {
        if self.records.is_empty() {
            return vec![EMPTY_HISTORY_PLACEHOLDER.to_string()];
        }

        self.records.iter().map(ConversionRecord::history_line).collect()
    }
}
