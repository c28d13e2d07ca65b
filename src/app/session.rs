// ============================================================================
// Structure : Session
// ============================================================================
// Données partagées entre les pages, une seule instance par process
//
// Possédée par App et passée par référence aux pages (&Session pour lire,
// &mut Session seulement depuis App pour ajouter à l'historique).
//
// CONCEPT RUST : Ownership plutôt que variable globale
// - Pas de static mut ni de singleton : une seule Session existe parce que
//   seul App en crée une
// - Le borrow checker garantit qu'aucune page ne la modifie en douce
// ============================================================================

use crate::models::HistoryLog;

/// Données de la session
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Codes devises proposés dans les listes déroulantes
    pub currencies: Vec<String>,

    /// Conversions réussies depuis le lancement
    pub history: HistoryLog,
}

impl Session {
    pub fn new(currencies: Vec<String>) -> Self {
        Self {
            currencies,
            history: HistoryLog::new(),
        }
    }
}
