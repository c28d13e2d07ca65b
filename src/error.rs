// ============================================================================
// Erreurs typées
// ============================================================================
// Les erreurs que l'utilisateur peut voir. Chacune est attrapée au niveau
// de l'action qui l'a déclenchée et affichée dans une notification modale :
// aucune ne remonte jusqu'à main().
//
// La plomberie (terminal, HTTP, JSON) reste en anyhow::Result, et est
// enveloppée ici quand elle doit être montrée à l'utilisateur.
//
// CONCEPTS RUST :
// 1. thiserror : #[derive(Error)] génère Display (depuis #[error(...)]) et
//    std::error::Error, sans code répétitif
// 2. #[source] : garde la cause d'origine, accessible via Error::source()
// 3. {0:#} : le format "alternatif" d'anyhow affiche toute la chaîne de
//    contextes ("contexte: cause")
// 4. anyhow pour les causes, enums typés pour ce que l'appelant doit
//    distinguer (match sur le variant)
// ============================================================================

use thiserror::Error;

use crate::app::pages::PageId;

/// Échec d'une conversion
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Montant, devise source ou devise cible vide
    #[error("Please fill all fields.")]
    MissingInput,

    /// Le montant n'est pas un nombre (fini)
    #[error("Amount must be a number (got {input:?}).")]
    InvalidAmount { input: String },

    /// La devise cible n'est pas dans la table des taux
    #[error("Currency not supported: {currency}.")]
    UnsupportedCurrency { currency: String },

    /// Erreur réseau, timeout ou réponse invalide
    #[error("Conversion failed: {0:#}")]
    Network(#[source] anyhow::Error),
}

/// Échec du chargement du catalogue au démarrage (récupérable)
#[derive(Debug, Error)]
#[error("Failed to fetch currency list: {0:#}")]
pub struct CatalogLoadError(#[source] pub anyhow::Error);

/// Transition absente de la table de navigation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No navigation from {from:?} to {to:?}")]
    Unreachable { from: PageId, to: PageId },
}
