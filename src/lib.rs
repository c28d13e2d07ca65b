// ============================================================================
// lazyfx - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;        // Client de l'API des taux de change
pub mod app;        // État de l'application, pages, navigation
pub mod catalog;    // Catalogue des devises chargé au démarrage
pub mod config;     // Configuration
pub mod conversion; // Service de conversion
pub mod error;      // Erreurs typées
pub mod models;     // Structures de données
pub mod ui;         // Interface utilisateur
