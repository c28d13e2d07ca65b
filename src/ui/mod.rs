// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod choice_field; // Champ texte avec liste déroulante filtrée
pub mod events;       // Lecture et identification des touches
pub mod render;       // Rendu des pages et de la notification

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use render::render;
