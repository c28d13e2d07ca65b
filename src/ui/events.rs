// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier et les ticks de l'application
//
// Les helpers is_*_event() identifient les touches ; le dispatch selon la
// page active est dans app::handler.
//
// CONCEPTS RUST :
// 1. Enums avec données : Key(KeyEvent) transporte l'événement complet,
//    Tick n'a pas de données (unit variant)
// 2. Option et `?` : key_of() retourne None pour un Tick, et `?` arrête
//    la fonction appelante dans ce cas
// 3. is_some_and() : teste le contenu d'une Option en une expression
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::PageId;

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Pas d'événement pendant le délai de poll (ou événement ignoré)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    poll_timeout: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un poll de 250ms
    pub fn new() -> Self {
        Self {
            poll_timeout: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// - Touche pressée : Event::Key
    /// - Timeout, relâchement de touche, resize, souris : Event::Tick
    ///   (la boucle redessine à chaque itération, le resize est donc pris
    ///   en compte au tour suivant)
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.poll_timeout)? {
            return Ok(Event::Tick);
        }

        // CONCEPT RUST : match guard sur le variant
        match event::read()? {
            // Sur certains OS, on reçoit Press ET Release : on ne garde que Press
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : identifier les touches
// ============================================================================

fn key_of(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) => Some(key),
        Event::Tick => None,
    }
}

/// Ctrl+Q ou Ctrl+C : quitter depuis n'importe quelle page
pub fn is_quit_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    })
}

/// Vérifie si l'événement est Échap
pub fn is_escape_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::Esc)
}

/// Vérifie si l'événement est Entrée
pub fn is_enter_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::Enter)
}

/// Vérifie si l'événement est Espace
pub fn is_space_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::Char(' '))
}

/// Tab : champ suivant
pub fn is_tab_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::Tab)
}

/// Shift+Tab : champ précédent
pub fn is_backtab_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::BackTab)
}

/// Vérifie si l'événement est Backspace
pub fn is_backspace_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::Backspace)
}

/// Flèche vers le haut
pub fn is_up_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::Up)
}

/// Flèche vers le bas
pub fn is_down_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| key.code == KeyCode::Down)
}

/// Page associée à une touche de fonction (F1, F2, F3)
pub fn page_from_function_key(event: &Event) -> Option<PageId> {
    match key_of(event)?.code {
        KeyCode::F(n) => PageId::ALL.into_iter().find(|page| page.function_key() == n),
        _ => None,
    }
}

/// Extrait le caractère d'un événement clavier (sans Ctrl ni Alt)
pub fn get_char_from_event(event: &Event) -> Option<char> {
    let key = key_of(event)?;
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
