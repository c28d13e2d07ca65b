// ============================================================================
// Pages de l'application
// ============================================================================
// Trois pages : Converter, History, About. Une seule est visible à la fois
// (voir app::navigation).
//
// Chaque page peut définir un hook on_activate(), appelé par le
// PageController juste AVANT que la page devienne visible.
//
// CONCEPTS RUST :
// 1. Enum + match exhaustif : ajouter une page oblige à compléter chaque
//    match (title, nav_label...), le compilateur liste les oublis
// 2. Types Copy : PageId et Focus sont petits, on les passe par valeur
// 3. Méthodes par défaut dans un trait : on_activate() ne fait rien sauf
//    si la page la redéfinit (History)
// ============================================================================

use crate::app::session::Session;
use crate::ui::choice_field::FilterableChoiceField;

/// Texte du résultat avant la première conversion
pub const RESULT_PLACEHOLDER: &str = "Result will appear here";

// ============================================================================
// Enum : PageId
// ============================================================================

/// Identité d'une page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Converter,
    History,
    About,
}

impl PageId {
    /// Toutes les pages, dans l'ordre des touches F1..F3
    pub const ALL: [PageId; 3] = [PageId::Converter, PageId::History, PageId::About];

    /// Table des transitions : pages accessibles depuis celle-ci
    ///
    /// Graphe complet : chaque page mène aux deux autres.
    pub fn nav_targets(self) -> [PageId; 2] {
        match self {
            PageId::Converter => [PageId::History, PageId::About],
            PageId::History => [PageId::Converter, PageId::About],
            PageId::About => [PageId::Converter, PageId::History],
        }
    }

    /// Vérifie si `target` est accessible depuis cette page
    pub fn can_navigate_to(self, target: PageId) -> bool {
        self.nav_targets().contains(&target)
    }

    /// Titre affiché en haut de la page
    pub fn title(self) -> &'static str {
        match self {
            PageId::Converter => "Currency Converter",
            PageId::History => "Conversion History",
            PageId::About => "About This App",
        }
    }

    /// Libellé du bouton de navigation vers cette page
    pub fn nav_label(self) -> &'static str {
        match self {
            PageId::Converter => "Back to Converter",
            PageId::History => "History",
            PageId::About => "About",
        }
    }

    /// Touche de fonction associée
    pub fn function_key(self) -> u8 {
        match self {
            PageId::Converter => 1,
            PageId::History => 2,
            PageId::About => 3,
        }
    }
}

// ============================================================================
// Trait : Page
// ============================================================================

/// Comportement commun des pages
pub trait Page {
    fn id(&self) -> PageId;

    /// Appelé avant que la page devienne visible
    fn on_activate(&mut self, _session: &Session) {}
}

// ============================================================================
// Page : Converter
// ============================================================================

/// Champ qui a le focus sur la page Converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Amount,
    From,
    To,
}

impl Focus {
    /// Champ suivant (Tab)
    pub fn next(self) -> Self {
        match self {
            Focus::Amount => Focus::From,
            Focus::From => Focus::To,
            Focus::To => Focus::Amount,
        }
    }

    /// Champ précédent (Shift+Tab)
    pub fn previous(self) -> Self {
        match self {
            Focus::Amount => Focus::To,
            Focus::From => Focus::Amount,
            Focus::To => Focus::From,
        }
    }
}

/// Formulaire de conversion
#[derive(Debug, Clone)]
pub struct ConverterPage {
    /// Montant saisi (texte brut)
    pub amount: String,

    /// Devise source
    pub from: FilterableChoiceField,

    /// Devise cible
    pub to: FilterableChoiceField,

    /// Champ actif
    pub focus: Focus,

    /// Dernier résultat affiché
    pub result_text: String,
}

impl ConverterPage {
    /// Crée le formulaire, les deux listes partageant les mêmes candidats
    pub fn new(currencies: &[String]) -> Self {
        Self {
            amount: String::new(),
            from: FilterableChoiceField::new(currencies.to_vec()),
            to: FilterableChoiceField::new(currencies.to_vec()),
            focus: Focus::Amount,
            result_text: RESULT_PLACEHOLDER.to_string(),
        }
    }

    /// Liste déroulante du champ actif (None si c'est le montant)
    pub fn focused_choice(&self) -> Option<&FilterableChoiceField> {
        match self.focus {
            Focus::Amount => None,
            Focus::From => Some(&self.from),
            Focus::To => Some(&self.to),
        }
    }

    pub fn focused_choice_mut(&mut self) -> Option<&mut FilterableChoiceField> {
        match self.focus {
            Focus::Amount => None,
            Focus::From => Some(&mut self.from),
            Focus::To => Some(&mut self.to),
        }
    }

    /// Change le focus ; la liste du champ quitté se referme
    pub fn set_focus(&mut self, focus: Focus) {
        if let Some(field) = self.focused_choice_mut() {
            field.close_dropdown();
        }
        self.focus = focus;
    }
}

impl Page for ConverterPage {
    fn id(&self) -> PageId {
        PageId::Converter
    }
}

// ============================================================================
// Page : History
// ============================================================================

/// Liste des conversions passées
#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    /// Lignes affichées, reconstruites à chaque activation
    pub lines: Vec<String>,

    /// Première ligne visible (défilement)
    pub scroll: usize,
}

impl HistoryPage {
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max_scroll = self.lines.len().saturating_sub(1);
        self.scroll = (self.scroll + 1).min(max_scroll);
    }
}

impl Page for HistoryPage {
    fn id(&self) -> PageId {
        PageId::History
    }

    /// Vide puis reconstruit la liste depuis l'historique complet
    fn on_activate(&mut self, session: &Session) {
        self.lines.clear();
        self.lines.extend(session.history.lines());
        self.scroll = 0;
    }
}

// ============================================================================
// Page : About
// ============================================================================

/// Texte de la page About
pub const ABOUT_TEXT: [&str; 4] = [
    "Currency Converter",
    "Built with Rust, ratatui & crossterm",
    "Live rates via ExchangeRate API",
    "Features: Auto-filter dropdown & History",
];

/// Page statique
#[derive(Debug, Clone, Copy, Default)]
pub struct AboutPage;

impl Page for AboutPage {
    fn id(&self) -> PageId {
        PageId::About
    }
}
