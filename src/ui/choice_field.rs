// ============================================================================
// Widget : FilterableChoiceField
// ============================================================================
// Champ texte avec liste déroulante filtrée au fil de la frappe
//
// Fonctionnement :
// - Les candidats sont fixés à la construction (codes devises en majuscules)
// - Chaque modification du texte passe par set_text()
// - set_text() appelle le filtre enregistré (fonction pure) pour recalculer
//   les candidats visibles, puis demande l'ouverture de la liste déroulante
// - La liste est rouverte à CHAQUE frappe, même si les candidats visibles
//   n'ont pas changé
//
// Le rendu est fait par ui::render à partir de cet état.
//
// CONCEPTS RUST :
// 1. Pointeurs de fonction (fn) : le filtre est une simple fonction, pas une
//    closure. Pas de capture, donc le champ reste Clone + Debug sans Box
// 2. Encapsulation : les champs sont privés, on ne peut modifier le texte
//    qu'en passant par set_text(), qui garde `visible` à jour
// 3. Slices (&[String]) : on prête la liste sans la copier
// ============================================================================

use tracing::trace;

/// Signature d'un filtre : (candidats, texte saisi) -> candidats visibles
///
/// CONCEPT RUST : type alias
/// - Donne un nom lisible à une signature longue
/// - `fn(..)` (minuscule) est un pointeur de fonction, `Fn(..)` un trait
pub type FilterFn = fn(&[String], &str) -> Vec<String>;

/// Filtre par préfixe
///
/// - Texte vide : tous les candidats
/// - Sinon : les candidats qui commencent par le texte en majuscules
///
/// Seul le texte saisi est mis en majuscules : les candidats sont comparés
/// tels quels.
pub fn prefix_filter(candidates: &[String], typed: &str) -> Vec<String> {
    if typed.is_empty() {
        return candidates.to_vec();
    }

    let prefix = typed.to_uppercase();
    candidates
        .iter()
        .filter(|candidate| candidate.starts_with(&prefix))
        .cloned()
        .collect()
}

/// État de la liste déroulante
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dropdown {
    /// Liste affichée sous le champ
    pub open: bool,

    /// Index du candidat surligné dans la liste visible
    pub highlighted: usize,

    /// Nombre de demandes d'affichage reçues (une par frappe)
    pub refresh_requests: u64,
}

/// Champ de saisie avec filtrage des candidats
#[derive(Debug, Clone)]
pub struct FilterableChoiceField {
    candidates: Vec<String>,
    text: String,
    visible: Vec<String>,
    filter: FilterFn,
    dropdown: Dropdown,
}

impl FilterableChoiceField {
    /// Crée un champ vide avec le filtre par préfixe
    pub fn new(candidates: Vec<String>) -> Self {
        Self::with_filter(candidates, prefix_filter)
    }

    /// Crée un champ vide avec un filtre personnalisé
    pub fn with_filter(candidates: Vec<String>, filter: FilterFn) -> Self {
        let visible = filter(&candidates, "");
        Self {
            candidates,
            text: String::new(),
            visible,
            filter,
            dropdown: Dropdown::default(),
        }
    }

    /// Texte brut, tel que saisi
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Liste complète des candidats
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Candidats visibles pour le texte courant
    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    /// Remplace le texte, recalcule les candidats visibles et demande
    /// l'affichage de la liste déroulante
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = (self.filter)(&self.candidates, &self.text);
        self.request_dropdown();
        trace!(text = %self.text, visible = self.visible.len(), "Choice field updated");
    }

    /// Ajoute un caractère (frappe clavier)
    pub fn push_char(&mut self, c: char) {
        let mut text = self.text.clone();
        text.push(c);
        self.set_text(text);
    }

    /// Supprime le dernier caractère (frappe clavier)
    pub fn backspace(&mut self) {
        let mut text = self.text.clone();
        text.pop();
        self.set_text(text);
    }

    /// Surligne le candidat suivant (ouvre la liste si besoin)
    pub fn highlight_next(&mut self) {
        if !self.dropdown.open {
            self.dropdown.open = true;
            return;
        }
        let max_index = self.visible.len().saturating_sub(1);
        self.dropdown.highlighted = (self.dropdown.highlighted + 1).min(max_index);
    }

    /// Surligne le candidat précédent (ouvre la liste si besoin)
    pub fn highlight_previous(&mut self) {
        if !self.dropdown.open {
            self.dropdown.open = true;
            return;
        }
        self.dropdown.highlighted = self.dropdown.highlighted.saturating_sub(1);
    }

    /// Candidat surligné si la liste est ouverte et non vide
    pub fn highlighted(&self) -> Option<&str> {
        if !self.dropdown.open {
            return None;
        }
        self.visible.get(self.dropdown.highlighted).map(String::as_str)
    }

    /// Copie le candidat surligné dans le champ et ferme la liste
    ///
    /// Retourne false si rien n'était surligné
    pub fn accept_highlighted(&mut self) -> bool {
        let Some(choice) = self.highlighted().map(str::to_string) else {
            return false;
        };
        self.set_text(choice);
        self.close_dropdown();
        true
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown.open = false;
    }

    fn request_dropdown(&mut self) {
        self.dropdown.open = true;
        self.dropdown.highlighted = 0;
        self.dropdown.refresh_requests += 1;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn currencies() -> Vec<String> {
        codes(&["AED", "EUR", "GBP", "INR", "USD", "UYU"])
    }

    #[test]
    fn test_prefix_filter_empty_text_keeps_all() {
        assert_eq!(prefix_filter(&currencies(), ""), currencies());
    }

    #[test]
    fn test_prefix_filter_is_case_insensitive_on_typed_side() {
        assert_eq!(prefix_filter(&currencies(), "u"), codes(&["USD", "UYU"]));
        assert_eq!(prefix_filter(&currencies(), "Us"), codes(&["USD"]));
        assert_eq!(prefix_filter(&currencies(), "INR"), codes(&["INR"]));
    }

    #[test]
    fn test_prefix_filter_is_prefix_only() {
        // "SD" apparaît dans USD mais pas au début
        assert!(prefix_filter(&currencies(), "sd").is_empty());
    }

    #[test]
    fn test_prefix_filter_candidates_are_case_sensitive() {
        let mixed = codes(&["usd", "USD"]);
        assert_eq!(prefix_filter(&mixed, "us"), codes(&["USD"]));
    }

    #[test]
    fn test_new_field_shows_everything() {
        let field = FilterableChoiceField::new(currencies());
        assert_eq!(field.text(), "");
        assert_eq!(field.visible(), currencies().as_slice());
        assert!(!field.dropdown().open);
    }

    #[test]
    fn test_set_text_filters_and_keeps_raw_text() {
        let mut field = FilterableChoiceField::new(currencies());
        field.set_text("eu");

        assert_eq!(field.text(), "eu");
        assert_eq!(field.visible(), ["EUR"]);
        assert_eq!(field.candidates().len(), 6);
    }

    #[test]
    fn test_no_match_keeps_text() {
        let mut field = FilterableChoiceField::new(currencies());
        field.set_text("xyz");

        assert_eq!(field.text(), "xyz");
        assert!(field.visible().is_empty());
        assert_eq!(field.highlighted(), None);
    }

    #[test]
    fn test_set_text_is_idempotent_for_visible() {
        let mut once = FilterableChoiceField::new(currencies());
        once.set_text("U");

        let mut twice = FilterableChoiceField::new(currencies());
        twice.set_text("U");
        twice.set_text("U");

        assert_eq!(once.visible(), twice.visible());
    }

    #[test]
    fn test_every_keystroke_requests_dropdown() {
        let mut field = FilterableChoiceField::new(currencies());
        field.push_char('u');
        field.close_dropdown();
        field.set_text("u");

        // Même texte, même liste : la demande d'affichage est quand même émise
        assert!(field.dropdown().open);
        assert_eq!(field.dropdown().refresh_requests, 2);
    }

    #[test]
    fn test_backspace_widens_filter() {
        let mut field = FilterableChoiceField::new(currencies());
        field.push_char('u');
        field.push_char('s');
        assert_eq!(field.visible(), ["USD"]);

        field.backspace();
        assert_eq!(field.text(), "u");
        assert_eq!(field.visible(), ["USD", "UYU"]);

        field.backspace();
        field.backspace();
        assert_eq!(field.text(), "");
        assert_eq!(field.visible().len(), 6);
    }

    #[test]
    fn test_highlight_and_accept() {
        let mut field = FilterableChoiceField::new(currencies());
        field.set_text("u");
        assert_eq!(field.highlighted(), Some("USD"));

        field.highlight_next();
        assert_eq!(field.highlighted(), Some("UYU"));

        // Borné à la fin de la liste
        field.highlight_next();
        assert_eq!(field.highlighted(), Some("UYU"));

        field.highlight_previous();
        field.highlight_next();
        assert!(field.accept_highlighted());
        assert_eq!(field.text(), "UYU");
        assert!(!field.dropdown().open);
    }

    #[test]
    fn test_highlight_opens_closed_dropdown() {
        let mut field = FilterableChoiceField::new(currencies());
        assert!(!field.accept_highlighted());

        field.highlight_next();
        assert!(field.dropdown().open);
        assert_eq!(field.highlighted(), Some("AED"));
    }

    #[test]
    fn test_custom_filter() {
        fn contains_filter(candidates: &[String], typed: &str) -> Vec<String> {
            let needle = typed.to_uppercase();
            candidates.iter().filter(|c| c.contains(&needle)).cloned().collect()
        }

        let mut field = FilterableChoiceField::with_filter(currencies(), contains_filter);
        field.set_text("sd");
        assert_eq!(field.visible(), ["USD"]);
    }
}
