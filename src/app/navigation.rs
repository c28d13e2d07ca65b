// ============================================================================
// PageController : navigation entre les pages
// ============================================================================
// Machine à états finie, pas une pile : une seule page active, pas de
// "retour arrière" autre que les boutons de navigation.
//
// Ordre garanti par navigate() :
// 1. Vérifie la transition dans la table (PageId::nav_targets)
// 2. Appelle on_activate() de la page cible (ex: History relit l'historique)
// 3. Seulement ensuite, la page cible devient active
//
// Ainsi la page n'est jamais affichée avec un contenu périmé.
//
// CONCEPT RUST : &mut dyn Page
// - Le contrôleur ne connaît pas le type concret de la page
// - Il l'emprunte le temps de l'appel, sans en prendre possession
// ============================================================================

use tracing::debug;

use crate::app::pages::{Page, PageId};
use crate::app::session::Session;
use crate::error::NavigationError;

/// Contrôleur de navigation
#[derive(Debug, Clone)]
pub struct PageController {
    active: PageId,
}

impl PageController {
    /// Démarre sur la page Converter
    pub fn new() -> Self {
        Self {
            active: PageId::Converter,
        }
    }

    /// Page actuellement visible
    pub fn active(&self) -> PageId {
        self.active
    }

    /// Active `page` après avoir exécuté son hook d'activation
    ///
    /// Naviguer vers la page déjà active est permis et relance le hook.
    /// Retourne la page précédente.
    pub fn navigate(
        &mut self,
        page: &mut dyn Page,
        session: &Session,
    ) -> Result<PageId, NavigationError> {
        let from = self.active;
        let to = page.id();

        if from != to && !from.can_navigate_to(to) {
            return Err(NavigationError::Unreachable { from, to });
        }

        page.on_activate(session);
        self.active = to;

        debug!(?from, ?to, "Navigated");
        Ok(from)
    }
}

impl Default for PageController {
    fn default() -> Self {
        Self::new()
    }
}
