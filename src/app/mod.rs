// ============================================================================
// Structure : App
// ============================================================================
// État global de l'application TUI
//
// PATTERN "Application State" :
// - Le rendu (ui) lit depuis App
// - Toutes les modifications passent par les méthodes de App
// - App possède la Session, les pages, le contrôleur de navigation et le
//   service de conversion
// ============================================================================

pub mod handler;    // Dispatch des touches clavier
pub mod navigation; // PageController
pub mod pages;      // PageId, Page, ConverterPage, HistoryPage, AboutPage
pub mod session;    // Données partagées entre pages

use tracing::{error, info, warn};

use crate::config::Config;
use crate::conversion::ConversionService;
use crate::error::{CatalogLoadError, ConversionError};

pub use navigation::PageController;
pub use pages::{AboutPage, ConverterPage, Focus, HistoryPage, Page, PageId};
pub use session::Session;

// ============================================================================
// Notification modale
// ============================================================================

/// Gravité d'une notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Warning,
    Error,
}

/// Message modal affiché par-dessus la page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

// CONCEPT RUST : trait From
// - Une seule conversion erreur -> message, utilisable avec Notification::from
// - Le match exhaustif garantit un message pour chaque variant
impl From<&ConversionError> for Notification {
    fn from(err: &ConversionError) -> Self {
        match err {
            ConversionError::MissingInput => {
                Notification::warning("Input Error", "Please fill all fields.")
            }
            ConversionError::InvalidAmount { .. } => {
                Notification::error("Invalid", "Amount must be a number.")
            }
            ConversionError::UnsupportedCurrency { .. } => {
                Notification::error("Error", "Currency not supported.")
            }
            ConversionError::Network(cause) => {
                Notification::error("Error", format!("Conversion failed.\n{cause:#}"))
            }
        }
    }
}

impl From<&CatalogLoadError> for Notification {
    fn from(err: &CatalogLoadError) -> Self {
        Notification::error("Error", format!("Failed to fetch currency list.\n{:#}", err.0))
    }
}

// ============================================================================
// App
// ============================================================================

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Devises et historique
    pub session: Session,

    /// Page active
    pub navigation: PageController,

    pub converter: ConverterPage,
    pub history: HistoryPage,
    pub about: AboutPage,

    /// Notification modale en cours (bloque les autres touches)
    pub notification: Option<Notification>,

    /// Taille minimale du terminal (colonnes, lignes), lue depuis Config
    pub min_size: (u16, u16),

    service: ConversionService,
}

impl App {
    /// Crée l'application avec le catalogue de devises chargé au démarrage
    pub fn new(currencies: Vec<String>, service: ConversionService, config: &Config) -> Self {
        let converter = ConverterPage::new(&currencies);
        Self {
            running: true,
            session: Session::new(currencies),
            navigation: PageController::new(),
            converter,
            history: HistoryPage::default(),
            about: AboutPage,
            notification: None,
            min_size: (config.min_width, config.min_height),
            service,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Page active
    pub fn active_page(&self) -> PageId {
        self.navigation.active()
    }

    /// Navigue vers `target` (le hook de la page est exécuté avant l'affichage)
    pub fn navigate(&mut self, target: PageId) {
        let page: &mut dyn Page = match target {
            PageId::Converter => &mut self.converter,
            PageId::History => &mut self.history,
            PageId::About => &mut self.about,
        };

        if let Err(e) = self.navigation.navigate(page, &self.session) {
            error!(error = %e, "Navigation refused");
        }
    }

    /// Affiche une notification modale
    pub fn notify(&mut self, notification: Notification) {
        warn!(title = %notification.title, message = %notification.message, "Showing notification");
        self.notification = Some(notification);
    }

    /// Ferme la notification en cours
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn has_notification(&self) -> bool {
        self.notification.is_some()
    }

    /// Lance la conversion avec le contenu du formulaire
    ///
    /// Succès : affiche le résultat et l'ajoute à l'historique.
    /// Échec : notification, le reste de l'état est inchangé.
    pub fn convert(&mut self) {
        let outcome = self.service.convert(
            &self.converter.amount,
            self.converter.from.text(),
            self.converter.to.text(),
        );

        match outcome {
            Ok(record) => {
                info!(
                    amount = record.amount(),
                    from = record.from(),
                    to = record.to(),
                    rate = record.rate(),
                    result = record.result(),
                    entries = self.session.history.len() + 1,
                    "Conversion added to history"
                );
                self.converter.result_text = record.summary();
                self.session.history.push(record);
            }
            Err(e) => {
                warn!(error = %e, "Conversion failed");
                self.notify(Notification::from(&e));
            }
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::conversion::tests::{FailingFetcher, StubFetcher};

    pub(crate) fn test_app() -> App {
        let currencies = vec!["EUR".to_string(), "INR".to_string(), "USD".to_string()];
        let service = ConversionService::new(Box::new(StubFetcher::new("USD", &[("EUR", 0.9), ("INR", 83.12)])));
        App::new(currencies, service, &Config::default())
    }

    fn fill(app: &mut App, amount: &str, from: &str, to: &str) {
        app.converter.amount = amount.to_string();
        app.converter.from.set_text(from);
        app.converter.to.set_text(to);
    }

    #[test]
    fn test_app_creation() {
        let app = test_app();
        assert!(app.is_running());
        assert_eq!(app.active_page(), PageId::Converter);
        assert!(app.session.history.is_empty());
        assert_eq!(app.min_size, (50, 20));
        assert_eq!(app.converter.result_text, "Result will appear here");
        assert_eq!(app.converter.from.candidates(), app.session.currencies.as_slice());
    }

    #[test]
    fn test_successful_conversion_updates_result_and_history() {
        let mut app = test_app();
        fill(&mut app, "10", "usd", "eur");

        app.convert();

        assert_eq!(app.converter.result_text, "10.0 USD = 9.0 EUR");
        assert_eq!(app.session.history.len(), 1);
        assert!(!app.has_notification());
    }

    #[test]
    fn test_history_counts_every_success_in_order() {
        let mut app = test_app();
        for (amount, to) in [("1", "EUR"), ("2", "INR"), ("3", "EUR")] {
            fill(&mut app, amount, "USD", to);
            app.convert();
        }
        // Un échec n'ajoute rien
        fill(&mut app, "4", "USD", "ZZZ");
        app.convert();
        app.dismiss_notification();

        let amounts: Vec<f64> = app.session.history.iter().map(|r| r.amount()).collect();
        assert_eq!(amounts, vec![1.0, 2.0, 3.0]);

        app.navigate(PageId::History);
        assert_eq!(app.history.lines.len(), 3);
        assert!(app.history.lines[1].ends_with("2.0 USD = 166.24 INR"));
    }

    #[test]
    fn test_failed_conversion_keeps_previous_state() {
        let mut app = test_app();
        fill(&mut app, "10", "USD", "EUR");
        app.convert();

        fill(&mut app, "abc", "USD", "EUR");
        app.convert();

        assert_eq!(app.converter.result_text, "10.0 USD = 9.0 EUR");
        assert_eq!(app.session.history.len(), 1);
        assert_eq!(
            app.notification,
            Some(Notification::error("Invalid", "Amount must be a number."))
        );
    }

    #[test]
    fn test_error_notifications() {
        let mut app = test_app();

        fill(&mut app, "", "USD", "EUR");
        app.convert();
        assert_eq!(
            app.notification,
            Some(Notification::warning("Input Error", "Please fill all fields."))
        );

        fill(&mut app, "10", "USD", "ZZZ");
        app.convert();
        assert_eq!(
            app.notification,
            Some(Notification::error("Error", "Currency not supported."))
        );
    }

    #[test]
    fn test_network_error_notification() {
        let currencies = vec!["USD".to_string()];
        let service = ConversionService::new(Box::new(FailingFetcher));
        let mut app = App::new(currencies, service, &Config::default());
        fill(&mut app, "10", "USD", "EUR");

        app.convert();

        let notification = app.notification.unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.starts_with("Conversion failed.\n"));
        assert!(notification.message.contains("timed out"));
    }

    #[test]
    fn test_catalog_error_notification() {
        let err = CatalogLoadError(anyhow::anyhow!("dns error"));
        let notification = Notification::from(&err);
        assert_eq!(notification.title, "Error");
        assert_eq!(notification.message, "Failed to fetch currency list.\ndns error");
    }

    #[test]
    fn test_navigation_does_not_touch_session() {
        let mut app = test_app();
        fill(&mut app, "10", "USD", "EUR");
        app.convert();

        let currencies_before = app.session.currencies.clone();
        let history_before = app.session.history.lines();

        for target in [PageId::History, PageId::About, PageId::Converter, PageId::About, PageId::History] {
            app.navigate(target);
            assert_eq!(app.active_page(), target);
        }

        assert_eq!(app.session.currencies, currencies_before);
        assert_eq!(app.session.history.lines(), history_before);
        assert_eq!(app.converter.from.candidates(), currencies_before.as_slice());
        assert_eq!(app.converter.to.candidates(), currencies_before.as_slice());
    }

    #[test]
    fn test_app_quit() {
        let mut app = test_app();
        app.quit();
        assert!(!app.is_running());
    }
}
