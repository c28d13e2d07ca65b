// ============================================================================
// Configuration de l'application
// ============================================================================
// Toutes les valeurs réglables de lazyfx au même endroit
//
// Pas de fichier de configuration ni de flags : les valeurs par défaut
// conviennent, et les tests les surchargent avec les méthodes with_*()
// (ex: URL d'un serveur wiremock).
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// URL de base de l'API des taux (la devise de base est ajoutée à la fin)
pub const DEFAULT_API_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Devise de base utilisée pour charger le catalogue au démarrage
pub const DEFAULT_CATALOG_BASE: &str = "USD";

/// Timeout des requêtes HTTP
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Devises utilisées si le catalogue ne peut pas être chargé
pub const FALLBACK_CURRENCIES: [&str; 3] = ["USD", "INR", "EUR"];

/// Taille minimale du terminal (colonnes, lignes)
pub const MIN_TERMINAL_SIZE: (u16, u16) = (50, 20);

/// Configuration de lazyfx
#[derive(Debug, Clone)]
pub struct Config {
    /// URL de base de l'API (sans la devise)
    pub api_base_url: String,

    /// Devise de base pour le catalogue de devises
    pub catalog_base: String,

    /// Timeout de chaque requête HTTP
    pub request_timeout: Duration,

    /// Liste de secours si le catalogue est indisponible
    pub fallback_currencies: Vec<String>,

    /// Largeur minimale du terminal (colonnes)
    pub min_width: u16,

    /// Hauteur minimale du terminal (lignes)
    pub min_height: u16,

    /// Répertoire des fichiers de logs
    pub log_dir: PathBuf,
}

impl Config {
    /// Remplace l'URL de base de l'API
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Remplace le timeout des requêtes
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Remplace la taille minimale du terminal
    pub fn with_min_size(mut self, width: u16, height: u16) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            catalog_base: DEFAULT_CATALOG_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fallback_currencies: FALLBACK_CURRENCIES.iter().map(|c| c.to_string()).collect(),
            min_width: MIN_TERMINAL_SIZE.0,
            min_height: MIN_TERMINAL_SIZE.1,
            log_dir: default_log_dir(),
        }
    }
}

/// Répertoire de logs par défaut
///
/// - Linux : ~/.local/share/lazyfx/logs
/// - macOS : ~/Library/Application Support/lazyfx/logs
/// - Windows : C:\Users\<user>\AppData\Local\lazyfx\logs
/// - Inconnu : ./logs
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazyfx").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
