// ============================================================================
// Catalogue des devises
// ============================================================================
// Chargé une seule fois au démarrage : les codes de la table des taux de la
// devise de base (USD) alimentent les deux listes déroulantes.
//
// En cas d'échec, l'application reste utilisable avec une liste de secours
// et l'erreur est montrée à l'utilisateur (non fatale).
// ============================================================================

use tracing::{info, warn};

use crate::api::RateFetcher;
use crate::config::Config;
use crate::error::CatalogLoadError;

/// Résultat du chargement du catalogue
#[derive(Debug)]
pub enum Catalog {
    /// Codes récupérés depuis l'API, triés
    Live(Vec<String>),

    /// Liste de secours, avec l'erreur à signaler
    Fallback {
        codes: Vec<String>,
        error: CatalogLoadError,
    },
}

impl Catalog {
    /// Sépare les codes de l'éventuelle erreur
    pub fn into_parts(self) -> (Vec<String>, Option<CatalogLoadError>) {
        match self {
            Catalog::Live(codes) => (codes, None),
            Catalog::Fallback { codes, error } => (codes, Some(error)),
        }
    }
}

/// Charge le catalogue depuis la table des taux de `config.catalog_base`
pub fn load_catalog(fetcher: &dyn RateFetcher, config: &Config) -> Catalog {
    let result = fetcher
        .fetch_rates(&config.catalog_base)
        .and_then(|rates| {
            if rates.is_empty() {
                anyhow::bail!("No rates returned for {}", config.catalog_base);
            }
            // Les clés d'une RateTable sont déjà triées
            Ok(rates.into_keys().collect::<Vec<_>>())
        });

    match result {
        Ok(codes) => {
            info!(count = codes.len(), base = %config.catalog_base, "Currency catalog loaded");
            Catalog::Live(codes)
        }
        Err(e) => {
            warn!(error = ?e, "Failed to load currency catalog, using fallback list");
            Catalog::Fallback {
                codes: config.fallback_currencies.clone(),
                error: CatalogLoadError(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::tests::{FailingFetcher, StubFetcher};

    #[test]
    fn test_load_catalog_sorted_codes() {
        let fetcher = StubFetcher::new("USD", &[("USD", 1.0), ("INR", 83.0), ("EUR", 0.9), ("AED", 3.67)]);

        let (codes, error) = load_catalog(&fetcher, &Config::default()).into_parts();

        assert!(error.is_none());
        assert_eq!(codes, vec!["AED", "EUR", "INR", "USD"]);
    }

    #[test]
    fn test_load_catalog_fallback_on_error() {
        let (codes, error) = load_catalog(&FailingFetcher, &Config::default()).into_parts();

        assert_eq!(codes, vec!["USD", "INR", "EUR"]);

        let message = error.unwrap().to_string();
        assert!(message.starts_with("Failed to fetch currency list"));
        assert!(message.contains("timed out"));
    }

    #[test]
    fn test_load_catalog_fallback_on_empty_table() {
        let fetcher = StubFetcher::new("USD", &[]);

        let (codes, error) = load_catalog(&fetcher, &Config::default()).into_parts();

        assert_eq!(codes, vec!["USD", "INR", "EUR"]);
        let message = error.unwrap().to_string();
        assert!(message.ends_with("No rates returned for USD"), "unexpected error: {message}");
    }
}
