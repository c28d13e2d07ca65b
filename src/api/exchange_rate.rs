// ============================================================================
// API Client : taux de change
// ============================================================================
// Récupère la table des taux pour une devise de base
//
// Contrat de l'API :
//   GET <base_url>/<BASE>  ->  { "base": "USD", "rates": { "EUR": 0.9, ... } }
//
// Seul le champ "rates" est utilisé. Statut non-2xx, erreur réseau, timeout
// ou JSON sans "rates" : tout est une erreur de fetch.
//
// L'application est mono-thread : les appels sont faits de manière bloquante
// via un runtime tokio (block_on), directement depuis la boucle TUI.
//
// CONCEPTS RUST :
// 1. async/await : reqwest est asynchrone, une fonction async retourne un
//    Future qui ne fait rien tant qu'on ne l'exécute pas
// 2. block_on : exécute un Future jusqu'au bout sur le thread courant
// 3. Traits : RateFetcher sépare "où trouver les taux" de "quoi en faire"
// 4. serde : désérialisation JSON vers des structs typées
// ============================================================================

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::config::Config;

/// Table des taux : code devise -> taux, relative à une devise de base
///
/// BTreeMap garde les codes triés, ce qui donne directement le catalogue
/// dans l'ordre alphabétique.
pub type RateTable = BTreeMap<String, f64>;

/// Réponse de l'API (les autres champs sont ignorés par serde)
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: RateTable,
}

// ============================================================================
// Trait RateFetcher
// ============================================================================
// Point d'injection entre le service de conversion et le réseau.
// Les tests le remplacent par des tables fixes.
// ============================================================================

/// Source de taux de change
///
/// CONCEPT RUST : Trait objects
/// - ConversionService stocke un `Box<dyn RateFetcher>`
/// - Le type concret (HTTP, table fixe) est choisi à l'exécution
pub trait RateFetcher {
    /// Récupère les taux pour la devise de base `base` (aucun cache)
    fn fetch_rates(&self, base: &str) -> Result<RateTable>;
}

/// Implémentation HTTP bloquante de RateFetcher
pub struct HttpRateFetcher {
    client: reqwest::Client,
    base_url: String,
    runtime: tokio::runtime::Runtime,
}

impl HttpRateFetcher {
    /// Crée le client HTTP et le runtime qui l'exécute
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(config)?;

        // Runtime current-thread : block_on s'exécute sur le thread appelant
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Could not start the HTTP runtime")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            runtime,
        })
    }
}

impl RateFetcher for HttpRateFetcher {
    fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        self.runtime
            .block_on(fetch_latest_rates(&self.client, &self.base_url, base))
    }
}

/// Construit le client reqwest avec le timeout configuré
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("lazyfx/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .build()
        .context("Could not build the HTTP client")
}

/// Récupère les taux de la devise `base` depuis l'API
///
/// # Arguments
/// * `client` - Client HTTP (porte le timeout)
/// * `base_url` - URL de base, ex: "https://api.exchangerate-api.com/v4/latest"
/// * `base` - Devise de base, ex: "USD"
#[instrument(skip(client))]
pub async fn fetch_latest_rates(
    client: &reqwest::Client,
    base_url: &str,
    base: &str,
) -> Result<RateTable> {
    let url = build_rates_url(base_url, base);
    debug!(url = %url, "Sending rates request");

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    // CONCEPT : un statut HTTP d'erreur n'est pas une erreur pour reqwest,
    // il faut le vérifier soi-même
    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "Rates API returned error status");
        anyhow::bail!("Rates API returned HTTP {}", status);
    }

    let body = response
        .text()
        .await
        .context("Could not read the rates response")?;

    let rates = parse_rates_body(&body)?;

    info!(count = rates.len(), "Successfully fetched rates");
    Ok(rates)
}

/// Construit l'URL `<base_url>/<BASE>`
fn build_rates_url(base_url: &str, base: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), base)
}

/// Extrait la table des taux du corps JSON
fn parse_rates_body(body: &str) -> Result<RateTable> {
    match serde_json::from_str::<LatestRatesResponse>(body) {
        Ok(response) => Ok(response.rates),
        Err(e) => {
            error!(error = ?e, body = %body, "Failed to parse rates response");
            Err(e).context("Invalid rates response")
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USD_BODY: &str = r#"{
        "base": "USD",
        "date": "2026-10-17",
        "time_last_updated": 1792195201,
        "rates": { "USD": 1, "EUR": 0.9, "INR": 83.12 }
    }"#;

    async fn create_mock_server(base: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/{base}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn test_client() -> reqwest::Client {
        build_client(&Config::default()).unwrap()
    }

    #[test]
    fn test_build_rates_url() {
        assert_eq!(
            build_rates_url("https://api.exchangerate-api.com/v4/latest", "EUR"),
            "https://api.exchangerate-api.com/v4/latest/EUR"
        );
        assert_eq!(build_rates_url("http://localhost/", "USD"), "http://localhost/USD");
    }

    #[test]
    fn test_parse_rates_body() {
        let rates = parse_rates_body(USD_BODY).unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates["EUR"], 0.9);
        assert_eq!(rates["USD"], 1.0);

        // Clés triées
        let codes: Vec<&str> = rates.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["EUR", "INR", "USD"]);
    }

    #[test]
    fn test_parse_rates_body_rejects_missing_rates() {
        assert!(parse_rates_body(r#"{"result": "error", "error-type": "unsupported-code"}"#).is_err());
        assert!(parse_rates_body("<html>rate limited</html>").is_err());
        assert!(parse_rates_body(r#"{"rates": {"EUR": "abc"}}"#).is_err());
    }

    #[tokio::test]
    async fn test_fetch_latest_rates() {
        let server = create_mock_server("USD", 200, USD_BODY).await;

        let rates = fetch_latest_rates(&test_client(), &server.uri(), "USD")
            .await
            .unwrap();

        assert_eq!(rates.get("INR"), Some(&83.12));
    }

    #[tokio::test]
    async fn test_fetch_latest_rates_http_error() {
        let server = create_mock_server("ZZZ", 404, r#"{"rates": {}}"#).await;

        let result = fetch_latest_rates(&test_client(), &server.uri(), "ZZZ").await;

        let message = format!("{:#}", result.unwrap_err());
        assert_eq!(message, "Rates API returned HTTP 404 Not Found");
    }

    #[tokio::test]
    async fn test_fetch_latest_rates_malformed_body() {
        let server = create_mock_server("USD", 200, "not json").await;

        let result = fetch_latest_rates(&test_client(), &server.uri(), "USD").await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.starts_with("Invalid rates response: "), "unexpected error: {message}");
    }

    #[tokio::test]
    async fn test_fetch_latest_rates_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/USD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(USD_BODY)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = Config::default().with_timeout(Duration::from_millis(100));
        let client = build_client(&config).unwrap();

        let result = fetch_latest_rates(&client, &server.uri(), "USD").await;

        // Le message remonte jusqu'à la notification : il reste en anglais
        let message = format!("{:#}", result.unwrap_err());
        let expected = format!("Request to {}/USD failed: ", server.uri());
        assert!(message.starts_with(&expected), "unexpected error: {message}");
    }

    #[test]
    fn test_http_rate_fetcher_blocks_on_caller_thread() {
        // Le serveur simulé tourne sur son propre runtime, le fetcher
        // utilise le sien en mode bloquant
        let server_runtime = tokio::runtime::Runtime::new().unwrap();
        let server = server_runtime.block_on(create_mock_server("USD", 200, USD_BODY));

        let config = Config::default().with_api_base_url(server.uri());
        let fetcher = HttpRateFetcher::new(&config).unwrap();

        let rates = fetcher.fetch_rates("USD").unwrap();
        assert_eq!(rates.get("EUR"), Some(&0.9));
    }
}
