// ============================================================================
// Service : ConversionService
// ============================================================================
// Valide la saisie, récupère le taux et calcule le résultat
//
// Étapes :
// 1. Devises en majuscules, aucun champ vide       -> MissingInput
// 2. Montant parsable en nombre fini               -> InvalidAmount
// 3. Taux frais pour la devise source (pas de cache) -> Network
// 4. Devise cible présente dans la table          -> UnsupportedCurrency
// 5. result = round_to_cents(amount * rate)
//
// Le service n'écrit pas dans l'historique : c'est l'appelant (App) qui
// ajoute chaque conversion réussie.
//
// CONCEPT RUST : Result<T, E> avec une erreur typée
// - Chaque `return Err(...)` s'arrête à la première étape en échec
// - map_err() convertit l'anyhow::Error du fetcher en ConversionError
// - L'ordre des étapes est donc visible dans le code, de haut en bas
// ============================================================================

use chrono::Local;
use tracing::{debug, info, instrument, warn};

use crate::api::RateFetcher;
use crate::error::ConversionError;
use crate::models::{round_to_cents, ConversionRecord};

/// Service de conversion
pub struct ConversionService {
    fetcher: Box<dyn RateFetcher>,
}

impl ConversionService {
    pub fn new(fetcher: Box<dyn RateFetcher>) -> Self {
        Self { fetcher }
    }

    /// Convertit `amount_text` de `from` vers `to`
    ///
    /// # Exemple
    /// Avec un taux USD -> EUR de 0.9 :
    /// `convert("10", "usd", "EUR")` donne un record dont le résumé est
    /// "10.0 USD = 9.0 EUR"
    #[instrument(skip(self))]
    pub fn convert(
        &self,
        amount_text: &str,
        from: &str,
        to: &str,
    ) -> Result<ConversionRecord, ConversionError> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();

        if amount_text.is_empty() || from.is_empty() || to.is_empty() {
            return Err(ConversionError::MissingInput);
        }

        let amount = parse_amount(amount_text)?;

        // Toujours une requête fraîche, même pour une paire déjà convertie
        let rates = self
            .fetcher
            .fetch_rates(&from)
            .map_err(ConversionError::Network)?;

        let rate = match rates.get(&to) {
            Some(&rate) => rate,
            None => {
                warn!(from = %from, to = %to, available = rates.len(), "Target currency not in rate table");
                return Err(ConversionError::UnsupportedCurrency { currency: to });
            }
        };

        let result = round_to_cents(amount * rate);
        debug!(amount, rate, result, "Computed conversion");

        let record = ConversionRecord::new(Local::now(), amount, from, to, rate, result);
        info!(summary = %record.summary(), "Conversion succeeded");
        Ok(record)
    }
}

/// Parse le montant saisi (espaces autour ignorés, NaN et infini refusés)
///
/// CONCEPT RUST : match guard
/// - `Ok(amount) if amount.is_finite()` : le bras ne matche que si la
///   condition est vraie, sinon on tombe dans `_`
fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ConversionError::InvalidAmount {
            input: text.to_string(),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
