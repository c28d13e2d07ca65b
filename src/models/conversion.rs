// ============================================================================
// Structure : ConversionRecord
// ============================================================================
// Une conversion réussie, horodatée. Immuable une fois créée : les champs
// sont privés et exposés en lecture seule.
// ============================================================================

use chrono::{DateTime, Local};

/// Format de l'horodatage dans l'historique
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Une conversion effectuée
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRecord {
    timestamp: DateTime<Local>,
    amount: f64,
    from: String,
    to: String,
    rate: f64,
    result: f64,
}

impl ConversionRecord {
    /// Crée un enregistrement
    ///
    /// `result` doit déjà être arrondi (voir round_to_cents)
    pub fn new(
        timestamp: DateTime<Local>,
        amount: f64,
        from: String,
        to: String,
        rate: f64,
        result: f64,
    ) -> Self {
        Self {
            timestamp,
            amount,
            from,
            to,
            rate,
            result,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Taux utilisé pour la conversion
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    /// Texte du résultat, ex: "10.0 USD = 9.0 EUR"
    pub fn summary(&self) -> String {
        format!(
            "{} {} = {} {}",
            format_number(self.amount),
            self.from,
            format_number(self.result),
            self.to
        )
    }

    /// Ligne d'historique, ex: "[2026-10-17 14:03:59] 10.0 USD = 9.0 EUR"
    pub fn history_line(&self) -> String {
        format!("[{}] {}", self.timestamp.format(TIMESTAMP_FORMAT), self.summary())
    }
}

/// Arrondit à 2 décimales, demi-valeurs loin de zéro
///
/// f64::round() arrondit les demis loin de zéro (2.5 -> 3.0, -2.5 -> -3.0)
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formate un nombre pour l'affichage
///
/// - Entier fini (< 1e16) : une décimale, ex: 10 -> "10.0"
/// - Sinon : représentation la plus courte, ex: 0.1 -> "0.1", 1234.57 -> "1234.57"
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> ConversionRecord {
        let timestamp = Local.with_ymd_and_hms(2026, 10, 17, 14, 3, 59).unwrap();
        ConversionRecord::new(timestamp, 10.0, "USD".to_string(), "EUR".to_string(), 0.9, 9.0)
    }

    #[test]
    fn test_summary() {
        assert_eq!(sample_record().summary(), "10.0 USD = 9.0 EUR");
    }

    #[test]
    fn test_history_line() {
        assert_eq!(
            sample_record().history_line(),
            "[2026-10-17 14:03:59] 10.0 USD = 9.0 EUR"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10.0");
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(-3.0), "-3.0");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(1234.57), "1234.57");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(9.000000000000002), 9.0);
        assert_eq!(round_to_cents(831.2), 831.2);
        assert_eq!(round_to_cents(1.234), 1.23);
        assert_eq!(round_to_cents(1.236), 1.24);
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
    }
}
