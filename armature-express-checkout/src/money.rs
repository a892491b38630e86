//! Currency codes and amount formatting

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency codes accepted by the Express Checkout API (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    AUD,
    BRL,
    CAD,
    CHF,
    CZK,
    DKK,
    EUR,
    GBP,
    HKD,
    HUF,
    ILS,
    JPY,
    MXN,
    MYR,
    NOK,
    NZD,
    PHP,
    PLN,
    SEK,
    SGD,
    THB,
    TWD,
    USD,
}

impl Currency {
    /// Get currency code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::AUD => "AUD",
            Self::BRL => "BRL",
            Self::CAD => "CAD",
            Self::CHF => "CHF",
            Self::CZK => "CZK",
            Self::DKK => "DKK",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::HKD => "HKD",
            Self::HUF => "HUF",
            Self::ILS => "ILS",
            Self::JPY => "JPY",
            Self::MXN => "MXN",
            Self::MYR => "MYR",
            Self::NOK => "NOK",
            Self::NZD => "NZD",
            Self::PHP => "PHP",
            Self::PLN => "PLN",
            Self::SEK => "SEK",
            Self::SGD => "SGD",
            Self::THB => "THB",
            Self::TWD => "TWD",
            Self::USD => "USD",
        }
    }

    /// Parse from string
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "AUD" => Some(Self::AUD),
            "BRL" => Some(Self::BRL),
            "CAD" => Some(Self::CAD),
            "CHF" => Some(Self::CHF),
            "CZK" => Some(Self::CZK),
            "DKK" => Some(Self::DKK),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            "HKD" => Some(Self::HKD),
            "HUF" => Some(Self::HUF),
            "ILS" => Some(Self::ILS),
            "JPY" => Some(Self::JPY),
            "MXN" => Some(Self::MXN),
            "MYR" => Some(Self::MYR),
            "NOK" => Some(Self::NOK),
            "NZD" => Some(Self::NZD),
            "PHP" => Some(Self::PHP),
            "PLN" => Some(Self::PLN),
            "SEK" => Some(Self::SEK),
            "SGD" => Some(Self::SGD),
            "THB" => Some(Self::THB),
            "TWD" => Some(Self::TWD),
            "USD" => Some(Self::USD),
            _ => None,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::EUR
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Render an amount the way the NVP `AMT` field expects it.
///
/// Always two decimal places, half away from zero, no grouping separator.
/// Zero-decimal currencies (JPY, HUF, TWD) get the same treatment.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_and_fractional() {
        assert_eq!(format_amount(Decimal::from(10)), "10.00");
        assert_eq!(format_amount(Decimal::new(105, 1)), "10.50");
        assert_eq!(format_amount(Decimal::new(2999, 2)), "29.99");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_amount(Decimal::new(10005, 3)), "10.01");
        assert_eq!(format_amount(Decimal::new(10004, 3)), "10.00");
        assert_eq!(format_amount(Decimal::new(-10005, 3)), "-10.01");
    }

    #[test]
    fn test_format_has_no_grouping() {
        assert_eq!(format_amount(Decimal::from(1_234_567)), "1234567.00");
    }

    #[test]
    fn test_format_ignores_currency_exponent() {
        // JPY has no minor unit, the field is still rendered with two places
        assert_eq!(format_amount(Decimal::from(500)), "500.00");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code(" USD "), Some(Currency::USD));
        assert_eq!(Currency::from_code("XXX"), None);
        assert_eq!(Currency::default(), Currency::EUR);
        assert_eq!(Currency::GBP.to_string(), "GBP");
    }
}
