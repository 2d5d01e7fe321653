//! Fiat display quotes.
//!
//! Rates are the fixed table the app ships with. Quotes are display-only
//! and never feed a balance or dispatch decision.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WEI_PER_ETH;

/// A currency code outside the fixed rate table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported currency: {0}")]
pub struct UnknownCurrency(pub String);

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiatCurrency {
    /// United States dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// Japanese yen.
    Jpy,
}

impl FiatCurrency {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FiatCurrency::Usd => "USD",
            FiatCurrency::Eur => "EUR",
            FiatCurrency::Gbp => "GBP",
            FiatCurrency::Jpy => "JPY",
        }
    }

    /// Fixed exchange rate in fiat cents per whole ETH.
    pub fn rate_cents_per_eth(&self) -> u128 {
        match self {
            FiatCurrency::Usd => 310_000,
            FiatCurrency::Eur => 290_000,
            FiatCurrency::Gbp => 250_000,
            FiatCurrency::Jpy => 45_000_000,
        }
    }
}

impl std::fmt::Display for FiatCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FiatCurrency {
    type Err = UnknownCurrency;

    /// Parse an ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(FiatCurrency::Usd),
            "EUR" => Ok(FiatCurrency::Eur),
            "GBP" => Ok(FiatCurrency::Gbp),
            "JPY" => Ok(FiatCurrency::Jpy),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

/// Fiat value of `value_wei` in cents, rounded down.
pub fn fiat_value_cents(value_wei: u128, currency: FiatCurrency) -> u128 {
    // Multiply before dividing to keep sub-cent precision.
    value_wei.saturating_mul(currency.rate_cents_per_eth()) / WEI_PER_ETH
}

/// Format cents as a display amount with thousands separators ("3,100.00").
pub fn format_cents(cents: u128) -> String {
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}.{:02}", grouped, frac)
}
