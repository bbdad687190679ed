//! Exchange selection and per-venue settings.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Supported exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Coinbase,
    Gemini,
    Kraken,
}

impl Exchange {
    pub const ALL: [Self; 3] = [Self::Coinbase, Self::Gemini, Self::Kraken];

    /// Display name as it appears on snapshots.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Coinbase => "Coinbase",
            Self::Gemini => "Gemini",
            Self::Kraken => "Kraken",
        }
    }

    /// Published taker fee for the lowest volume tier.
    #[must_use]
    pub fn default_taker_fee(self) -> Decimal {
        match self {
            Self::Coinbase => dec!(0.006),
            Self::Gemini => dec!(0.004),
            Self::Kraken => dec!(0.0026),
        }
    }

    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Coinbase => "https://api.exchange.coinbase.com",
            Self::Gemini => "https://api.gemini.com",
            Self::Kraken => "https://api.kraken.com",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Overrides for one venue. Unset fields use the venue's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub taker_fee: Option<Decimal>,
}

/// Which exchanges to sample and how to reach them.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangesConfig {
    /// Adapters run in this order, which fixes aggregation order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<Exchange>,
    #[serde(default)]
    pub coinbase: VenueConfig,
    #[serde(default)]
    pub gemini: VenueConfig,
    #[serde(default)]
    pub kraken: VenueConfig,
}

fn default_enabled() -> Vec<Exchange> {
    Exchange::ALL.to_vec()
}

impl ExchangesConfig {
    #[must_use]
    pub const fn venue(&self, exchange: Exchange) -> &VenueConfig {
        match exchange {
            Exchange::Coinbase => &self.coinbase,
            Exchange::Gemini => &self.gemini,
            Exchange::Kraken => &self.kraken,
        }
    }

    /// Effective base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self, exchange: Exchange) -> String {
        self.venue(exchange)
            .base_url
            .as_deref()
            .unwrap_or(exchange.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    #[must_use]
    pub fn taker_fee(&self, exchange: Exchange) -> Decimal {
        self.venue(exchange)
            .taker_fee
            .unwrap_or_else(|| exchange.default_taker_fee())
    }
}

impl Default for ExchangesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            coinbase: VenueConfig::default(),
            gemini: VenueConfig::default(),
            kraken: VenueConfig::default(),
        }
    }
}
