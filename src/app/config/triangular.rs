//! Triangular detection configuration.

use serde::Deserialize;

use super::Exchange;
use crate::domain::{CurrencyPair, TriangularCycle};

/// Where and on which symbols triangular detection runs.
#[derive(Debug, Clone, Deserialize)]
pub struct TriangularConfig {
    /// Exchanges whose snapshot sets are checked for a cycle (default: gemini).
    #[serde(default = "default_exchanges")]
    pub exchanges: Vec<Exchange>,
    /// Leg 1, the direct rate (default: ETHBTC).
    #[serde(default = "default_direct")]
    pub direct: CurrencyPair,
    /// Leg 2, used inverted (default: LTCETH).
    #[serde(default = "default_inverted")]
    pub inverted: CurrencyPair,
    /// Leg 3 (default: LTCBTC).
    #[serde(default = "default_bridge")]
    pub bridge: CurrencyPair,
}

fn default_exchanges() -> Vec<Exchange> {
    vec![Exchange::Gemini]
}

fn default_direct() -> CurrencyPair {
    TriangularCycle::default().direct
}

fn default_inverted() -> CurrencyPair {
    TriangularCycle::default().inverted
}

fn default_bridge() -> CurrencyPair {
    TriangularCycle::default().bridge
}

impl TriangularConfig {
    #[must_use]
    pub fn cycle(&self) -> TriangularCycle {
        TriangularCycle {
            direct: self.direct.clone(),
            inverted: self.inverted.clone(),
            bridge: self.bridge.clone(),
        }
    }
}

impl Default for TriangularConfig {
    fn default() -> Self {
        Self {
            exchanges: default_exchanges(),
            direct: default_direct(),
            inverted: default_inverted(),
            bridge: default_bridge(),
        }
    }
}
