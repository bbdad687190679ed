//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`PriceSnapshot`] and the
//! canonical detection inputs so tests focus on assertions rather than
//! construction boilerplate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{CurrencyPair, ExchangeName, PriceSnapshot};

/// Create a [`PriceSnapshot`], panicking on invalid input.
pub fn snapshot(pair: &str, price: Decimal, fee: Decimal, exchange: &str) -> PriceSnapshot {
    PriceSnapshot::try_new(
        CurrencyPair::new(pair),
        price,
        fee,
        ExchangeName::new(exchange),
    )
    .expect("valid test snapshot")
}

/// BTCUSD on two exchanges: A at 25000 (fee .002) and B at 26000 (fee .004).
pub fn two_exchange_btc() -> Vec<PriceSnapshot> {
    vec![
        snapshot("BTCUSD", dec!(25000), dec!(0.002), "A"),
        snapshot("BTCUSD", dec!(26000), dec!(0.004), "B"),
    ]
}

/// BTCUSD on three exchanges, A, B and C.
pub fn three_exchange_btc() -> Vec<PriceSnapshot> {
    vec![
        snapshot("BTCUSD", dec!(23000), dec!(0.002), "A"),
        snapshot("BTCUSD", dec!(24500), dec!(0.004), "B"),
        snapshot("BTCUSD", dec!(23050), dec!(0.003), "C"),
    ]
}

/// The default ETHBTC / LTCETH / LTCBTC cycle on one exchange.
pub fn triangle(
    exchange: &str,
    fee: Decimal,
    ethbtc: Decimal,
    ltceth: Decimal,
    ltcbtc: Decimal,
) -> Vec<PriceSnapshot> {
    vec![
        snapshot("ETHBTC", ethbtc, fee, exchange),
        snapshot("LTCETH", ltceth, fee, exchange),
        snapshot("LTCBTC", ltcbtc, fee, exchange),
    ]
}
