//! Cross-exchange (pairwise) arbitrage detection.
//!
//! Every unordered pair of snapshots that share a currency pair and come from
//! different exchanges becomes one [`PairwiseArbitrageEvent`]. The projected profit of buying on the cheaper
//! venue and selling on the other is
//!
//! ```text
//! profit% = (|pA - pB| - (pA*fA + pB*fB)) / ((pA + pB) / 2) * 100
//! ```
//!
//! and the event is an opportunity when that value is strictly positive.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::{PairwiseArbitrageEvent, PriceSnapshot};

/// Detect pairwise arbitrage across an aggregated snapshot set.
#[must_use]
pub fn detect_pairwise(snapshots: &[PriceSnapshot]) -> Vec<PairwiseArbitrageEvent> {
    detect_pairwise_at(snapshots, Utc::now())
}

/// Same as [`detect_pairwise`] with every event stamped at `timestamp`.
///
/// Snapshots are stably sorted by symbol, so equal symbols keep their
/// aggregation order and leg A is always the earlier one. For `k` snapshots
/// of one symbol from `k` distinct exchanges the output holds
/// `k * (k - 1) / 2` events for it. Two quotes from the same exchange are
/// never compared.
#[must_use]
pub fn detect_pairwise_at(
    snapshots: &[PriceSnapshot],
    timestamp: DateTime<Utc>,
) -> Vec<PairwiseArbitrageEvent> {
    let mut sorted: Vec<&PriceSnapshot> = snapshots.iter().collect();
    sorted.sort_by(|a, b| a.pair().cmp(b.pair()));

    let mut events = Vec::new();
    for (i, a) in sorted.iter().enumerate() {
        // Groups are contiguous after sorting, stop at the first other symbol.
        for b in sorted[i + 1..]
            .iter()
            .take_while(|b| b.pair() == a.pair())
        {
            if a.exchange() == b.exchange() {
                debug!(
                    pair = %a.pair(),
                    exchange = %a.exchange(),
                    "Skipping pair, both quotes from one exchange"
                );
                continue;
            }

            let Some(profit) = projected_profit(a, b) else {
                warn!(
                    pair = %a.pair(),
                    exchange_a = %a.exchange(),
                    exchange_b = %b.exchange(),
                    "Skipping pair, profit calculation overflowed"
                );
                continue;
            };

            let event = PairwiseArbitrageEvent::new(a, b, profit, timestamp);
            if event.is_opportunity() {
                info!(
                    pair = %event.pair(),
                    exchange_a = %a.exchange(),
                    exchange_b = %b.exchange(),
                    profit = %profit,
                    "Pairwise arbitrage opportunity"
                );
            } else {
                debug!(
                    pair = %event.pair(),
                    exchange_a = %a.exchange(),
                    exchange_b = %b.exchange(),
                    profit = %profit,
                    "Compared pair"
                );
            }
            events.push(event);
        }
    }

    debug!(
        snapshots = snapshots.len(),
        events = events.len(),
        "Pairwise detection complete"
    );
    events
}

/// Net percentage return of trading across two quotes after both fees.
///
/// Returns `None` only if the arithmetic overflows.
#[must_use]
pub fn projected_profit(a: &PriceSnapshot, b: &PriceSnapshot) -> Option<Decimal> {
    let (pa, pb) = (a.price(), b.price());

    let spread = pa.checked_sub(pb)?.abs();
    let fees = pa
        .checked_mul(a.fee())?
        .checked_add(pb.checked_mul(b.fee())?)?;
    let average = pa.checked_add(pb)?.checked_div(Decimal::TWO)?;

    spread
        .checked_sub(fees)?
        .checked_div(average)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurrencyPair, ExchangeName};
    use rust_decimal_macros::dec;

    fn snap(pair: &str, price: Decimal, fee: Decimal, exchange: &str) -> PriceSnapshot {
        PriceSnapshot::try_new(
            CurrencyPair::new(pair),
            price,
            fee,
            ExchangeName::new(exchange),
        )
        .unwrap()
    }

    fn assert_close(actual: Decimal, expected: Decimal) {
        assert!(
            (actual - expected).abs() < dec!(0.0000001),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn two_exchange_profit_matches_formula() {
        let snapshots = vec![
            snap("BTCUSD", dec!(25000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(26000), dec!(0.004), "B"),
        ];

        let events = detect_pairwise(&snapshots);

        assert_eq!(events.len(), 1);
        assert_close(events[0].projected_profit(), dec!(3.3176470588));
        assert!(events[0].is_opportunity());
        assert_eq!(events[0].leg_a().exchange().as_str(), "A");
        assert_eq!(events[0].leg_b().exchange().as_str(), "B");
    }

    #[test]
    fn profit_is_symmetric_in_price_order() {
        let cheap = snap("BTCUSD", dec!(25000), dec!(0.002), "A");
        let dear = snap("BTCUSD", dec!(26000), dec!(0.004), "B");

        let forward = projected_profit(&cheap, &dear).unwrap();
        let backward = projected_profit(&dear, &cheap).unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn three_exchanges_emit_events_in_aggregation_order() {
        let snapshots = vec![
            snap("BTCUSD", dec!(23000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(24500), dec!(0.004), "B"),
            snap("BTCUSD", dec!(23050), dec!(0.003), "C"),
        ];

        let events = detect_pairwise(&snapshots);

        assert_eq!(events.len(), 3);
        let legs: Vec<_> = events
            .iter()
            .map(|e| (e.leg_a().exchange().as_str(), e.leg_b().exchange().as_str()))
            .collect();
        assert_eq!(legs, vec![("A", "B"), ("A", "C"), ("B", "C")]);

        assert_close(events[0].projected_profit(), dec!(5.7094736842));
        assert!(events[0].is_opportunity());
        assert_close(events[1].projected_profit(), dec!(-0.2829533116));
        assert!(!events[1].is_opportunity());
        assert_close(events[2].projected_profit(), dec!(5.3957939012));
        assert!(events[2].is_opportunity());
    }

    #[test]
    fn different_symbols_are_never_compared() {
        let snapshots = vec![
            snap("BTCUSD", dec!(25000), dec!(0.002), "A"),
            snap("ETHUSD", dec!(1800), dec!(0.004), "B"),
            snap("LTCUSD", dec!(90), dec!(0.004), "C"),
        ];

        assert!(detect_pairwise(&snapshots).is_empty());
    }

    #[test]
    fn same_exchange_quotes_are_not_compared() {
        let snapshots = vec![
            snap("BTCUSD", dec!(25000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(26000), dec!(0.002), "A"),
        ];

        assert!(detect_pairwise(&snapshots).is_empty());
    }

    #[test]
    fn duplicate_exchange_still_pairs_with_others() {
        let snapshots = vec![
            snap("BTCUSD", dec!(25000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(25100), dec!(0.002), "A"),
            snap("BTCUSD", dec!(26000), dec!(0.004), "B"),
        ];

        let events = detect_pairwise(&snapshots);

        let legs: Vec<_> = events
            .iter()
            .map(|e| (e.leg_a().price(), e.leg_b().exchange().as_str()))
            .collect();
        assert_eq!(legs, vec![(dec!(25000), "B"), (dec!(25100), "B")]);
    }

    #[test]
    fn empty_input_yields_no_events() {
        assert!(detect_pairwise(&[]).is_empty());
    }

    #[test]
    fn interleaved_symbols_are_grouped_by_sort() {
        let snapshots = vec![
            snap("ETHUSD", dec!(1800), dec!(0.006), "Coinbase"),
            snap("BTCUSD", dec!(25000), dec!(0.006), "Coinbase"),
            snap("ETHUSD", dec!(1810), dec!(0.004), "Gemini"),
            snap("BTCUSD", dec!(25050), dec!(0.004), "Gemini"),
            snap("ETHUSD", dec!(1805), dec!(0.0026), "Kraken"),
        ];

        let events = detect_pairwise(&snapshots);

        // C(2,2) for BTCUSD + C(3,2) for ETHUSD
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].pair().as_str(), "BTCUSD");
        assert!(events[1..].iter().all(|e| e.pair().as_str() == "ETHUSD"));
        assert_eq!(events[1].leg_a().exchange().as_str(), "Coinbase");
        assert_eq!(events[1].leg_b().exchange().as_str(), "Gemini");
        assert_eq!(events[3].leg_a().exchange().as_str(), "Gemini");
        assert_eq!(events[3].leg_b().exchange().as_str(), "Kraken");
    }

    #[test]
    fn zero_profit_is_not_an_opportunity() {
        // spread 200, fees 90 + 110
        let fee_bound = vec![
            snap("BTCUSD", dec!(900), dec!(0.1), "A"),
            snap("BTCUSD", dec!(1100), dec!(0.1), "B"),
        ];
        let events = detect_pairwise(&fee_bound);
        assert_eq!(events[0].projected_profit(), Decimal::ZERO);
        assert!(!events[0].is_opportunity());

        let exact = vec![
            snap("BTCUSD", dec!(100), dec!(0), "A"),
            snap("BTCUSD", dec!(100), dec!(0), "B"),
        ];
        let events = detect_pairwise(&exact);
        assert_eq!(events[0].projected_profit(), Decimal::ZERO);
        assert!(!events[0].is_opportunity());
    }

    #[test]
    fn rerun_yields_identical_numbers() {
        let snapshots = vec![
            snap("BTCUSD", dec!(23000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(24500), dec!(0.004), "B"),
            snap("BTCUSD", dec!(23050), dec!(0.003), "C"),
        ];

        let first = detect_pairwise(&snapshots);
        let second = detect_pairwise(&snapshots);

        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(&second) {
            assert_ne!(x.id(), y.id());
            assert_eq!(x.projected_profit(), y.projected_profit());
            assert_eq!(x.is_opportunity(), y.is_opportunity());
            assert_eq!(x.leg_a(), y.leg_a());
            assert_eq!(x.leg_b(), y.leg_b());
        }
    }

    #[test]
    fn timestamp_is_applied_to_every_event() {
        let at = Utc::now() - chrono::Duration::seconds(30);
        let snapshots = vec![
            snap("BTCUSD", dec!(23000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(24500), dec!(0.004), "B"),
            snap("BTCUSD", dec!(23050), dec!(0.003), "C"),
        ];

        let events = detect_pairwise_at(&snapshots, at);

        assert!(events.iter().all(|e| e.timestamp() == at));
    }
}
