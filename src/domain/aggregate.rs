//! Flattening per-exchange snapshot lists into one working set.

use tracing::debug;

use super::{EventId, PairwiseArbitrageEvent, PriceSnapshot};

/// Concatenate per-exchange snapshot lists in the order given.
///
/// A `None` entry stands for an adapter that produced nothing and simply
/// contributes no elements. Each list keeps its internal order; nothing is
/// deduplicated or grouped here.
pub fn aggregate<I>(lists: I) -> Vec<PriceSnapshot>
where
    I: IntoIterator<Item = Option<Vec<PriceSnapshot>>>,
{
    let snapshots: Vec<PriceSnapshot> = lists.into_iter().flatten().flatten().collect();
    debug!(total = snapshots.len(), "Aggregated price snapshots");
    snapshots
}

/// Mark snapshots that were legs of a pairwise opportunity.
///
/// Returns a new list in input order. A snapshot that took part in several
/// opportunities is linked to the one with the highest projected profit.
/// Snapshots that took part in none are returned unchanged.
#[must_use]
pub fn link_snapshots(
    snapshots: &[PriceSnapshot],
    events: &[PairwiseArbitrageEvent],
) -> Vec<PriceSnapshot> {
    snapshots
        .iter()
        .map(|snapshot| {
            best_opportunity_for(snapshot, events)
                .map_or_else(|| snapshot.clone(), |event| snapshot.linked_to(event))
        })
        .collect()
}

fn best_opportunity_for(
    snapshot: &PriceSnapshot,
    events: &[PairwiseArbitrageEvent],
) -> Option<EventId> {
    events
        .iter()
        .filter(|event| event.is_opportunity() && event.involves(snapshot.id()))
        .max_by(|a, b| a.projected_profit().cmp(&b.projected_profit()))
        .map(PairwiseArbitrageEvent::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{detect_pairwise, CurrencyPair, ExchangeName};
    use rust_decimal::Decimal;
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

    #[test]
    fn aggregate_preserves_exchange_then_list_order() {
        let a = vec![
            snap("ETHUSD", dec!(1800), dec!(0.006), "A"),
            snap("BTCUSD", dec!(25000), dec!(0.006), "A"),
        ];
        let b = vec![snap("BTCUSD", dec!(25100), dec!(0.004), "B")];

        let result = aggregate(vec![Some(a.clone()), Some(b.clone())]);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].id(), a[0].id());
        assert_eq!(result[1].id(), a[1].id());
        assert_eq!(result[2].id(), b[0].id());
    }

    #[test]
    fn aggregate_tolerates_missing_and_empty_lists() {
        let b = vec![snap("BTCUSD", dec!(25100), dec!(0.004), "B")];

        let result = aggregate(vec![None, Some(Vec::new()), Some(b.clone()), None]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), b[0].id());
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        assert!(aggregate(Vec::new()).is_empty());
    }

    #[test]
    fn aggregate_keeps_duplicates() {
        let s = snap("BTCUSD", dec!(25000), dec!(0.002), "A");
        let result = aggregate(vec![Some(vec![s.clone()]), Some(vec![s.clone()])]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn link_snapshots_marks_opportunity_legs_only() {
        let snapshots = vec![
            snap("BTCUSD", dec!(25000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(26000), dec!(0.004), "B"),
            snap("ETHUSD", dec!(1800), dec!(0.002), "A"),
        ];
        let events = detect_pairwise(&snapshots);
        assert_eq!(events.len(), 1);

        let linked = link_snapshots(&snapshots, &events);

        assert_eq!(linked[0].arbitrage_event(), Some(events[0].id()));
        assert_eq!(linked[1].arbitrage_event(), Some(events[0].id()));
        assert!(linked[0].is_opportunity());
        assert!(!linked[2].is_opportunity());
        assert!(linked[2].arbitrage_event().is_none());
    }

    #[test]
    fn link_snapshots_ignores_unprofitable_events() {
        let snapshots = vec![
            snap("BTCUSD", dec!(23000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(23050), dec!(0.003), "C"),
        ];
        let events = detect_pairwise(&snapshots);
        assert!(!events[0].is_opportunity());

        let linked = link_snapshots(&snapshots, &events);

        assert!(linked.iter().all(|s| !s.is_opportunity()));
    }

    #[test]
    fn link_snapshots_prefers_most_profitable_event() {
        let snapshots = vec![
            snap("BTCUSD", dec!(23000), dec!(0.002), "A"),
            snap("BTCUSD", dec!(24500), dec!(0.004), "B"),
            snap("BTCUSD", dec!(23050), dec!(0.003), "C"),
        ];
        let events = detect_pairwise(&snapshots);
        let linked = link_snapshots(&snapshots, &events);

        // B takes part in A-B (~5.71%) and B-C (~5.40%)
        assert_eq!(linked[1].arbitrage_event(), Some(events[0].id()));
        // C only in the profitable B-C event
        assert_eq!(linked[2].arbitrage_event(), Some(events[2].id()));
    }
}
