//! Database model types for Diesel ORM.
//!
//! Decimals are stored as text so recorded prices round-trip exactly, and
//! timestamps as RFC 3339 strings.

use diesel::prelude::*;

use super::schema::{arbitrage_records, price_records, triangular_arbitrage_records};
use crate::domain::{PairwiseArbitrageEvent, PriceSnapshot, TriangularArbitrageEvent};

/// Database row for a price snapshot.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = price_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceRecordRow {
    pub uuid: String,
    pub timestamp: String,
    pub currency: String,
    pub price: String,
    pub fee: String,
    pub exchange: String,
    pub arbitrage_record_uuid: Option<String>,
    pub is_arbitrage_opportunity: bool,
}

impl From<&PriceSnapshot> for PriceRecordRow {
    fn from(snapshot: &PriceSnapshot) -> Self {
        Self {
            uuid: snapshot.id().to_string(),
            timestamp: snapshot.timestamp().to_rfc3339(),
            currency: snapshot.pair().to_string(),
            price: snapshot.price().to_string(),
            fee: snapshot.fee().to_string(),
            exchange: snapshot.exchange().to_string(),
            arbitrage_record_uuid: snapshot.arbitrage_event().map(|id| id.to_string()),
            is_arbitrage_opportunity: snapshot.is_opportunity(),
        }
    }
}

/// Database row for a pairwise arbitrage event.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = arbitrage_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArbitrageRecordRow {
    pub uuid: String,
    pub timestamp: String,
    pub currency: String,
    pub price_a: String,
    pub exchange_a: String,
    pub price_b: String,
    pub exchange_b: String,
    pub projected_profit: String,
    pub is_arbitrage_opportunity: bool,
}

impl From<&PairwiseArbitrageEvent> for ArbitrageRecordRow {
    fn from(event: &PairwiseArbitrageEvent) -> Self {
        Self {
            uuid: event.id().to_string(),
            timestamp: event.timestamp().to_rfc3339(),
            currency: event.pair().to_string(),
            price_a: event.leg_a().price().to_string(),
            exchange_a: event.leg_a().exchange().to_string(),
            price_b: event.leg_b().price().to_string(),
            exchange_b: event.leg_b().exchange().to_string(),
            projected_profit: event.projected_profit().to_string(),
            is_arbitrage_opportunity: event.is_opportunity(),
        }
    }
}

/// Database row for a triangular evaluation.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = triangular_arbitrage_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TriangularRecordRow {
    pub uuid: String,
    pub timestamp: String,
    pub exchange: String,
    pub trade_pair_1: String,
    pub trade_pair_1_exchange_rate: String,
    pub trade_pair_2: String,
    pub trade_pair_2_exchange_rate: String,
    pub trade_pair_3: String,
    pub trade_pair_3_exchange_rate: String,
    pub cross_exchange_rate: String,
    pub fee: String,
    pub cross_exchange_rate_difference: String,
    pub is_triangular_arbitrage_opportunity: bool,
}

impl From<&TriangularArbitrageEvent> for TriangularRecordRow {
    fn from(event: &TriangularArbitrageEvent) -> Self {
        Self {
            uuid: event.id().to_string(),
            timestamp: event.timestamp().to_rfc3339(),
            exchange: event.exchange().to_string(),
            trade_pair_1: event.direct().pair.to_string(),
            trade_pair_1_exchange_rate: event.direct().rate.to_string(),
            trade_pair_2: event.inverted().pair.to_string(),
            trade_pair_2_exchange_rate: event.inverted().rate.to_string(),
            trade_pair_3: event.bridge().pair.to_string(),
            trade_pair_3_exchange_rate: event.bridge().rate.to_string(),
            cross_exchange_rate: event.cross_rate().to_string(),
            fee: event.fee().to_string(),
            cross_exchange_rate_difference: event.cross_rate_difference().to_string(),
            is_triangular_arbitrage_opportunity: event.is_opportunity(),
        }
    }
}
