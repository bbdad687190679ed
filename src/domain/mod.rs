//! Exchange-agnostic domain logic.
//!
//! Everything here is pure: detectors take snapshot slices and return
//! events without touching the network or storage.

mod aggregate;
pub mod error;
mod id;
mod opportunity;
mod pairwise;
mod snapshot;
mod triangular;

// Core domain types
pub use id::{CurrencyPair, EventId, ExchangeName, SnapshotId};
pub use opportunity::{PairLeg, PairwiseArbitrageEvent, TriangleLeg, TriangularArbitrageEvent};
pub use snapshot::PriceSnapshot;

// Aggregation and detectors
pub use aggregate::{aggregate, link_snapshots};
pub use pairwise::{detect_pairwise, detect_pairwise_at, projected_profit};
pub use triangular::{detect_triangular, detect_triangular_at, TriangularCycle};

pub use error::{DetectionError, DomainError};
