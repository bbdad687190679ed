//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the detection core and the outside world.
//! Adapters implement them; the orchestrator consumes them.
//!
//! ```text
//!            ┌──────────────────────────┐
//!            │       Orchestrator       │
//!            │   domain + detectors     │
//!            └──────────────────────────┘
//!               ▲                    │
//!               │                    ▼
//!        ┌─────────────┐      ┌─────────────┐
//!        │ PriceSource │      │  Recorder   │
//!        │  adapters   │      │  adapters   │
//!        └─────────────┘      └─────────────┘
//! ```

pub mod outbound;
