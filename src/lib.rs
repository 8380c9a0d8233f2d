//! ==============================================================================
//! lib.rs - sensor dashboard core
//! ==============================================================================
//!
//! purpose:
//!     simulated temperature sensor feeding a bounded history, with rolling
//!     statistics published to observers after every reading.
//!
//! architecture:
//!
//! ```text
//!     ┌──────────────────┐  record   ┌──────────────┐  watch   ┌────────────┐
//!     │ SimulationEngine │ ────────> │  StateStore  │ ───────> │ observers  │
//!     │  (2s tick loop)  │           │ history+stats│          │ (server.rs)│
//!     └────────▲─────────┘           └──────────────┘          └─────┬──────┘
//!              │                 start / stop / toggle               │
//!              └─────────────────────────────────────────────────────┘
//! ```
//!
//! ==============================================================================

pub mod config;
pub mod display;
pub mod domain;
pub mod engine;
pub mod history;
pub mod server;
pub mod source;
pub mod stats;
pub mod store;

pub use config::{ConfigError, DashboardConfig};
pub use domain::Reading;
pub use engine::SimulationEngine;
pub use history::{History, HISTORY_CAPACITY};
pub use source::{FixedSequence, TemperatureSource, UniformSource};
pub use stats::Statistics;
pub use store::{Snapshot, StateStore};
