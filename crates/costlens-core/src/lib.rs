//! # CostLens
//!
//! Cost and delivery analytics for broadcast messaging campaigns.
//!
//! CostLens turns per-campaign delivery events into the numbers a cost
//! dashboard shows: headline KPIs, cost over time, cost by team and a
//! team × campaign breakdown, all driven by one shared filter.
//!
//! ## Architecture
//!
//! - **Collector**: loads and validates event records, assigns groups
//! - **Engine**: filter predicates and the aggregation reducers
//! - **API**: read-only REST API over a loaded event set
//! - **Report**: text table and JSON rendering for the CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Cost by team for June, Automation campaigns only
//! costlens costs --events data/events.json --campaign-type Automation \
//!     --from 2024-06-01 --to 2024-06-30 --group-by group
//!
//! # Serve the API
//! costlens serve --events data/events.json
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]

pub mod api;
pub mod collector;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::collector::{Collector, GroupAssignment};
    pub use crate::config::Config;
    pub use crate::engine::{CostModel, DashboardView};
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
}
