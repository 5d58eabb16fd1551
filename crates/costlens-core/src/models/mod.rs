//! Data models for CostLens

mod event;
mod filter;
mod metrics;

pub use event::*;
pub use filter::*;
pub use metrics::*;
