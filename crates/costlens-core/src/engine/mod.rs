//! Filtering and aggregation engine
//!
//! Takes an immutable event set plus a [`FilterState`](crate::models::FilterState)
//! snapshot and produces the KPI, time-series, group and rollup views. Nothing
//! here keeps state between calls; every change to the filter or the cost
//! model means a full recomputation.

pub mod aggregate;
pub mod catalog;
mod cost;
pub mod filter;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{by_day, by_group, by_group_and_campaign, summarize};
pub use catalog::{campaign_ids, group_labels};
pub use cost::CostModel;
pub use view::DashboardView;
