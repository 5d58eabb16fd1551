//! Aggregated view models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scalar KPIs over a filtered set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of tokens used
    pub total_units: u64,

    /// `total_units * cost_per_unit`
    pub total_cost: f64,

    /// Sum of delivered messages
    pub total_delivered: u64,

    /// `total_cost / total_delivered`, or 0 when nothing was delivered
    pub avg_cost_per_delivered: f64,
}

/// Cost for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCost {
    /// Calendar day
    pub day: NaiveDate,

    /// Cost incurred on this day
    pub cost: f64,

    /// Tokens used on this day
    pub units: u64,
}

/// Cost for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCost {
    /// Group label ("Unknown" when absent)
    pub group: String,

    /// Cost attributed to the group
    pub cost: f64,

    /// Tokens used by the group
    pub units: u64,
}

/// Sums for one (group, campaign) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupRow {
    /// Group label ("Unknown" when absent)
    pub group: String,

    /// Campaign identifier
    pub campaign_id: String,

    /// Tokens used
    pub units: u64,

    /// Cost incurred
    pub cost: f64,

    /// Messages attempted
    pub attempted: u64,

    /// Messages delivered
    pub delivered: u64,

    /// Messages read
    pub read: u64,

    /// Messages responded to
    pub responded: u64,
}

