//! Reducers over a filtered event set
//!
//! Every reducer is a pure function of its inputs. Bucket cost is always
//! `units * cost_per_unit`, so all views price tokens identically.
//! Group-keyed outputs are ordered by descending cost; equal costs keep the
//! order in which the key was first seen.
//!
//! Counters saturate at `u64::MAX`. Ingested batches never get there since
//! the collector rejects batches whose totals overflow.

use std::collections::{BTreeMap, HashMap};

use super::cost::CostModel;
use crate::models::{DailyCost, EventRecord, GroupCost, KpiSummary, RollupRow};

/// Scalar KPIs
pub fn summarize<'a, I>(events: I, cost: &CostModel) -> KpiSummary
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let (total_units, total_delivered) = events
        .into_iter()
        .fold((0u64, 0u64), |(units, delivered), e| {
            (
                units.saturating_add(e.tokens_used),
                delivered.saturating_add(e.delivered),
            )
        });

    let total_cost = cost.cost_of(total_units);
    let avg_cost_per_delivered = if total_delivered > 0 {
        total_cost / total_delivered as f64
    } else {
        0.0
    };

    KpiSummary {
        total_units,
        total_cost,
        total_delivered,
        avg_cost_per_delivered,
    }
}

/// Per-day cost series, ascending by day, no gap filling
pub fn by_day<'a, I>(events: I, cost: &CostModel) -> Vec<DailyCost>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut days: BTreeMap<_, u64> = BTreeMap::new();
    for e in events {
        let units = days.entry(e.day()).or_default();
        *units = units.saturating_add(e.tokens_used);
    }

    days.into_iter()
        .map(|(day, units)| DailyCost {
            day,
            cost: cost.cost_of(units),
            units,
        })
        .collect()
}

/// Per-group cost, descending by cost
pub fn by_group<'a, I>(events: I, cost: &CostModel) -> Vec<GroupCost>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupCost> = Vec::new();

    for e in events {
        let label = e.group_label();
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push(GroupCost {
                group: label.to_string(),
                cost: 0.0,
                units: 0,
            });
            groups.len() - 1
        });
        let g = &mut groups[slot];
        g.units = g.units.saturating_add(e.tokens_used);
    }

    for g in &mut groups {
        g.cost = cost.cost_of(g.units);
    }
    groups.sort_by(|a, b| b.cost.total_cmp(&a.cost));
    groups
}

/// Per-(group, campaign) rollup, descending by cost
pub fn by_group_and_campaign<'a, I>(events: I, cost: &CostModel) -> Vec<RollupRow>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut rows: Vec<RollupRow> = Vec::new();

    for e in events {
        let key = (e.group_label(), e.campaign_id.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            rows.push(RollupRow {
                group: key.0.to_string(),
                campaign_id: key.1.to_string(),
                units: 0,
                cost: 0.0,
                attempted: 0,
                delivered: 0,
                read: 0,
                responded: 0,
            });
            rows.len() - 1
        });

        let row = &mut rows[slot];
        row.units = row.units.saturating_add(e.tokens_used);
        row.attempted = row.attempted.saturating_add(e.attempted);
        row.delivered = row.delivered.saturating_add(e.delivered);
        row.read = row.read.saturating_add(e.read);
        row.responded = row.responded.saturating_add(e.responded);
    }

    for r in &mut rows {
        r.cost = cost.cost_of(r.units);
    }
    rows.sort_by(|a, b| b.cost.total_cmp(&a.cost));
    rows
}
