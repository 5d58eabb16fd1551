//! Combined dashboard view over one filtered snapshot

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate;
use super::cost::CostModel;
use super::filter;
use crate::models::{DailyCost, EventRecord, FilterState, GroupCost, KpiSummary, RollupRow};

/// Every aggregate the dashboard shows, computed from the same filtered set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Filter the view was computed with
    pub filter: FilterState,

    /// Number of events that passed the filter
    pub event_count: usize,

    /// Display currency
    pub currency: String,

    /// Scalar KPIs
    pub summary: KpiSummary,

    /// Cost over time
    pub daily: Vec<DailyCost>,

    /// Cost by group
    pub groups: Vec<GroupCost>,

    /// Cost by group and campaign
    pub rollup: Vec<RollupRow>,
}

impl DashboardView {
    /// Filter once, then run every reducer over the result
    pub fn compute(events: &[EventRecord], state: &FilterState, cost: &CostModel) -> Self {
        let filtered = filter::apply(events, state);

        let summary = aggregate::summarize(filtered.iter().copied(), cost);
        let daily = aggregate::by_day(filtered.iter().copied(), cost);
        let groups = aggregate::by_group(filtered.iter().copied(), cost);
        let rollup = aggregate::by_group_and_campaign(filtered.iter().copied(), cost);

        debug!(
            events = filtered.len(),
            days = daily.len(),
            groups = groups.len(),
            rows = rollup.len(),
            "Computed dashboard view"
        );

        Self {
            filter: state.clone(),
            event_count: filtered.len(),
            currency: cost.currency().to_string(),
            summary,
            daily,
            groups,
            rollup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::event;
    use crate::models::CampaignType;

    #[test]
    fn test_view_on_empty_selection() {
        let events = vec![event("C1", CampaignType::Campaign, Some("A"), "2024-06-01T10:00:00", 10, 5)];
        let cost = CostModel::new(15.0, "IDR").unwrap();
        let view = DashboardView::compute(&events, &FilterState::all().with_group("Nobody"), &cost);

        assert_eq!(view.event_count, 0);
        assert_eq!(view.summary, KpiSummary::default());
        assert!(view.daily.is_empty());
        assert!(view.groups.is_empty());
        assert!(view.rollup.is_empty());
    }

    #[test]
    fn test_view_parts_are_consistent() {
        let events = vec![
            event("CAMP-001", CampaignType::Campaign, Some("CRM"), "2024-06-01T10:00:00", 10, 5),
            event("CAMP-002", CampaignType::Automation, Some("DMS"), "2024-06-02T10:00:00", 20, 9),
            event("CAMP-004", CampaignType::Campaign, Some("CRM"), "2024-06-02T11:00:00", 7, 3),
        ];
        let cost = CostModel::new(15.0, "IDR").unwrap();
        let view = DashboardView::compute(&events, &FilterState::all(), &cost);

        assert_eq!(view.event_count, 3);
        assert_eq!(view.currency, "IDR");
        assert_eq!(view.summary.total_cost, 555.0);
        assert_eq!(view.daily.iter().map(|d| d.cost).sum::<f64>(), 555.0);
        assert_eq!(view.groups.iter().map(|g| g.cost).sum::<f64>(), 555.0);
        assert_eq!(view.rollup.iter().map(|r| r.cost).sum::<f64>(), 555.0);
        assert_eq!(view.groups[0].group, "DMS");
    }

    #[test]
    fn test_view_serializes_days_as_dates() {
        let events = vec![event("C1", CampaignType::Campaign, None, "2024-06-01T10:00:00", 1, 1)];
        let cost = CostModel::new(15.0, "IDR").unwrap();
        let view = DashboardView::compute(&events, &FilterState::all(), &cost);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["daily"][0]["day"], "2024-06-01");
        assert_eq!(json["groups"][0]["group"], "Unknown");
    }
}
