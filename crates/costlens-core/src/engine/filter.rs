//! Filter predicate set

use tracing::debug;

use crate::models::{EventRecord, FilterState};

/// Keep the events that pass every active predicate, in input order
pub fn apply<'a>(events: &'a [EventRecord], state: &FilterState) -> Vec<&'a EventRecord> {
    let kept: Vec<&EventRecord> = events.iter().filter(|e| state.matches(e)).collect();
    debug!(total = events.len(), kept = kept.len(), "Applied filter");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::event;
    use crate::models::{CampaignType, DateRange, Selection};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sample() -> Vec<EventRecord> {
        vec![
            event("CAMP-001", CampaignType::Campaign, Some("CRM"), "2024-06-01T08:00:00", 10, 5),
            event("CAMP-002", CampaignType::Automation, Some("Digital Support"), "2024-06-02T09:00:00", 20, 8),
            event("CAMP-003", CampaignType::Automation, Some("DMS"), "2024-06-03T23:59:59", 30, 9),
            event("CAMP-001", CampaignType::Campaign, Some("CRM"), "2024-06-04T00:00:00", 40, 10),
            event("CAMP-009", CampaignType::Campaign, None, "2024-06-05T12:00:00", 50, 11),
        ]
    }

    fn ids(events: &[&EventRecord]) -> Vec<(String, u64)> {
        events
            .iter()
            .map(|e| (e.campaign_id.clone(), e.tokens_used))
            .collect()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_all_passes_everything() {
        let events = sample();
        let kept = apply(&events, &FilterState::all());
        assert_eq!(kept.len(), events.len());
    }

    #[test]
    fn test_empty_input() {
        let kept = apply(&[], &FilterState::all().with_group("CRM"));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_campaign_filter() {
        let events = sample();
        let kept = apply(&events, &FilterState::all().with_campaign("CAMP-001"));
        assert_eq!(
            ids(&kept),
            vec![("CAMP-001".to_string(), 10), ("CAMP-001".to_string(), 40)]
        );
    }

    #[test]
    fn test_campaign_type_filter() {
        let events = sample();
        let kept = apply(
            &events,
            &FilterState::all().with_campaign_type(CampaignType::Automation),
        );
        assert_eq!(
            ids(&kept),
            vec![("CAMP-002".to_string(), 20), ("CAMP-003".to_string(), 30)]
        );
    }

    #[test]
    fn test_unknown_group_is_selectable() {
        let events = sample();
        let kept = apply(&events, &FilterState::all().with_group("Unknown"));
        assert_eq!(ids(&kept), vec![("CAMP-009".to_string(), 50)]);
    }

    #[test]
    fn test_date_range_includes_whole_end_day() {
        let events = sample();
        let range = DateRange::new(Some(day(3)), Some(day(3))).unwrap();
        let kept = apply(&events, &FilterState::all().with_date_range(range));
        // 23:59:59 on the end day still counts
        assert_eq!(ids(&kept), vec![("CAMP-003".to_string(), 30)]);
    }

    #[test]
    fn test_predicates_are_anded() {
        let events = sample();
        let range = DateRange::new(Some(day(2)), None).unwrap();
        let state = FilterState::all()
            .with_campaign_type(CampaignType::Campaign)
            .with_group("CRM")
            .with_date_range(range);
        let kept = apply(&events, &state);
        assert_eq!(ids(&kept), vec![("CAMP-001".to_string(), 40)]);
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        let campaign = prop_oneof![
            Just(Selection::All),
            Just(Selection::Only("CAMP-001".to_string())),
            Just(Selection::Only("CAMP-003".to_string())),
        ];
        let campaign_type = prop_oneof![
            Just(Selection::All),
            Just(Selection::Only(CampaignType::Automation)),
            Just(Selection::Only(CampaignType::Campaign)),
        ];
        let group = prop_oneof![
            Just(Selection::All),
            Just(Selection::Only("CRM".to_string())),
            Just(Selection::Only("Unknown".to_string())),
        ];
        let bounds = (proptest::option::of(1u32..=6), proptest::option::of(1u32..=6));
        (campaign, campaign_type, group, bounds).prop_map(|(campaign, campaign_type, group, (a, b))| {
            let (from, to) = match (a, b) {
                (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
                other => other,
            };
            FilterState {
                campaign,
                campaign_type,
                group,
                date_range: DateRange::new(from.map(day), to.map(day)).unwrap(),
            }
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_ordered_subset(state in arb_state()) {
            let events = sample();
            let kept = apply(&events, &state);

            // every kept event matches and appears in original relative order
            let mut cursor = 0;
            for e in &kept {
                prop_assert!(state.matches(e));
                let pos = events[cursor..]
                    .iter()
                    .position(|orig| std::ptr::eq(orig, *e))
                    .map(|p| p + cursor);
                prop_assert!(pos.is_some());
                cursor = pos.unwrap() + 1;
            }

            // nothing that matches was dropped
            let expected = events.iter().filter(|e| state.matches(e)).count();
            prop_assert_eq!(kept.len(), expected);
        }
    }
}
