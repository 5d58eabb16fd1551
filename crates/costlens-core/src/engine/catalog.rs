//! Distinct values for filter pickers

use std::collections::BTreeSet;

use crate::models::EventRecord;

/// Distinct campaign ids, ascending
pub fn campaign_ids(events: &[EventRecord]) -> Vec<String> {
    events
        .iter()
        .map(|e| e.campaign_id.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct group labels after the "Unknown" fallback, ascending
pub fn group_labels(events: &[EventRecord]) -> Vec<String> {
    events
        .iter()
        .map(EventRecord::group_label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
