//! Shared fixtures for engine tests

use crate::models::{parse_timestamp, CampaignType, EventRecord};

/// Event with a plausible funnel derived from `delivered`
pub fn event(
    campaign_id: &str,
    campaign_type: CampaignType,
    group: Option<&str>,
    timestamp: &str,
    tokens_used: u64,
    delivered: u64,
) -> EventRecord {
    EventRecord {
        campaign_id: campaign_id.to_string(),
        campaign_type,
        group: group.map(str::to_string),
        timestamp: parse_timestamp(timestamp).expect("fixture timestamp"),
        tokens_used,
        attempted: delivered + 1,
        delivered,
        read: delivered / 2,
        responded: delivered / 4,
    }
}
