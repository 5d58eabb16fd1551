//! Campaign delivery event data model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Group label used when an event carries no group
pub const UNKNOWN_GROUP: &str = "Unknown";

/// How a campaign is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CampaignType {
    /// Triggered by a customer journey or system event
    Automation,
    /// Scheduled one-off broadcast
    Campaign,
}

impl CampaignType {
    /// Label as it appears in event data
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Automation => "Automation",
            Self::Campaign => "Campaign",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "automation" => Ok(Self::Automation),
            "campaign" => Ok(Self::Campaign),
            other => Err(Error::validation(format!("unknown campaign type: {other}"))),
        }
    }
}

/// One row of measured delivery activity for a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Campaign identifier (non-empty)
    pub campaign_id: String,

    /// Kind of campaign
    pub campaign_type: CampaignType,

    /// Owning group (team); absent until resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Local wall-clock time of the activity
    pub timestamp: NaiveDateTime,

    /// Tokens billed for the activity
    pub tokens_used: u64,

    /// Messages attempted
    pub attempted: u64,

    /// Messages delivered
    pub delivered: u64,

    /// Messages read
    pub read: u64,

    /// Messages responded to
    pub responded: u64,
}

impl EventRecord {
    /// Group label with the "Unknown" fallback applied
    pub fn group_label(&self) -> &str {
        self.group.as_deref().unwrap_or(UNKNOWN_GROUP)
    }

    /// Calendar day of the event
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Check `attempted >= delivered >= read >= responded`
    pub fn funnel_is_monotonic(&self) -> bool {
        self.attempted >= self.delivered
            && self.delivered >= self.read
            && self.read >= self.responded
    }
}

/// Event record as it arrives from a data source, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventRecord {
    /// Campaign identifier; must not be blank
    pub campaign_id: String,
    /// Automation or one-off campaign
    pub campaign_type: CampaignType,
    /// Group label, also accepted as `team`
    #[serde(default, alias = "team")]
    pub group: Option<String>,
    /// Unparsed timestamp text
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Billable tokens
    #[serde(default)]
    pub tokens_used: u64,
    /// Messages attempted
    #[serde(default)]
    pub attempted: u64,
    /// Messages delivered
    #[serde(default)]
    pub delivered: u64,
    /// Messages read
    #[serde(default)]
    pub read: u64,
    /// Messages replied to
    #[serde(default)]
    pub responded: u64,
}

impl RawEventRecord {
    /// Validate into an [`EventRecord`]; `index` is the record's position in its source
    pub fn validate(self, index: usize) -> Result<EventRecord> {
        if self.campaign_id.trim().is_empty() {
            return Err(Error::validation(format!(
                "record {index} has an empty campaignId"
            )));
        }

        let Some(raw_ts) = self.timestamp else {
            return Err(Error::MissingTimestamp {
                index,
                campaign_id: self.campaign_id,
            });
        };

        let Some(timestamp) = parse_timestamp(&raw_ts) else {
            return Err(Error::InvalidTimestamp {
                index,
                campaign_id: self.campaign_id,
                value: raw_ts,
            });
        };

        Ok(EventRecord {
            campaign_id: self.campaign_id,
            campaign_type: self.campaign_type,
            group: self.group.filter(|g| !g.trim().is_empty()),
            timestamp,
            tokens_used: self.tokens_used,
            attempted: self.attempted,
            delivered: self.delivered,
            read: self.read,
            responded: self.responded,
        })
    }
}

/// Parse an ISO-8601 style timestamp into local wall-clock time.
///
/// RFC 3339 values keep the wall-clock time in their own offset. Naive
/// date-times and bare dates (midnight) are taken as-is.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
