//! Filter state snapshot

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::{CampaignType, EventRecord};
use crate::error::{Error, Result};

/// Either every value of a dimension, or exactly one
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "value")]
pub enum Selection<T> {
    /// No restriction on this dimension
    #[default]
    All,
    /// Only events with this value pass
    Only(T),
}

impl<T> Selection<T> {
    /// Whether this selection restricts anything
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: PartialEq> Selection<T> {
    /// Check a value against the selection
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == value,
        }
    }
}

impl Selection<String> {
    /// Check a borrowed string against the selection
    pub fn admits_str(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == value,
        }
    }

    /// Parse a request value where `all` or blank means no restriction
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) if v.eq_ignore_ascii_case("all") => Self::All,
            Some(v) => Self::Only(v.to_string()),
        }
    }
}

impl Selection<CampaignType> {
    /// Parse a request value where `all` or blank means no restriction
    pub fn from_param(param: Option<&str>) -> Result<Self> {
        match param.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(v) if v.eq_ignore_ascii_case("all") => Ok(Self::All),
            Some(v) => Ok(Self::Only(v.parse()?)),
        }
    }
}

/// Inclusive calendar-day range; either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range, rejecting `from > to`
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(Error::validation(format!(
                    "date range start {f} is after end {t}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// The trailing window `[today - span, today]`, e.g. `"7d"`
    pub fn trailing(span: &str, today: NaiveDate) -> Result<Self> {
        let duration: Duration = humantime::parse_duration(span)
            .map_err(|e| Error::validation(format!("invalid time range {span:?}: {e}")))?;
        let days = i64::try_from(duration.as_secs() / 86_400)
            .map_err(|_| Error::validation(format!("time range {span:?} is too large")))?;
        let from = today
            .checked_sub_signed(chrono::Duration::days(days))
            .ok_or_else(|| Error::validation(format!("time range {span:?} is too large")))?;
        Self::new(Some(from), Some(today))
    }

    /// Lower bound
    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    /// Upper bound
    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    /// Whether a day falls inside the range
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from.map_or(true, |f| day >= f) && self.to.map_or(true, |t| day <= t)
    }
}

/// Immutable snapshot of every active filter for one query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Campaign identity
    pub campaign: Selection<String>,
    /// Campaign type
    pub campaign_type: Selection<CampaignType>,
    /// Group label, compared after the "Unknown" fallback
    pub group: Selection<String>,
    /// Calendar-day window
    pub date_range: DateRange,
}

impl FilterState {
    /// Filter that admits every event
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one campaign
    pub fn with_campaign(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign = Selection::Only(campaign_id.into());
        self
    }

    /// Restrict to one campaign type
    pub fn with_campaign_type(mut self, campaign_type: CampaignType) -> Self {
        self.campaign_type = Selection::Only(campaign_type);
        self
    }

    /// Restrict to one group
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Selection::Only(group.into());
        self
    }

    /// Restrict to a date window
    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Clicking the selected group clears the group filter; any other group selects it
    pub fn toggle_group(&self, group: &str) -> Self {
        let mut next = self.clone();
        next.group = if self.group.admits_str(group) && !self.group.is_all() {
            Selection::All
        } else {
            Selection::Only(group.to_string())
        };
        next
    }

    /// Whether an event passes every active predicate
    pub fn matches(&self, event: &EventRecord) -> bool {
        self.campaign.admits_str(&event.campaign_id)
            && self.campaign_type.admits(&event.campaign_type)
            && self.group.admits_str(event.group_label())
            && self.date_range.contains(event.day())
    }
}
