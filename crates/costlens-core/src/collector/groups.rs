//! Campaign to group assignment

use std::collections::HashMap;

use crate::config::GroupsConfig;
use crate::models::EventRecord;

/// Lookup from campaign id to group label, with an optional fallback
#[derive(Debug, Clone, Default)]
pub struct GroupAssignment {
    mapping: HashMap<String, String>,
    fallback: Option<String>,
}

impl GroupAssignment {
    /// Empty assignment; every unassigned record stays without a group
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration
    pub fn from_config(config: &GroupsConfig) -> Self {
        let mut assignment = Self::new();
        for entry in &config.assignments {
            assignment.assign(entry.campaign.clone(), entry.group.clone());
        }
        assignment.fallback = config
            .fallback
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);
        assignment
    }

    /// Add or replace an assignment
    pub fn assign(&mut self, campaign_id: impl Into<String>, group: impl Into<String>) {
        self.mapping.insert(campaign_id.into(), group.into());
    }

    /// Set the group used for unassigned campaigns
    pub fn with_fallback(mut self, group: impl Into<String>) -> Self {
        self.fallback = Some(group.into());
        self
    }

    /// Group for a campaign, if it has one
    pub fn lookup(&self, campaign_id: &str) -> Option<&str> {
        self.mapping
            .get(campaign_id)
            .or(self.fallback.as_ref())
            .map(String::as_str)
    }

    /// Fill in the group of a record that does not carry one
    pub fn apply(&self, event: &mut EventRecord) {
        if event.group.is_none() {
            event.group = self.lookup(&event.campaign_id).map(str::to_string);
        }
    }
}
