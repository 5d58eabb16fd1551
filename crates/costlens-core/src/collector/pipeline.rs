//! Ingestion pipeline for event records
//!
//! Raw records are validated, enriched with their group and checked against
//! the delivery funnel before anything downstream sees them. A single bad
//! timestamp fails the whole batch; nothing is dropped silently. Batch totals
//! of every counter must fit in a `u64`, which bounds every filtered sum too.

use tracing::{debug, warn};

use super::groups::GroupAssignment;
use crate::error::{Error, Result};
use crate::models::{EventRecord, RawEventRecord};

/// Pipeline configuration
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Campaign to group lookup applied to records without a group
    pub groups: GroupAssignment,
    /// Reject records whose funnel is not monotonic instead of warning
    pub strict_funnel: bool,
}

/// Outcome of a successful ingestion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records accepted
    pub records: usize,
    /// Records that received a group from the assignment table
    pub groups_assigned: usize,
    /// Records still without a group (reported as "Unknown")
    pub ungrouped: usize,
    /// Records violating `attempted >= delivered >= read >= responded`
    pub funnel_violations: usize,
}

/// Running batch sums of the counters the reducers add up
#[derive(Debug, Default)]
struct BatchTotals {
    tokens_used: u64,
    attempted: u64,
    delivered: u64,
    read: u64,
    responded: u64,
}

impl BatchTotals {
    fn add(&mut self, index: usize, event: &EventRecord) -> Result<()> {
        let fields = [
            ("tokensUsed", &mut self.tokens_used, event.tokens_used),
            ("attempted", &mut self.attempted, event.attempted),
            ("delivered", &mut self.delivered, event.delivered),
            ("read", &mut self.read, event.read),
            ("responded", &mut self.responded, event.responded),
        ];
        for (name, total, value) in fields {
            *total = total.checked_add(value).ok_or_else(|| {
                Error::validation(format!(
                    "record {index} (campaign {}) overflows the batch total of {name}",
                    event.campaign_id
                ))
            })?;
        }
        Ok(())
    }
}

/// Validates and enriches raw records
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Process a batch of raw records in order
    pub fn process(&self, raw: Vec<RawEventRecord>) -> Result<(Vec<EventRecord>, IngestReport)> {
        let mut report = IngestReport::default();
        let mut events = Vec::with_capacity(raw.len());
        let mut totals = BatchTotals::default();

        for (index, record) in raw.into_iter().enumerate() {
            let mut event = record.validate(index)?;
            totals.add(index, &event)?;

            if event.group.is_none() {
                self.config.groups.apply(&mut event);
                if event.group.is_some() {
                    report.groups_assigned += 1;
                } else {
                    report.ungrouped += 1;
                }
            }

            if !event.funnel_is_monotonic() {
                if self.config.strict_funnel {
                    return Err(Error::validation(format!(
                        "record {index} (campaign {}) has a non-monotonic funnel: \
                         attempted={} delivered={} read={} responded={}",
                        event.campaign_id, event.attempted, event.delivered, event.read, event.responded
                    )));
                }
                warn!(
                    index,
                    campaign_id = %event.campaign_id,
                    attempted = event.attempted,
                    delivered = event.delivered,
                    read = event.read,
                    responded = event.responded,
                    "Delivery funnel is not monotonic"
                );
                report.funnel_violations += 1;
            }

            events.push(event);
        }

        report.records = events.len();
        debug!(?report, "Processed event batch");
        Ok((events, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampaignType;
    use pretty_assertions::assert_eq;

    fn raw(campaign_id: &str, group: Option<&str>, timestamp: Option<&str>) -> RawEventRecord {
        RawEventRecord {
            campaign_id: campaign_id.to_string(),
            campaign_type: CampaignType::Automation,
            group: group.map(str::to_string),
            timestamp: timestamp.map(str::to_string),
            tokens_used: 100,
            attempted: 10,
            delivered: 9,
            read: 5,
            responded: 1,
        }
    }

    fn pipeline() -> Pipeline {
        let mut groups = GroupAssignment::new();
        groups.assign("CAMP-001", "CRM");
        Pipeline::new(PipelineConfig {
            groups,
            strict_funnel: false,
        })
    }

    #[test]
    fn test_assigns_groups_and_reports() {
        let batch = vec![
            raw("CAMP-001", None, Some("2024-06-01T10:00:00")),
            raw("CAMP-002", Some("DMS"), Some("2024-06-01T11:00:00")),
            raw("CAMP-003", None, Some("2024-06-02")),
        ];

        let (events, report) = pipeline().process(batch).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].group.as_deref(), Some("CRM"));
        assert_eq!(events[1].group.as_deref(), Some("DMS"));
        assert_eq!(events[2].group, None);
        assert_eq!(
            report,
            IngestReport {
                records: 3,
                groups_assigned: 1,
                ungrouped: 1,
                funnel_violations: 0,
            }
        );
    }

    #[test]
    fn test_bad_timestamp_fails_batch() {
        let batch = vec![
            raw("CAMP-001", None, Some("2024-06-01T10:00:00")),
            raw("CAMP-002", None, Some("31/12/2024")),
        ];
        let err = pipeline().process(batch).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { index: 1, .. }));
    }

    #[test]
    fn test_missing_timestamp_fails_batch() {
        let err = pipeline()
            .process(vec![raw("CAMP-001", None, None)])
            .unwrap_err();
        assert!(matches!(err, Error::MissingTimestamp { index: 0, .. }));
    }

    #[test]
    fn test_funnel_violation_is_counted_not_clipped() {
        let mut bad = raw("CAMP-001", None, Some("2024-06-01"));
        bad.responded = 50;

        let (events, report) = pipeline().process(vec![bad]).unwrap();
        assert_eq!(report.funnel_violations, 1);
        assert_eq!(events[0].responded, 50);
    }

    #[test]
    fn test_strict_funnel_rejects() {
        let mut bad = raw("CAMP-001", None, Some("2024-06-01"));
        bad.delivered = 11;

        let strict = Pipeline::new(PipelineConfig {
            groups: GroupAssignment::new(),
            strict_funnel: true,
        });
        let err = strict.process(vec![bad]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_batch_total_overflow_rejected() {
        let mut huge = raw("CAMP-001", None, Some("2024-06-01"));
        huge.tokens_used = u64::MAX;
        let one = raw("CAMP-002", None, Some("2024-06-02"));

        let err = pipeline().process(vec![huge, one]).unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("record 1")));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_batch_total_at_limit_accepted() {
        let mut first = raw("CAMP-001", None, Some("2024-06-01"));
        first.tokens_used = u64::MAX - 100;
        let second = raw("CAMP-002", None, Some("2024-06-02"));

        let (events, _) = pipeline().process(vec![first, second]).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let (events, report) = pipeline().process(Vec::new()).unwrap();
        assert!(events.is_empty());
        assert_eq!(report, IngestReport::default());
    }
}
