//! Collector module - event ingestion
//!
//! The collector reads raw event records from JSON, runs them through the
//! validation [`Pipeline`] and hands back an immutable event set.

mod groups;
mod pipeline;

pub use groups::GroupAssignment;
pub use pipeline::{IngestReport, Pipeline, PipelineConfig};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::{EventRecord, RawEventRecord};

/// Loads event records from JSON sources
#[derive(Debug, Clone, Default)]
pub struct Collector {
    pipeline: Pipeline,
}

impl Collector {
    /// Create a collector around a pipeline
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Create a collector from the group and data sections of the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(Pipeline::new(PipelineConfig {
            groups: GroupAssignment::from_config(&config.groups),
            strict_funnel: config.data.strict_funnel,
        }))
    }

    /// Load a JSON array of event records from a file
    pub fn load_file(&self, path: &Path) -> Result<(Vec<EventRecord>, IngestReport)> {
        let file = File::open(path)?;
        let (events, report) = self.load_reader(BufReader::new(file))?;

        info!(
            path = %path.display(),
            records = report.records,
            ungrouped = report.ungrouped,
            funnel_violations = report.funnel_violations,
            "Loaded events"
        );

        Ok((events, report))
    }

    /// Load a JSON array of event records from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<(Vec<EventRecord>, IngestReport)> {
        let raw: Vec<RawEventRecord> = serde_json::from_reader(reader)?;
        self.pipeline.process(raw)
    }

    /// Load a JSON array of event records from a string
    pub fn load_str(&self, json: &str) -> Result<(Vec<EventRecord>, IngestReport)> {
        let raw: Vec<RawEventRecord> = serde_json::from_str(json)?;
        self.pipeline.process(raw)
    }
}
