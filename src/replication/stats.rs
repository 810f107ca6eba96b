//! Statistics collected during a replication run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::replication::config::ReplicationConfig;

/// Per-destination counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationStats {
    pub root: PathBuf,
    pub extension: String,
    pub files_written: usize,
    pub bytes_written: u64,
}

/// Outcome of a replication run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicationReport {
    /// Source tree that was read
    pub source_root: PathBuf,
    /// Number of source files matching the suffix
    pub files_matched: usize,
    /// Number of output files written across all destinations
    pub files_written: usize,
    /// Total bytes written across all destinations
    pub bytes_copied: u64,
    /// Counters for each destination, in configuration order
    pub destinations: Vec<DestinationStats>,
    /// Wall time in milliseconds
    pub elapsed_ms: u64,
    /// Timestamp of when the run finished
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl ReplicationReport {
    /// Create an empty report for `config`
    pub fn new(config: &ReplicationConfig) -> Self {
        Self {
            source_root: config.source_root.clone(),
            files_matched: 0,
            files_written: 0,
            bytes_copied: 0,
            destinations: config
                .destinations
                .iter()
                .map(|d| DestinationStats {
                    root: d.root.clone(),
                    extension: d.extension.clone(),
                    files_written: 0,
                    bytes_written: 0,
                })
                .collect(),
            elapsed_ms: 0,
            completed_at: chrono::Utc::now(),
        }
    }

    pub fn record_match(&mut self) {
        self.files_matched += 1;
    }

    /// Record one output file written to the destination at `index`
    pub fn record_write(&mut self, index: usize, bytes: u64) {
        self.files_written += 1;
        self.bytes_copied += bytes;
        if let Some(stats) = self.destinations.get_mut(index) {
            stats.files_written += 1;
            stats.bytes_written += bytes;
        }
    }

    /// Stamp the elapsed time and completion timestamp
    pub fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = elapsed.as_millis() as u64;
        self.completed_at = chrono::Utc::now();
        self
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
