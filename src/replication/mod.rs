//! Rule tree replication module
//!
//! This module contains the reset-then-repopulate engine, its configuration,
//! and the report produced by a run.

pub mod config;
pub mod engine;
pub mod stats;

pub use config::{Destination, MissingSourcePolicy, ReplicationConfig};
pub use engine::{replicate, ReplicationEngine, ReplicationObserver};
pub use stats::{DestinationStats, ReplicationReport};

/// Completion message printed after a successful run
pub const COMPLETION_MESSAGE: &str = "All Ruleset Processed!";
