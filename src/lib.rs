//! Rule tree replicator
//!
//! A Rust CLI tool that mirrors a tree of Clash rule lists into per-platform
//! output trees, renaming each file's extension per destination, and converts
//! the mirrored files into Egern and sing-box rule sets.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod replication;

// Re-export commonly used types
pub use conversion::{convert_file, ConvertOptions, Platform};
pub use error::{ReplicationError, ReplicationResult, RuleError, RuleResult};
pub use parser::{parse_rules, RuleLine};
pub use replication::{
    replicate, Destination, MissingSourcePolicy, ReplicationConfig, ReplicationEngine,
    ReplicationReport,
};
