//! Error types and handling infrastructure for rule tree replication and conversion

use std::io;
use std::path::PathBuf;

/// Errors raised while replicating a rule tree into its destinations
#[derive(Debug, thiserror::Error)]
pub enum ReplicationError {
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Source directory not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("Failed to reset destination {}: {source}", path.display())]
    Teardown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination root is not a directory: {}", path.display())]
    DestinationNotDirectory { path: PathBuf },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to enumerate {}: {source}", path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReplicationError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::SourceMissing { path } => format!(
                "Source directory {} does not exist (drop --strict-source to treat it as empty)",
                path.display()
            ),
            Self::DestinationNotDirectory { path } => format!(
                "Refusing to reset {}: it exists but is not a directory",
                path.display()
            ),
            _ => self.to_string(),
        }
    }
}

/// Errors raised while converting a single rule file for a platform
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("{} not found or unsupported type.", path.display())]
    NotFound { path: PathBuf },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not inside a {platform} directory", path.display())]
    OutsidePlatformRoot { path: PathBuf, platform: String },

    #[error("Invalid file name: {}", path.display())]
    InvalidFileName { path: PathBuf },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} files failed to convert")]
    Batch { failed: usize, total: usize },
}

impl RuleError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for replication operations
pub type ReplicationResult<T> = Result<T, ReplicationError>;

/// Result type for rule conversion operations
pub type RuleResult<T> = Result<T, RuleError>;
