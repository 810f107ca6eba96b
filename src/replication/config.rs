//! Configuration options for rule tree replication

use std::path::{Path, PathBuf};

/// Default source tree, relative to the working directory
pub const DEFAULT_SOURCE_ROOT: &str = "ios_rule_script/rule/Clash";
/// Default rule list suffix
pub const DEFAULT_MATCH_SUFFIX: &str = ".list";

/// One output tree and the extension its files receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Root directory, deleted and recreated on every run
    pub root: PathBuf,
    /// Extension replacing the match suffix, including the leading dot
    pub extension: String,
}

impl Destination {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Parse a `DIR=EXT` pair. A missing leading dot on the extension is added.
    pub fn parse(s: &str) -> Result<Self, String> {
        let (root, extension) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("Invalid destination '{}'. Use DIR=EXT", s))?;
        if root.is_empty() {
            return Err(format!("Destination '{}' has an empty directory", s));
        }
        if extension.is_empty() {
            return Err(format!("Destination '{}' has an empty extension", s));
        }
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        Ok(Self::new(root, extension))
    }

    /// Output file name for a source file name ending in `suffix`
    pub fn file_name_for(&self, source_name: &str, suffix: &str) -> Option<String> {
        source_name
            .strip_suffix(suffix)
            .map(|stem| format!("{}{}", stem, self.extension))
    }
}

/// What to do when the source root does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSourcePolicy {
    /// Treat the tree as empty and succeed with zero files
    #[default]
    Empty,
    /// Fail the run
    Error,
}

/// Replication configuration options
#[derive(Debug, Clone)]
pub struct ReplicationConfig {
    /// Tree the rule lists are read from
    pub source_root: PathBuf,
    /// File name suffix selecting rule lists (case-sensitive)
    pub match_suffix: String,
    /// Output trees, processed in order
    pub destinations: Vec<Destination>,
    /// Behaviour for an absent source root
    pub missing_source: MissingSourcePolicy,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            match_suffix: DEFAULT_MATCH_SUFFIX.to_string(),
            destinations: vec![
                Destination::new("Egern", ".yaml"),
                Destination::new("Singbox", ".json"),
            ],
            missing_source: MissingSourcePolicy::Empty,
        }
    }
}

impl ReplicationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source root
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Set the match suffix
    pub fn with_match_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.match_suffix = suffix.into();
        self
    }

    /// Replace the destination list
    pub fn with_destinations(mut self, destinations: Vec<Destination>) -> Self {
        self.destinations = destinations;
        self
    }

    /// Append a destination
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Set the missing source policy
    pub fn with_missing_source(mut self, policy: MissingSourcePolicy) -> Self {
        self.missing_source = policy;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.match_suffix.is_empty() {
            return Err("Match suffix must not be empty".to_string());
        }

        if self.destinations.is_empty() {
            return Err("At least one destination is required".to_string());
        }

        for (index, destination) in self.destinations.iter().enumerate() {
            let ext = &destination.extension;
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(format!(
                    "Extension '{}' for {} must start with '.' and name a type",
                    ext,
                    destination.root.display()
                ));
            }
            if ext.contains('/') || ext.contains('\\') {
                return Err(format!("Extension '{}' must not contain path separators", ext));
            }

            let root = normalize(&destination.root);
            let source = normalize(&self.source_root);
            if source.starts_with(&root) || root.starts_with(&source) {
                return Err(format!(
                    "Destination {} overlaps the source root {}",
                    destination.root.display(),
                    self.source_root.display()
                ));
            }

            for other in &self.destinations[..index] {
                let other_root = normalize(&other.root);
                if other_root == root {
                    return Err(format!(
                        "Destination {} is listed more than once",
                        destination.root.display()
                    ));
                }
                if other_root.starts_with(&root) || root.starts_with(&other_root) {
                    return Err(format!(
                        "Destination {} overlaps destination {}",
                        destination.root.display(),
                        other.root.display()
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Lexically normalize a path for overlap checks. Relative paths are resolved
/// against the working directory when it is available.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
