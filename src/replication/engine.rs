//! Reset-then-repopulate engine for rule tree replication

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{ReplicationError, ReplicationResult};
use crate::parser::find_rule_files;
use crate::replication::config::{Destination, MissingSourcePolicy, ReplicationConfig};
use crate::replication::stats::ReplicationReport;

/// Hooks for reporting build progress. All methods default to no-ops.
pub trait ReplicationObserver {
    /// Called once after enumeration with the number of matched files
    fn files_found(&mut self, _count: usize) {}

    /// Called after a source file has been written to every destination
    fn file_replicated(&mut self, _relative: &Path) {}
}

impl ReplicationObserver for () {}

/// Replication engine bound to one configuration
#[derive(Debug)]
pub struct ReplicationEngine {
    config: ReplicationConfig,
}

impl ReplicationEngine {
    /// Create an engine, rejecting invalid configurations up front
    pub fn new(config: ReplicationConfig) -> ReplicationResult<Self> {
        config.validate().map_err(ReplicationError::configuration)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReplicationConfig {
        &self.config
    }

    /// Run teardown and build, returning the build report
    pub fn run(&self, observer: &mut dyn ReplicationObserver) -> ReplicationResult<ReplicationReport> {
        let start_time = Instant::now();

        // Strict mode fails before any destination is touched
        self.source_available()?;

        self.teardown()?;
        let report = self.build(observer)?;
        Ok(report.finish(start_time.elapsed()))
    }

    /// Delete every destination root and recreate it empty
    pub fn teardown(&self) -> ReplicationResult<()> {
        for destination in &self.config.destinations {
            reset_destination(&destination.root)?;
        }
        Ok(())
    }

    /// Copy every matching source file into each destination. Destinations
    /// are expected to exist; `build` never deletes anything.
    pub fn build(&self, observer: &mut dyn ReplicationObserver) -> ReplicationResult<ReplicationReport> {
        let start_time = Instant::now();
        let mut report = ReplicationReport::new(&self.config);

        let sources = if self.source_available()? {
            find_rule_files(&self.config.source_root, &self.config.match_suffix)?
        } else {
            Vec::new()
        };
        observer.files_found(sources.len());

        for source in &sources {
            let relative = source
                .strip_prefix(&self.config.source_root)
                .unwrap_or(source.as_path());
            report.record_match();

            for (index, destination) in self.config.destinations.iter().enumerate() {
                let target = self.target_path(destination, relative)?;
                let bytes = copy_rule_file(source, &target)?;
                report.record_write(index, bytes);
            }

            observer.file_replicated(relative);
        }

        Ok(report.finish(start_time.elapsed()))
    }

    /// Map a path relative to the source root into `destination`
    pub fn target_path(&self, destination: &Destination, relative: &Path) -> ReplicationResult<PathBuf> {
        let name = relative
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| destination.file_name_for(name, &self.config.match_suffix))
            .ok_or_else(|| {
                ReplicationError::configuration(format!(
                    "{} does not end with {}",
                    relative.display(),
                    self.config.match_suffix
                ))
            })?;

        let mut target = destination.root.join(relative);
        target.set_file_name(name);
        Ok(target)
    }

    /// Whether the source root can be walked. Under the lenient policy an
    /// absent root reports `false`; under the strict policy it is an error.
    fn source_available(&self) -> ReplicationResult<bool> {
        let root = &self.config.source_root;
        if root.exists() {
            return Ok(true);
        }
        match self.config.missing_source {
            MissingSourcePolicy::Empty => Ok(false),
            MissingSourcePolicy::Error => Err(ReplicationError::SourceMissing { path: root.clone() }),
        }
    }
}

/// Replicate with the given configuration and no progress reporting
pub fn replicate(config: ReplicationConfig) -> ReplicationResult<ReplicationReport> {
    ReplicationEngine::new(config)?.run(&mut ())
}

fn reset_destination(root: &Path) -> ReplicationResult<()> {
    match fs::symlink_metadata(root) {
        Ok(metadata) if metadata.is_dir() => {
            fs::remove_dir_all(root).map_err(|source| ReplicationError::Teardown {
                path: root.to_path_buf(),
                source,
            })?;
        }
        Ok(_) => {
            return Err(ReplicationError::DestinationNotDirectory {
                path: root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ReplicationError::Teardown {
                path: root.to_path_buf(),
                source,
            })
        }
    }

    fs::create_dir_all(root).map_err(|source| ReplicationError::CreateDir {
        path: root.to_path_buf(),
        source,
    })
}

fn copy_rule_file(source: &Path, target: &Path) -> ReplicationResult<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| ReplicationError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::copy(source, target).map_err(|e| ReplicationError::Copy {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    })
}
