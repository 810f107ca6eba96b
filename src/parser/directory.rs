use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ReplicationError, ReplicationResult};
use crate::parser::filter;

/// Find rule list files below `root`. The root itself is never a candidate;
/// results are sorted by path.
pub fn find_rule_files(root: &Path, suffix: &str) -> ReplicationResult<Vec<PathBuf>> {
    let mut rule_files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ReplicationError::Enumerate {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        if filter::is_rule_file(entry.path(), suffix) {
            rule_files.push(entry.into_path());
        }
    }

    Ok(rule_files)
}

/// Find files with `extension` below `dir`, sorted by path
pub fn find_platform_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if filter::has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
