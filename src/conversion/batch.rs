use std::path::{Path, PathBuf};

use crate::conversion::engine::{convert_file, ConvertOptions, ConvertedFile, Platform};
use crate::error::{RuleError, RuleResult};
use crate::parser::find_platform_files;

/// Outcome of converting a batch of files
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// Fail when any file in the batch failed
    pub fn into_result(self) -> RuleResult<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(RuleError::Batch {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// Resolve the files a convert command works on. A file is taken as is; a
/// directory yields every file carrying the platform extension.
pub fn collect_files(path: &Path, platform: Platform) -> RuleResult<Vec<PathBuf>> {
    if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else if path.is_dir() {
        find_platform_files(path, platform.extension()).map_err(|e| RuleError::io(path, e))
    } else {
        Err(RuleError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Convert every file, continuing past failures. `on_result` sees each
/// outcome as it happens.
pub fn convert_batch<F>(
    files: &[PathBuf],
    platform: Platform,
    options: &ConvertOptions,
    mut on_result: F,
) -> BatchSummary
where
    F: FnMut(&Path, &RuleResult<ConvertedFile>),
{
    let mut summary = BatchSummary::default();

    for file in files {
        let result = convert_file(file, platform, options);
        on_result(file, &result);
        match result {
            Ok(_) => summary.converted.push(file.clone()),
            Err(e) => summary.failed.push((file.clone(), e.to_string())),
        }
    }

    summary
}
