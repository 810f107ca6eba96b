//! Single-file platform conversion

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RuleError, RuleResult};
use crate::formatter::readme::{self, DEFAULT_URL_BASE};
use crate::formatter::{EgernFormatter, RuleFormatter, SingboxFormatter};
use crate::parser::parse_rules;

/// Name of the readme written next to each converted file
pub const README_FILE_NAME: &str = "readme.md";

/// Conversion target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Egern,
    Singbox,
}

impl Platform {
    /// Display name, also the name of the platform's root directory
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Egern => "Egern",
            Platform::Singbox => "Singbox",
        }
    }

    /// Extension carried by the platform's rule set files
    pub fn extension(&self) -> &'static str {
        match self {
            Platform::Egern => ".yaml",
            Platform::Singbox => ".json",
        }
    }

    fn formatter(&self) -> Box<dyn RuleFormatter> {
        match self {
            Platform::Egern => Box::new(EgernFormatter::new()),
            Platform::Singbox => Box::new(SingboxFormatter::new()),
        }
    }

    fn readme(&self, name: &str, base: &str, relative: &Path) -> String {
        match self {
            Platform::Egern => readme::egern_readme(name, base, relative),
            Platform::Singbox => readme::singbox_readme(name, base, relative),
        }
    }

    /// Path of `path` relative to the parent of its nearest ancestor named
    /// after the platform, e.g. `Egern/Apple/Apple.yaml`
    pub fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        let root = path
            .ancestors()
            .skip(1)
            .find(|p| p.file_name().is_some_and(|n| n == self.name()))?;
        let base = root.parent().unwrap_or(Path::new(""));
        path.strip_prefix(base).ok().map(Path::to_path_buf)
    }
}

/// Options shared by every conversion in a run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Prefix for the download links written to readme files
    pub url_base: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            url_base: DEFAULT_URL_BASE.to_string(),
        }
    }
}

/// Files written by one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub path: PathBuf,
    pub readme: PathBuf,
}

/// Convert `path` in place for `platform` and write its readme.
///
/// Nothing is written when the file sits outside a platform directory.
pub fn convert_file(path: &Path, platform: Platform, options: &ConvertOptions) -> RuleResult<ConvertedFile> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| RuleError::InvalidFileName {
            path: path.to_path_buf(),
        })?;

    let relative = platform
        .relative_path(path)
        .or_else(|| {
            fs::canonicalize(path)
                .ok()
                .and_then(|absolute| platform.relative_path(&absolute))
        })
        .ok_or_else(|| RuleError::OutsidePlatformRoot {
            path: path.to_path_buf(),
            platform: platform.name().to_string(),
        })?;

    let text = fs::read_to_string(path).map_err(|e| RuleError::io(path, e))?;
    let rules = parse_rules(&text);
    let content = platform.formatter().format(name, &rules)?;
    fs::write(path, content).map_err(|e| RuleError::io(path, e))?;

    let readme_path = path
        .parent()
        .unwrap_or(Path::new(""))
        .join(README_FILE_NAME);
    let readme = platform.readme(name, &options.url_base, &relative);
    fs::write(&readme_path, readme).map_err(|e| RuleError::io(&readme_path, e))?;

    Ok(ConvertedFile {
        path: path.to_path_buf(),
        readme: readme_path,
    })
}
