//! Per-directory readme pointing at the published rule set URLs

use std::path::{Component, Path};

/// Raw download prefix of the published rule set repository
pub const DEFAULT_URL_BASE: &str = "https://raw.githubusercontent.com/Centralmatrix3/Ruleset/master";

/// Render a path with `/` separators regardless of platform
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn url(base: &str, relative: &Path) -> String {
    format!("{}/{}", base.trim_end_matches('/'), to_posix(relative))
}

/// Readme listing the single Egern download link
pub fn egern_readme(name: &str, base: &str, relative: &Path) -> String {
    format!("# 🧸 {}\n\n{}", name, url(base, relative))
}

/// Readme listing the sing-box source (`.json`) and binary (`.srs`) links
pub fn singbox_readme(name: &str, base: &str, relative: &Path) -> String {
    let srs = relative.with_extension("srs");
    format!(
        "# 🧸 {}\n\n{}\n\n{}",
        name,
        url(base, relative),
        url(base, &srs)
    )
}
