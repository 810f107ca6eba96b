use std::path::Path;

/// Return true if the path is a regular file (or a link to one) whose name
/// ends with `suffix`. The comparison is case-sensitive.
pub fn is_rule_file(path: &Path, suffix: &str) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix))
}

/// Return true if the file carries the given extension (with leading dot)
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.is_file() && path.extension().is_some_and(|ext| ext == wanted)
}
