//! Path text helpers shared by the builders, the runner and projects.
//!
//! The external tools and the shell both re-parse the command line, so
//! backslashes are rewritten to forward slashes before anything is
//! embedded in a command.

/// Suffix of Havok packfiles.
const HKX_SUFFIX: &str = ".hkx";

/// Suffix appended to upgraded legacy behavior files.
const LEGACY_OUTPUT_SUFFIX: &str = "_new.hkx";

/// Collapse doubled backslashes, then turn every backslash into `/`.
pub fn normalize_separators(text: &str) -> String {
    text.replace("\\\\", "\\").replace('\\', "/")
}

/// Normalized path without a trailing separator.
pub fn sanitize_path(text: &str) -> String {
    let normalized = normalize_separators(text);
    match normalized.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

/// Directory portion of a path, empty when the path has no separator.
///
/// Roots keep their separator so that `/a.xml` yields `/` and
/// `C:/a.xml` yields `C:/`.
pub fn parent_directory(path: &str) -> String {
    let normalized = normalize_separators(path);
    match normalized.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) if normalized[..idx].ends_with(':') => normalized[..=idx].to_string(),
        Some(idx) => normalized[..idx].to_string(),
        None => String::new(),
    }
}

/// Output name for an upgraded legacy behavior file.
pub fn legacy_output_name(hkx: &str) -> String {
    let split = hkx.len().saturating_sub(HKX_SUFFIX.len());
    match hkx.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(HKX_SUFFIX) => {
            format!("{}{}", &hkx[..split], LEGACY_OUTPUT_SUFFIX)
        }
        _ => format!("{hkx}{LEGACY_OUTPUT_SUFFIX}"),
    }
}
