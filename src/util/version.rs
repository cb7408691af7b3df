use semver::Version;

pub const APP_NAME: &str = "Reality Calculator Pro";
pub const APP_AUTHOR: &str = "MEVERIK SOLUTION";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version written into exported project documents.
pub const EXPORT_FORMAT_VERSION: &str = "4.0";
/// Version prefix of the single-property documents that predate projects.
pub const LEGACY_FORMAT_PREFIX: &str = "3.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Legacy,
    Current,
}

/// Parses a document version such as `"4.0"` or `"3.1.2"`; missing minor and
/// patch components are treated as zero.
pub fn parse_format_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches(['v', 'V']);
    let parts = trimmed.split('.').count();
    let padded = match parts {
        1 => format!("{trimmed}.0.0"),
        2 => format!("{trimmed}.0"),
        _ => trimmed.to_string(),
    };
    Version::parse(&padded).ok()
}

pub fn classify_format(raw: Option<&str>) -> DocumentFormat {
    match raw {
        Some(raw) if raw.starts_with(LEGACY_FORMAT_PREFIX) => DocumentFormat::Legacy,
        _ => DocumentFormat::Current,
    }
}

/// True for documents written by a newer major version than this build.
pub fn is_newer_format(raw: &str) -> bool {
    match (parse_format_version(raw), parse_format_version(EXPORT_FORMAT_VERSION)) {
        (Some(theirs), Some(ours)) => theirs.major > ours.major,
        _ => false,
    }
}

pub fn version_label() -> String {
    format!("v{APP_VERSION}")
}
